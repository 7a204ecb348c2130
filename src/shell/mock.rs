//! Canned shell provider for deterministic testing.
//!
//! A single configurable struct rather than a family of subclasses: every
//! scenario (missing dependency, no simulators, failing record, failing
//! encode) is a plain value built with the `with_*`/`without_*` helpers.
//! The CLI's hidden `--mode` option maps onto these, so transcript tests
//! can drive the real binary end to end without spawning `xcrun` or
//! `ffmpeg`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Dependency;
use crate::output::{OutputKind, QualityLevel};
use crate::shell::provider::ShellProvider;
use crate::shell::runner::CommandOutcome;
use crate::simulator::Simulator;

/// The fixed pair of simulators every "available" scenario reports.
pub fn dummy_simulators() -> Vec<Simulator> {
    vec![
        Simulator {
            udid: Uuid::parse_str("00000000-0000-0000-0000-000000000000").unwrap(),
            name: "Mimiq Simulator".into(),
        },
        Simulator {
            udid: Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap(),
            name: "Mimiq Simulator #2".into(),
        },
    ]
}

/// Shell provider returning pre-configured values for every operation.
#[derive(Debug, Clone)]
pub struct MockShellProvider {
    homebrew_installed: bool,
    ffmpeg_installed: bool,
    simulators: Vec<Simulator>,
    record_outcome: CommandOutcome,
    encode_outcome: CommandOutcome,
    listing: Result<Vec<String>, ()>,
}

impl Default for MockShellProvider {
    /// Everything succeeds: both dependencies installed, the dummy
    /// simulators available, recording and encoding return status 0, and
    /// the destination directory is empty.
    fn default() -> Self {
        Self {
            homebrew_installed: true,
            ffmpeg_installed: true,
            simulators: dummy_simulators(),
            record_outcome: CommandOutcome::success(),
            encode_outcome: CommandOutcome::success(),
            listing: Ok(Vec::new()),
        }
    }
}

impl MockShellProvider {
    pub fn without_homebrew(mut self) -> Self {
        self.homebrew_installed = false;
        self
    }

    pub fn without_ffmpeg(mut self) -> Self {
        self.ffmpeg_installed = false;
        self
    }

    pub fn without_simulators(mut self) -> Self {
        self.simulators = Vec::new();
        self
    }

    pub fn with_simulators(mut self, simulators: Vec<Simulator>) -> Self {
        self.simulators = simulators;
        self
    }

    pub fn with_record_outcome(mut self, outcome: CommandOutcome) -> Self {
        self.record_outcome = outcome;
        self
    }

    pub fn with_encode_outcome(mut self, outcome: CommandOutcome) -> Self {
        self.encode_outcome = outcome;
        self
    }

    pub fn with_listing(mut self, names: Vec<String>) -> Self {
        self.listing = Ok(names);
        self
    }

    pub fn with_failing_listing(mut self) -> Self {
        self.listing = Err(());
        self
    }
}

#[async_trait]
impl ShellProvider for MockShellProvider {
    fn is_dependency_installed(&self, dependency: Dependency) -> bool {
        match dependency {
            Dependency::Homebrew => self.homebrew_installed,
            Dependency::FFMpeg => self.ffmpeg_installed,
        }
    }

    async fn available_simulators(&self) -> Vec<Simulator> {
        self.simulators.clone()
    }

    async fn record_simulator(&self, _target: &Simulator, _mov_target: &str) -> CommandOutcome {
        self.record_outcome.clone()
    }

    async fn generate_output(
        &self,
        _output: OutputKind,
        _quality: QualityLevel,
        _mov_source: &str,
        _output_target: &str,
        _custom_ffmpeg_dir: Option<&str>,
    ) -> CommandOutcome {
        self.encode_outcome.clone()
    }

    fn list_directory(&self, _path: &str) -> std::io::Result<Vec<String>> {
        match &self.listing {
            Ok(names) => Ok(names.clone()),
            Err(()) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "mock listing failure",
            )),
        }
    }
}
