//! Shell operation abstraction.
//!
//! Everything the session controller needs from the outside world sits
//! behind [`ShellProvider`], so tests substitute canned providers (see
//! [`crate::shell::mock`]) without touching `xcrun`, `ffmpeg`, or the
//! filesystem. [`SystemShellProvider`] is the real thing.

use async_trait::async_trait;

use crate::error::Dependency;
use crate::output::{encode_command, OutputKind, QualityLevel};
use crate::recorder::Recording;
use crate::shell::runner::{run_command, CommandOutcome};
use crate::simulator::{parse_available_simulators, Simulator};

/// Shell operations consumed by the session controller.
#[async_trait]
pub trait ShellProvider: Send + Sync {
    /// Whether `dependency` is reachable on `$PATH`.
    fn is_dependency_installed(&self, dependency: Dependency) -> bool;

    /// Enumerate booted simulators across all runtimes.
    async fn available_simulators(&self) -> Vec<Simulator>;

    /// Record `target` to `mov_target`, returning once the recording
    /// process has terminated (operator stop, natural exit, or failure).
    async fn record_simulator(&self, target: &Simulator, mov_target: &str) -> CommandOutcome;

    /// Transcode `mov_source` into `output_target`.
    async fn generate_output(
        &self,
        output: OutputKind,
        quality: QualityLevel,
        mov_source: &str,
        output_target: &str,
        custom_ffmpeg_dir: Option<&str>,
    ) -> CommandOutcome;

    /// File names (not directories) at `path`.
    fn list_directory(&self, path: &str) -> std::io::Result<Vec<String>>;
}

/// Provider backed by the real system shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemShellProvider;

#[async_trait]
impl ShellProvider for SystemShellProvider {
    fn is_dependency_installed(&self, dependency: Dependency) -> bool {
        which::which(dependency.binary_name()).is_ok()
    }

    async fn available_simulators(&self) -> Vec<Simulator> {
        let runtimes = run_command("xcrun simctl list -v runtimes --json").await;
        if !runtimes.is_success() {
            return Vec::new();
        }

        let devices = run_command("xcrun simctl list -v devices booted --json").await;
        if !devices.is_success() {
            return Vec::new();
        }

        parse_available_simulators(
            runtimes.stdout.as_deref().unwrap_or_default(),
            devices.stdout.as_deref().unwrap_or_default(),
        )
    }

    async fn record_simulator(&self, target: &Simulator, mov_target: &str) -> CommandOutcome {
        let command = format!(
            "xcrun simctl io {} recordVideo -f {}",
            target.udid, mov_target
        );
        let prompt = format!(
            "🔨 Recording Simulator {} with UDID {}... Press Enter to Stop.",
            target.name, target.udid
        );

        tracing::debug!(%command, "start recording");

        Recording::start(&command, &prompt).wait().await
    }

    async fn generate_output(
        &self,
        output: OutputKind,
        quality: QualityLevel,
        mov_source: &str,
        output_target: &str,
        custom_ffmpeg_dir: Option<&str>,
    ) -> CommandOutcome {
        match output {
            OutputKind::Gif => tracing::debug!(
                target_path = output_target,
                quality = %quality,
                "output will be created"
            ),
            OutputKind::Mov | OutputKind::Mp4 => {
                tracing::debug!(target_path = output_target, "output will be created")
            }
        }

        let command = encode_command(output, quality, mov_source, output_target, custom_ffmpeg_dir);
        tracing::debug!(%command, "executing encode pipeline");

        run_command(&command).await
    }

    fn list_directory(&self, path: &str) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(names)
    }
}
