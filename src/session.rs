//! Session controller.
//!
//! Drives one recording session through a fixed sequence of states and owns
//! the only fatal-error decision point. Collaborators arrive through an
//! explicit context (shell provider + working paths + config), never through
//! globals, so every step is substitutable in tests.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Dependency, SessionError};
use crate::output::{OutputKind, QualityLevel};
use crate::shell::provider::ShellProvider;
use crate::shell::runner::{run_command, CommandOutcome};
use crate::simulator::select_target;
use crate::util::paths::{expand_tilde, WorkingPaths};
use crate::util::sequence::next_file_name;
use crate::APP_NAME;

/// Destination for generated output when `--path` is not given.
pub const DEFAULT_RESULT_PATH: &str = "~/Desktop/";

/// Read-only configuration for one session, built once at invocation start.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Destination directory for the final artifact, with trailing slash.
    pub destination_dir: String,
    /// Explicit simulator UDID; first available simulator when `None`.
    pub udid: Option<String>,
    /// Directory containing a user-supplied ffmpeg binary.
    pub custom_ffmpeg_dir: Option<String>,
    pub output: OutputKind,
    pub quality: QualityLevel,
    pub verbose: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            destination_dir: DEFAULT_RESULT_PATH.to_string(),
            udid: None,
            custom_ffmpeg_dir: None,
            output: OutputKind::Gif,
            quality: QualityLevel::Medium,
            verbose: false,
        }
    }
}

/// States of one session run, in order. `Failed` is implicit: any step can
/// end the run with a [`SessionError`] instead of reaching the next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Init,
    EnvironmentReady,
    DependenciesChecked,
    TargetResolved,
    Recorded,
    Encoded,
    Done,
}

/// Sequences environment setup, dependency checks, target resolution,
/// recording, encoding, and cleanup.
pub struct SessionController {
    config: SessionConfig,
    provider: Arc<dyn ShellProvider>,
    paths: WorkingPaths,
}

impl SessionController {
    pub fn new(
        config: SessionConfig,
        provider: Arc<dyn ShellProvider>,
        paths: WorkingPaths,
    ) -> Self {
        Self {
            config,
            provider,
            paths,
        }
    }

    /// Run the session to completion and return the final artifact path.
    ///
    /// Cleanup of the temp directory runs exactly once per terminal
    /// transition, success or failure, strictly after the recorder's wait
    /// has returned.
    pub async fn run(&self) -> Result<String, SessionError> {
        let result = self.run_pipeline().await;
        self.paths.clear_temp();
        result
    }

    async fn run_pipeline(&self) -> Result<String, SessionError> {
        self.transition(SessionState::Init);
        tracing::debug!(config = ?self.config, "mimiq start to run");

        // Host diagnostics go to the log only.
        log_outcome("sw_vers", &run_command("sw_vers").await);

        self.paths
            .prepare()
            .map_err(SessionError::EnvironmentSetup)?;
        self.transition(SessionState::EnvironmentReady);

        self.check_dependencies().await?;
        self.transition(SessionState::DependenciesChecked);

        let simulators = self.provider.available_simulators().await;
        let target = select_target(&simulators, self.config.udid.as_deref())
            .ok_or(SessionError::NoTargetAvailable)?;
        self.transition(SessionState::TargetResolved);
        tracing::debug!(?target, "simulator target");

        log_outcome("xcodebuild -version", &run_command("xcodebuild -version").await);

        let mov_source = self
            .paths
            .temp_dir
            .join(format!("{}.mov", Uuid::new_v4()))
            .to_string_lossy()
            .into_owned();
        tracing::debug!(%mov_source, "simulator to record on");

        let record_outcome = self.provider.record_simulator(&target, &mov_source).await;
        tracing::debug!(status = record_outcome.status, "record simulator finished");
        if !record_outcome.is_success() {
            log_outcome("record", &record_outcome);
            return Err(SessionError::RecordingFailed {
                status: record_outcome.status,
                stderr: record_outcome.stderr,
            });
        }
        self.transition(SessionState::Recorded);

        println!("⚙️ Creating output...");

        let output_target = self.output_target_path();
        let encode_outcome = self
            .provider
            .generate_output(
                self.config.output,
                self.config.quality,
                &mov_source,
                &output_target,
                self.config.custom_ffmpeg_dir.as_deref(),
            )
            .await;
        if !encode_outcome.is_success() {
            log_outcome("encode", &encode_outcome);
            return Err(SessionError::EncodingFailed {
                status: encode_outcome.status,
                stderr: encode_outcome.stderr,
            });
        }
        self.transition(SessionState::Encoded);
        log_outcome("encode", &encode_outcome);

        tracing::debug!(%output_target, "output generated");
        println!("✅ Grab your output at {output_target}");
        self.transition(SessionState::Done);

        Ok(output_target)
    }

    /// Verify the package manager and transcoder are present. Skipped
    /// entirely when the user points at their own ffmpeg directory.
    async fn check_dependencies(&self) -> Result<(), SessionError> {
        if self.config.custom_ffmpeg_dir.is_some() {
            tracing::debug!("custom ffmpeg directory supplied, skipping dependency checks");
            return Ok(());
        }

        if !self.provider.is_dependency_installed(Dependency::Homebrew) {
            tracing::debug!("missing homebrew");
            return Err(SessionError::MissingDependency(Dependency::Homebrew));
        }
        log_outcome("brew --version", &run_command("brew --version").await);

        if !self.provider.is_dependency_installed(Dependency::FFMpeg) {
            tracing::debug!("missing ffmpeg");
            return Err(SessionError::MissingDependency(Dependency::FFMpeg));
        }

        Ok(())
    }

    /// Destination path of the final artifact, sequenced to avoid
    /// colliding with earlier outputs.
    fn output_target_path(&self) -> String {
        let name = self.sequenced_file_name();
        format!(
            "{}{}.{}",
            self.config.destination_dir,
            name,
            self.config.output.file_extension()
        )
    }

    /// Next free `mimiq<n>` name at the destination. A listing failure
    /// degrades to the bare prefix; it is a usability fallback, not an
    /// error path.
    fn sequenced_file_name(&self) -> String {
        let destination = expand_tilde(&self.config.destination_dir);
        match self
            .provider
            .list_directory(&destination.to_string_lossy())
        {
            Ok(entries) => next_file_name(&entries, APP_NAME),
            Err(error) => {
                tracing::debug!(%error, "failed to list destination, using bare prefix");
                APP_NAME.to_string()
            }
        }
    }

    fn transition(&self, state: SessionState) {
        tracing::debug!(?state, "session state");
    }
}

/// Mirror a command's captured streams into the log, one line per entry.
fn log_outcome(label: &str, outcome: &CommandOutcome) {
    tracing::debug!(label, status = outcome.status, "command finished");

    for line in outcome.stdout.as_deref().unwrap_or_default().lines() {
        tracing::debug!(label, "{line}");
    }
    for line in outcome.stderr.as_deref().unwrap_or_default().lines() {
        tracing::debug!(label, "{line}");
    }
}
