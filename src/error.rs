//! Session error taxonomy.
//!
//! Every variant is terminal for the current invocation. Lower layers
//! (command runner, recorder, encoder) return [`crate::shell::CommandOutcome`]
//! values and never exit the process; the session controller converts bad
//! outcomes into these errors and `main` maps them to exit code 1. The
//! `Display` text of each variant is the exact single-line message shown to
//! the user.

/// External tool the session depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    Homebrew,
    FFMpeg,
}

impl Dependency {
    /// Binary name probed on `$PATH`.
    pub fn binary_name(&self) -> &'static str {
        match self {
            Dependency::Homebrew => "brew",
            Dependency::FFMpeg => "ffmpeg",
        }
    }

    fn missing_message(&self) -> &'static str {
        match self {
            Dependency::Homebrew => {
                "💥 Missing Homebrew, please install Homebrew, for more visit https://brew.sh"
            }
            Dependency::FFMpeg => {
                "💥 Missing FFMpeg, please install FFMpeg, by executing `brew install ffmpeg`"
            }
        }
    }
}

/// Error type for a recording session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Creating the working directories failed.
    #[error("💥 Failed to Setup Environment")]
    EnvironmentSetup(#[source] std::io::Error),

    /// A required external tool is not installed.
    #[error("{}", .0.missing_message())]
    MissingDependency(Dependency),

    /// No booted simulator matched the requested target.
    #[error("💥 No Available Simulator to mimiq")]
    NoTargetAvailable,

    /// The recording command exited with a non-zero status.
    #[error("💥 Record Failed, Please Try Again")]
    RecordingFailed { status: i32, stderr: Option<String> },

    /// The encode pipeline exited with a non-zero status.
    #[error("💥 Failed on Creating output, Please Try Again")]
    EncodingFailed { status: i32, stderr: Option<String> },
}
