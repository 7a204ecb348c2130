//! Synchronous-in-effect execution of shell command lines.
//!
//! Everything external goes through `bash -c`, and the caller is handed the
//! exit status plus fully drained stdout/stderr. A non-zero status is a
//! normal outcome here, never an `Err`; interpreting it is the caller's job.

use std::process::Stdio;

use tokio::process::Command;

/// Result of running one external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub status: i32,
    /// `None` only when the stream produced zero bytes.
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandOutcome {
    pub fn success() -> Self {
        Self {
            status: 0,
            stdout: None,
            stderr: None,
        }
    }

    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: None,
            stderr: Some(stderr.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// Run `command` through a subshell, blocking the caller until the child
/// terminates with both pipes drained. A failure to launch the subshell is
/// folded into a degenerate non-zero outcome.
pub async fn run_command(command: &str) -> CommandOutcome {
    let output = Command::new("bash")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .output()
        .await;

    match output {
        Ok(output) => CommandOutcome {
            status: exit_code(output.status),
            stdout: capture(output.stdout),
            stderr: capture(output.stderr),
        },
        Err(error) => {
            tracing::debug!(%error, command, "failed to launch subshell");
            CommandOutcome::failure(127, error.to_string())
        }
    }
}

fn capture(bytes: Vec<u8>) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Map an `ExitStatus` to a plain integer, treating signal termination as
/// the conventional `128 + signal`.
pub fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}
