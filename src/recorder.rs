//! Interruptible recorder.
//!
//! `simctl io ... recordVideo` runs until told to stop, so the recording
//! command is spawned without blocking the caller while the operator is
//! handed a press-Enter prompt. Whichever happens first — operator input or
//! the child exiting on its own — exactly one [`CommandOutcome`] is
//! delivered through a oneshot channel, and [`Recording::wait`] is the one
//! human-scale suspension point in the whole pipeline.
//!
//! Interruption is a SIGINT, not a kill: `simctl` finalizes the mov
//! container on SIGINT and exits cleanly. If the operator input arrives
//! after the child already exited, the signal path is a no-op.

use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::sync::oneshot;

use crate::shell::runner::{exit_code, CommandOutcome};

/// Handle to an in-flight recording. Dropping it without calling
/// [`Recording::wait`] detaches the child.
pub struct Recording {
    completion: oneshot::Receiver<CommandOutcome>,
}

impl Recording {
    /// Launch `command` through a subshell and present `prompt` to the
    /// operator. Never blocks; a child that fails to launch still yields a
    /// completion with a degenerate non-zero outcome instead of hanging.
    pub fn start(command: &str, prompt: &str) -> Recording {
        Self::start_with_shell("bash", command, prompt)
    }

    fn start_with_shell(shell: &str, command: &str, prompt: &str) -> Recording {
        let (tx, rx) = oneshot::channel();

        let spawned = Command::new(shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(error) => {
                tracing::debug!(%error, command, "failed to launch recording process");
                let _ = tx.send(CommandOutcome::failure(127, error.to_string()));
                return Recording { completion: rx };
            }
        };

        println!("{prompt}");

        let pid = child.id();
        tokio::spawn(async move {
            // Drain both pipes concurrently so the child can never block on
            // a full pipe buffer while we wait for it.
            let stdout_task = child.stdout.take().map(|mut stream| {
                tokio::spawn(async move {
                    let mut buffer = Vec::new();
                    let _ = stream.read_to_end(&mut buffer).await;
                    buffer
                })
            });
            let stderr_task = child.stderr.take().map(|mut stream| {
                tokio::spawn(async move {
                    let mut buffer = Vec::new();
                    let _ = stream.read_to_end(&mut buffer).await;
                    buffer
                })
            });

            // A closed stdin delivers EOF instantly; only a real line from
            // the operator counts as a stop request.
            let operator_input = async {
                let pressed_enter = tokio::task::spawn_blocking(|| {
                    let mut line = String::new();
                    matches!(std::io::stdin().read_line(&mut line), Ok(n) if n > 0)
                });
                if !pressed_enter.await.unwrap_or(false) {
                    std::future::pending::<()>().await;
                }
            };
            tokio::pin!(operator_input);

            let status = tokio::select! {
                status = child.wait() => status,
                _ = &mut operator_input => {
                    println!("⚙️  Stopping...");
                    tracing::debug!("stopping simulator recording process");
                    interrupt(&mut child, pid);
                    child.wait().await
                }
            };

            let stdout = match stdout_task {
                Some(task) => task.await.unwrap_or_default(),
                None => Vec::new(),
            };
            let stderr = match stderr_task {
                Some(task) => task.await.unwrap_or_default(),
                None => Vec::new(),
            };

            let outcome = match status {
                Ok(status) => CommandOutcome {
                    status: exit_code(status),
                    stdout: capture(stdout),
                    stderr: capture(stderr),
                },
                Err(error) => CommandOutcome::failure(127, error.to_string()),
            };

            let _ = tx.send(outcome);
        });

        Recording { completion: rx }
    }

    /// Block until the single completion notification arrives.
    pub async fn wait(self) -> CommandOutcome {
        self.completion
            .await
            .unwrap_or_else(|_| CommandOutcome::failure(127, "recording task dropped"))
    }
}

fn capture(bytes: Vec<u8>) -> Option<String> {
    if bytes.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Graceful termination signal; the child may already have exited.
fn interrupt(child: &mut tokio::process::Child, pid: Option<u32>) {
    #[cfg(unix)]
    {
        let _ = child;
        if let Some(pid) = pid {
            unsafe {
                libc::kill(pid as i32, libc::SIGINT);
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        let _ = child.start_kill();
    }
}
