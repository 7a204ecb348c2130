//! Working directories under `~/.mimiq`.
//!
//! Layout:
//!
//! ```text
//! ~/.mimiq/
//!   log/    one append-only log file per invocation, timestamp-named
//!   temp/   session-scoped recording artifacts, empty after every session
//! ```
//!
//! `MIMIQ_HOME` overrides the base directory, which keeps integration tests
//! hermetic. Creation is skip-if-exists; cleanup removes `temp/` only and is
//! idempotent.

use std::path::{Path, PathBuf};

/// Process-wide working directories for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingPaths {
    pub root: PathBuf,
    pub temp_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl WorkingPaths {
    /// Paths rooted at `MIMIQ_HOME` if set, otherwise `~/.mimiq`.
    pub fn resolve() -> Self {
        let root = std::env::var_os("MIMIQ_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|home| home.join(".mimiq"))
                    .unwrap_or_else(|| PathBuf::from(".mimiq"))
            });

        Self::at(root)
    }

    /// Paths rooted at an explicit base directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let temp_dir = root.join("temp");
        let log_dir = root.join("log");

        Self {
            root,
            temp_dir,
            log_dir,
        }
    }

    /// Create the directory tree, skipping anything that already exists.
    pub fn prepare(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.temp_dir)?;
        std::fs::create_dir_all(&self.log_dir)
    }

    /// Remove the session-owned temp directory. Safe to call any number of
    /// times, with or without prior artifacts.
    pub fn clear_temp(&self) {
        match std::fs::remove_dir_all(&self.temp_dir) {
            Ok(()) => tracing::debug!(path = %self.temp_dir.display(), "cleared temp directory"),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                tracing::warn!(
                    path = %self.temp_dir.display(),
                    %error,
                    "failed to clear temp directory"
                );
            }
        }
    }

    /// Log file path for this invocation, named by its start timestamp.
    pub fn log_file_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
        self.log_dir.join(format!("{stamp}.log"))
    }
}

/// Expand a leading `~/` to the user's home directory. Paths handed to the
/// subshell expand on their own; this is for the few places std::fs touches
/// user-supplied paths directly.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }

    Path::new(path).to_path_buf()
}
