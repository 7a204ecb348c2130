pub mod cli;
pub mod error;
pub mod output;
pub mod recorder;
pub mod session;
pub mod shell;
pub mod simulator;
pub mod util;

/// Binary name, used for output file prefixes and user-facing messages.
pub const APP_NAME: &str = "mimiq";

pub use cli::Cli;
pub use error::{Dependency, SessionError};
pub use output::{OutputKind, QualityLevel};
pub use session::{SessionConfig, SessionController};
pub use shell::{CommandOutcome, MockShellProvider, ShellProvider, SystemShellProvider};
pub use simulator::Simulator;
pub use util::paths::WorkingPaths;
