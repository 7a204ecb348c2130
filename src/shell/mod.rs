pub mod mock;
pub mod provider;
pub mod runner;

pub use mock::MockShellProvider;
pub use provider::{ShellProvider, SystemShellProvider};
pub use runner::{run_command, CommandOutcome};
