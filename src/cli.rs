//! Command-line surface and dispatch.
//!
//! `record` is the default subcommand, so `mimiq --output mp4` and
//! `mimiq record --output mp4` are equivalent. `record` and `list` carry a
//! hidden `--mode` option that swaps the system shell provider for a canned
//! one; the transcript integration tests drive the binary through these
//! modes.

use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::{OutputKind, QualityLevel};
use crate::session::{SessionConfig, SessionController, DEFAULT_RESULT_PATH};
use crate::shell::mock::MockShellProvider;
use crate::shell::provider::{ShellProvider, SystemShellProvider};
use crate::shell::runner::CommandOutcome;
use crate::util::paths::WorkingPaths;

#[derive(Debug, Parser)]
#[command(
    name = "mimiq",
    version,
    about = "Record your Xcode simulator and convert it to GIF, MP4 or Mov",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the default `record` subcommand.
    #[command(flatten)]
    pub record: RecordArgs,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record your Xcode simulator and convert it to GIF, MP4 or Mov
    Record(RecordArgs),
    /// List Available Simulator
    List(ListArgs),
    /// mimiq version
    Version,
    /// Clear all mimiq process cache
    ClearCache,
    /// List available quality
    Quality,
    /// List all output types
    OutputType,
}

#[derive(Debug, Clone, Args)]
pub struct RecordArgs {
    /// Destination path you want to place mimiq output
    #[arg(long)]
    pub path: Option<String>,

    /// Select specific simulator based on its UDID, run `mimiq list` to
    /// check available simulator
    #[arg(long)]
    pub udid: Option<String>,

    /// Use custom FFMpeg, provide it with the path to the FFMpeg binary
    /// directory, not the binary itself
    #[arg(long = "custom-ffmpeg")]
    pub custom_ffmpeg: Option<String>,

    /// Select output type
    #[arg(short, long, value_enum, default_value_t = OutputKind::Gif)]
    pub output: OutputKind,

    /// Determine what GIF quality mimiq will output, only meaningful when
    /// output is `gif`
    #[arg(short, long, value_enum, default_value_t = QualityLevel::Medium)]
    pub quality: QualityLevel,

    /// Execute mimiq with verbose log
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Mock mode for testing purpose
    #[arg(long, value_enum, hide = true)]
    pub mode: Option<RecordMode>,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output available simulator to mimiq with JSON format
    #[arg(long)]
    pub json: bool,

    /// Mock mode for testing purpose
    #[arg(long, value_enum, hide = true)]
    pub mode: Option<ListMode>,
}

/// Canned provider scenarios for the `record` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordMode {
    NoHomebrew,
    NoFfmpeg,
    NoSimulator,
    FailRecord,
    FailMakeOutput,
    Success,
}

impl RecordMode {
    fn provider(self) -> MockShellProvider {
        match self {
            RecordMode::NoHomebrew => MockShellProvider::default().without_homebrew(),
            RecordMode::NoFfmpeg => MockShellProvider::default().without_ffmpeg(),
            RecordMode::NoSimulator => MockShellProvider::default().without_simulators(),
            RecordMode::FailRecord => MockShellProvider::default()
                .with_record_outcome(CommandOutcome::failure(1, "Failed to create mov file")),
            RecordMode::FailMakeOutput => MockShellProvider::default()
                .with_encode_outcome(CommandOutcome::failure(1, "Failed to convert recording")),
            RecordMode::Success => MockShellProvider::default(),
        }
    }
}

/// Canned provider scenarios for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListMode {
    Available,
    None,
}

impl ListMode {
    fn provider(self) -> MockShellProvider {
        match self {
            ListMode::Available => MockShellProvider::default(),
            ListMode::None => MockShellProvider::default().without_simulators(),
        }
    }
}

impl Cli {
    /// Verbosity requested on the command line, used to gate the console
    /// log layer before dispatch.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Commands::Record(args)) => args.verbose,
            None => self.record.verbose,
            _ => false,
        }
    }
}

/// Dispatch the parsed command line and return the process exit code.
pub async fn execute(cli: Cli) -> i32 {
    match cli.command {
        Some(Commands::Record(args)) => run_record(args).await,
        None => run_record(cli.record).await,
        Some(Commands::List(args)) => run_list(args).await,
        Some(Commands::Version) => {
            println!("current version {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Some(Commands::ClearCache) => {
            WorkingPaths::resolve().clear_temp();
            0
        }
        Some(Commands::Quality) => {
            println!("Available Quality");
            for quality in QualityLevel::ALL {
                println!("- {quality}");
            }
            0
        }
        Some(Commands::OutputType) => {
            println!("Available Output Type");
            for kind in OutputKind::ALL {
                println!("- {kind}");
            }
            0
        }
    }
}

async fn run_record(args: RecordArgs) -> i32 {
    let provider: Arc<dyn ShellProvider> = match args.mode {
        Some(mode) => Arc::new(mode.provider()),
        None => Arc::new(SystemShellProvider),
    };

    let config = SessionConfig {
        destination_dir: normalize_destination(args.path),
        udid: args.udid,
        custom_ffmpeg_dir: args.custom_ffmpeg,
        output: args.output,
        quality: args.quality,
        verbose: args.verbose,
    };

    let controller = SessionController::new(config, provider, WorkingPaths::resolve());
    match controller.run().await {
        Ok(_) => 0,
        Err(error) => {
            tracing::error!(%error, "session failed");
            println!("{error}");
            1
        }
    }
}

async fn run_list(args: ListArgs) -> i32 {
    let provider: Arc<dyn ShellProvider> = match args.mode {
        Some(mode) => Arc::new(mode.provider()),
        None => Arc::new(SystemShellProvider),
    };

    let simulators = provider.available_simulators().await;
    if simulators.is_empty() {
        println!("{}", if args.json { "[]" } else { "💥 No Available Simulator to mimiq" });
        return 0;
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string(&simulators).unwrap_or_else(|_| "[]".to_string())
        );
    } else {
        println!("Available Simulator to mimiq: ");
        for simulator in &simulators {
            println!("✅ {} {}", simulator.udid, simulator.name);
        }
    }

    0
}

/// Ensure the destination directory ends with a separator so the final
/// artifact path can be built by plain concatenation.
fn normalize_destination(path: Option<String>) -> String {
    let mut destination = path.unwrap_or_else(|| DEFAULT_RESULT_PATH.to_string());
    if !destination.ends_with('/') {
        destination.push('/');
    }
    destination
}
