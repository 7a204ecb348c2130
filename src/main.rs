use std::fs::OpenOptions;

use clap::Parser;
use mimiq::cli::{self, Cli};
use mimiq::util::paths::WorkingPaths;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose());

    let code = cli::execute(cli).await;

    // The recorder can leave a blocking stdin read parked after a natural
    // completion; exit directly instead of waiting for it during runtime
    // shutdown.
    std::process::exit(code);
}

/// Log everything at debug to the per-invocation file under
/// `~/.mimiq/log/`; mirror to stderr only with `-v`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter, Layer};

    let file_layer = open_log_file().map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false) // No ANSI colors in the log file
            .with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::DEBUG.into())
                    .from_env_lossy(),
            )
    });

    let console_layer = verbose.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .with_filter(LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();
}

/// Open this invocation's append-only log file. Logging is best-effort; a
/// failure here leaves console logging only.
fn open_log_file() -> Option<std::fs::File> {
    let paths = WorkingPaths::resolve();
    let file: anyhow::Result<std::fs::File> = (|| {
        std::fs::create_dir_all(&paths.log_dir)?;
        Ok(OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file_path())?)
    })();

    file.ok()
}
