//! Sepolia Transaction Runner
//!
//! Command-line entry point. All failures are reported here and mapped to a
//! non-zero exit status.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sepolia_tx_runner::{AppError, Cli, Config, TxRunner};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            init_logging(DEFAULT_LOG_LEVEL);
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::from(e.exit_code());
        }
    };

    init_logging(&config.log_level);

    match run(cli, config).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, network = e.is_network(), "Command failed");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Level used until `LOG_LEVEL` is known.
const DEFAULT_LOG_LEVEL: &str = "info";

/// `RUST_LOG` if set, otherwise `level`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize logging to stderr so stdout carries only command output.
fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(level))
        .init();
}

async fn run(cli: Cli, config: Config) -> Result<String, AppError> {
    let runner = TxRunner::new(config)?;
    tracing::info!(sender = %runner.sender(), "Starting sepolia-tx-runner");

    tokio::select! {
        result = runner.run(cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupted, abandoning command");
            Err(AppError::Cancelled)
        }
    }
}
