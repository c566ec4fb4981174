//! Command-line interface.

mod runner;

pub use runner::{parse_address, TxRunner};

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};

use crate::{config::Config, error::AppError};

/// Submit and confirm transactions on an Ethereum test network.
#[derive(Debug, Parser)]
#[command(name = "sepolia-tx-runner", version, about)]
pub struct Cli {
    /// Load environment variables from this file instead of `./.env`.
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Seconds to wait for a receipt before giving up.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Milliseconds between receipt queries.
    #[arg(long, global = true)]
    pub poll_interval_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the latest block, or the block at --number.
    Block {
        #[arg(long)]
        number: Option<u64>,
    },

    /// Show the balance and pending nonce of an address (default: the sender).
    Balance {
        #[arg(long)]
        address: Option<String>,
    },

    /// Send ETH to a recipient.
    Send(SendArgs),

    /// Deploy the counter contract and wait for the receipt.
    Deploy(GasArgs),

    /// Call increment() on a deployed counter and wait for the receipt.
    Increment {
        /// Counter contract address.
        #[arg(long)]
        contract: String,
        #[command(flatten)]
        gas: GasArgs,
    },

    /// Read count() from a deployed counter.
    Count {
        /// Counter contract address.
        #[arg(long)]
        contract: String,
    },
}

/// Gas overrides shared by transaction-sending commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GasArgs {
    /// Gas limit (default depends on the operation).
    #[arg(long)]
    pub gas_limit: Option<u64>,

    /// Gas price in wei (default: the node's suggestion).
    #[arg(long)]
    pub gas_price: Option<u128>,
}

/// Arguments for `send`.
#[derive(Debug, Clone, Default, Args)]
pub struct SendArgs {
    /// Recipient address (default: RECIPIENT_ADDRESS).
    #[arg(long)]
    pub to: Option<String>,

    /// Amount in ETH (default: TRANSFER_AMOUNT_ETH).
    #[arg(long)]
    pub amount: Option<String>,

    #[command(flatten)]
    pub gas: GasArgs,

    /// Wait for the receipt instead of returning after broadcast.
    #[arg(long)]
    pub wait: bool,
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> Result<Config, AppError> {
        let mut config = match &self.env_file {
            Some(path) => Config::from_env_file(path)?,
            None => Config::from_env()?,
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    /// Overlay command-line flags onto `config`.
    pub fn apply_overrides(&self, config: &mut Config) -> Result<(), AppError> {
        if let Some(secs) = self.timeout_secs {
            if secs == 0 {
                return Err(AppError::Config("--timeout-secs must be greater than zero".into()));
            }
            config.confirmation_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = self.poll_interval_ms {
            if ms == 0 {
                return Err(AppError::Config(
                    "--poll-interval-ms must be greater than zero".into(),
                ));
            }
            config.poll_interval = Duration::from_millis(ms);
        }
        Ok(())
    }
}
