//! Configuration management module.
//!
//! Handles loading configuration from environment variables, optionally
//! seeded from a `.env` file.

use std::{env, path::Path, time::Duration};

use alloy::primitives::{Address, U256};

use crate::{error::AppError, types::parse_units};

/// Default transfer amount in ETH.
pub const DEFAULT_TRANSFER_AMOUNT_ETH: &str = "0.0001";

/// Default time to wait for a receipt.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Default delay between receipt queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Private key for the sender (hex string, 0x prefix optional).
    pub private_key: String,
    /// Default recipient for transfers.
    pub recipient: Option<Address>,
    /// Default transfer amount in wei.
    pub transfer_amount: U256,
    /// How long to wait for a receipt before giving up.
    pub confirmation_timeout: Duration,
    /// Delay between receipt queries.
    pub poll_interval: Duration,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SEPOLIA_RPC_URL`: Ethereum JSON-RPC endpoint
    /// - `PRIVATE_KEY`: Private key of the sending account (hex)
    ///
    /// Optional environment variables:
    /// - `RECIPIENT_ADDRESS`: Default transfer recipient
    /// - `TRANSFER_AMOUNT_ETH`: Default transfer amount (default: 0.0001)
    /// - `CONFIRMATION_TIMEOUT_SECS`: Receipt wait deadline (default: 120)
    /// - `POLL_INTERVAL_MS`: Receipt poll interval (default: 2000)
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an explicit `.env` file, then the process
    /// environment. Unlike [`Config::from_env`], a missing file is an error.
    pub fn from_env_file(path: &Path) -> Result<Self, AppError> {
        dotenvy::from_path(path).map_err(|e| {
            AppError::Config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} environment variable not set")))
        };

        let rpc_url = required("SEPOLIA_RPC_URL")?;
        let private_key = required("PRIVATE_KEY")?;

        let recipient = lookup("RECIPIENT_ADDRESS")
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                v.trim().parse::<Address>().map_err(|e| {
                    AppError::Config(format!("Invalid RECIPIENT_ADDRESS '{v}': {e}"))
                })
            })
            .transpose()?;

        let amount = lookup("TRANSFER_AMOUNT_ETH")
            .unwrap_or_else(|| DEFAULT_TRANSFER_AMOUNT_ETH.to_string());
        let transfer_amount = parse_units(&amount, 18)
            .map_err(|e| AppError::Config(format!("Invalid TRANSFER_AMOUNT_ETH: {e}")))?;

        let confirmation_timeout = lookup("CONFIRMATION_TIMEOUT_SECS")
            .map(|v| parse_u64("CONFIRMATION_TIMEOUT_SECS", &v).map(Duration::from_secs))
            .transpose()?
            .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT);

        let poll_interval = lookup("POLL_INTERVAL_MS")
            .map(|v| parse_u64("POLL_INTERVAL_MS", &v).map(Duration::from_millis))
            .transpose()?
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        if confirmation_timeout.is_zero() {
            return Err(AppError::Config(
                "CONFIRMATION_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        if poll_interval.is_zero() {
            return Err(AppError::Config("POLL_INTERVAL_MS must be greater than zero".into()));
        }

        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            rpc_url,
            private_key,
            recipient,
            transfer_amount,
            confirmation_timeout,
            poll_interval,
            log_level,
        })
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| AppError::Config(format!("Invalid {key} '{value}': {e}")))
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("recipient", &self.recipient)
            .field("transfer_amount", &self.transfer_amount)
            .field("confirmation_timeout", &self.confirmation_timeout)
            .field("poll_interval", &self.poll_interval)
            .field("log_level", &self.log_level)
            .finish()
    }
}
