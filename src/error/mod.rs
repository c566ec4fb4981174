//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions.

use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Sender cannot cover value plus the maximum fee.
    #[error("Insufficient funds for {address}: need {required} wei, have {available} wei")]
    InsufficientFunds { address: Address, required: U256, available: U256 },

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Transaction signing failed.
    #[error("Signing failed: {0}")]
    Signing(String),

    /// The transaction was mined but its receipt reports failure.
    #[error("Transaction {tx_hash} reverted in block {block_number:?}")]
    TransactionRejected { tx_hash: TxHash, block_number: Option<u64> },

    /// A creation receipt came back without a contract address.
    #[error("Receipt for {0} has no contract address")]
    MissingContractAddress(TxHash),

    /// No receipt appeared before the polling deadline.
    #[error("Transaction {tx_hash} not confirmed within {waited:?}")]
    ConfirmationTimeout { tx_hash: TxHash, waited: Duration },

    /// The operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric overflow during conversion.
    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),
}

impl AppError {
    /// Whether the failure came from talking to the node rather than from
    /// the transaction itself.
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Rpc(_) | AppError::Transport(_))
    }

    /// Process exit status the CLI reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_)
            | AppError::InvalidAddress(_)
            | AppError::Parse(_)
            | AppError::Wallet(_) => 2,
            AppError::InsufficientFunds { .. } => 3,
            AppError::TransactionRejected { .. } => 4,
            AppError::ConfirmationTimeout { .. } | AppError::Cancelled => 5,
            _ => 1,
        }
    }
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::signers::Error> for AppError {
    fn from(err: alloy::signers::Error) -> Self {
        AppError::Signing(err.to_string())
    }
}

impl From<alloy::sol_types::Error> for AppError {
    fn from(err: alloy::sol_types::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
