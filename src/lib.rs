//! Sepolia Transaction Runner Library
//!
//! Signs and submits transactions to an Ethereum-compatible test network,
//! verifying the sender can pay before anything is broadcast and polling for
//! receipts with an explicit deadline.
//!
//! # Features
//!
//! - **Block Queries**: Inspect the latest (or any) block
//! - **Transfers**: Send ETH with a pre-flight balance check
//! - **Counter Contract**: Deploy a minimal counter, increment it, read it
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sepolia_tx_runner::{
//!     Config, ConfirmationPoller, EthereumClient, PollPolicy, TransactionSubmitter, TxParams,
//!     WalletManager,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let rpc = Arc::new(EthereumClient::new(&config.rpc_url)?);
//!     let wallet = WalletManager::from_private_key(&config.private_key)?;
//!     let poller = ConfirmationPoller::new(rpc.clone(), PollPolicy::from_config(&config));
//!     let submitter = TransactionSubmitter::new(rpc, wallet, poller);
//!
//!     let recipient = config.recipient.expect("RECIPIENT_ADDRESS");
//!     let params = TxParams::transfer(recipient, config.transfer_amount);
//!     let confirmation = submitter.submit_and_confirm(params).await?;
//!     println!("{:?}", confirmation.submission.tx_hash);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod ethereum;
pub mod services;
pub mod types;

pub use cli::{Cli, Command, TxRunner};
pub use config::Config;
pub use error::{AppError, Result};
pub use ethereum::{ChainRpc, EthereumClient, SignedTransaction, WalletManager};
pub use services::{
    BlockService, ConfirmationPoller, CounterService, PollPolicy, TransactionSubmitter,
};
pub use types::{GasPrice, ReceiptInfo, TxParams};
