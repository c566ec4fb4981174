//! Ethereum interaction module.
//!
//! Contains the RPC abstraction, the Ethereum client, wallet management, and
//! contract bindings.

pub mod client;
pub mod constants;
pub mod contracts;
pub mod rpc;
pub mod wallet;

pub use client::EthereumClient;
pub use rpc::{BlockSnapshot, ChainRpc};
pub use wallet::{SignedTransaction, WalletManager};
