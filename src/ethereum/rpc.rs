//! Node access abstraction.
//!
//! Services talk to the chain only through [`ChainRpc`], so they can run
//! against a live node or an in-memory double.

use alloy::primitives::{Address, BlockHash, Bytes, TxHash, U256};
use async_trait::async_trait;

use crate::{error::Result, types::ReceiptInfo};

/// The fields of a block the tool reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSnapshot {
    /// Block number.
    pub number: u64,
    /// Block timestamp (Unix seconds).
    pub timestamp: u64,
    /// Difficulty.
    pub difficulty: U256,
    /// Block hash.
    pub hash: BlockHash,
    /// Number of transactions in the body.
    pub transaction_count: usize,
}

/// JSON-RPC operations used by the submitter and query services.
///
/// Implementations must not retry: a failed call surfaces as an error.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Chain identifier used for replay protection.
    async fn chain_id(&self) -> Result<u64>;

    /// Number of the latest block.
    async fn latest_block_number(&self) -> Result<u64>;

    /// Block by number, if the node knows it.
    async fn block_by_number(&self, number: u64) -> Result<Option<BlockSnapshot>>;

    /// Transaction count of a block, by hash.
    async fn block_transaction_count(&self, hash: BlockHash) -> Result<Option<u64>>;

    /// Next nonce for `address`, counting pending transactions.
    async fn pending_nonce(&self, address: Address) -> Result<u64>;

    /// Balance of `address` at the latest block, in wei.
    async fn balance(&self, address: Address) -> Result<U256>;

    /// The node's suggested gas price, in wei.
    async fn gas_price(&self) -> Result<u128>;

    /// Broadcast a signed transaction.
    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash>;

    /// Receipt for `hash`, or `None` while the transaction is unmined.
    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<ReceiptInfo>>;

    /// Execute a read-only call against the latest state.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes>;
}
