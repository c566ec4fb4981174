//! Block and account query types.

use serde::{Deserialize, Serialize};

/// Block information response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block number.
    pub number: u64,
    /// Block timestamp (Unix seconds).
    pub timestamp: u64,
    /// Difficulty (zero after the merge).
    pub difficulty: String,
    /// Block hash.
    pub hash: String,
    /// Number of transactions in the block body.
    pub transaction_count: usize,
    /// Transaction count reported by `eth_getBlockTransactionCountByHash`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_transaction_count: Option<u64>,
}

/// Balance information response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceInfo {
    /// Account address.
    pub address: String,
    /// Human-readable balance in ETH.
    pub balance: String,
    /// Raw balance in wei.
    pub balance_raw: String,
    /// Next nonce including pending transactions.
    pub pending_nonce: u64,
}
