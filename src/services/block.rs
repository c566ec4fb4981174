//! Block and account query service.

use alloy::primitives::Address;
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::{BlockSnapshot, ChainRpc},
    types::{format_ether, BalanceInfo, BlockInfo},
};

/// Service for read-only chain queries.
#[derive(Clone)]
pub struct BlockService {
    rpc: Arc<dyn ChainRpc>,
}

impl BlockService {
    /// Create a new block service.
    pub fn new(rpc: Arc<dyn ChainRpc>) -> Self {
        Self { rpc }
    }

    /// Describe the latest block.
    pub async fn latest_block_info(&self) -> Result<BlockInfo> {
        let number = self.rpc.latest_block_number().await?;
        tracing::debug!(number, "Latest block number");
        self.block_info(number).await
    }

    /// Describe block `number`.
    ///
    /// Reports both the body's transaction count and the count returned by
    /// `eth_getBlockTransactionCountByHash`.
    pub async fn block_info(&self, number: u64) -> Result<BlockInfo> {
        let BlockSnapshot { number, timestamp, difficulty, hash, transaction_count } = self
            .rpc
            .block_by_number(number)
            .await?
            .ok_or_else(|| AppError::Rpc(format!("Block {} not found", number)))?;

        let reported_transaction_count = self.rpc.block_transaction_count(hash).await?;

        if reported_transaction_count.is_some_and(|c| c as usize != transaction_count) {
            tracing::warn!(
                number,
                body = transaction_count,
                reported = ?reported_transaction_count,
                "Transaction counts disagree"
            );
        }

        Ok(BlockInfo {
            number,
            timestamp,
            difficulty: difficulty.to_string(),
            hash: format!("{hash:?}"),
            transaction_count,
            reported_transaction_count,
        })
    }

    /// Balance and pending nonce of `address`.
    pub async fn balance_info(&self, address: Address) -> Result<BalanceInfo> {
        tracing::debug!(address = %address, "Querying ETH balance");

        let balance = self.rpc.balance(address).await?;
        let pending_nonce = self.rpc.pending_nonce(address).await?;

        Ok(BalanceInfo {
            address: format!("{address:?}"),
            balance: format_ether(balance),
            balance_raw: balance.to_string(),
            pending_nonce,
        })
    }
}
