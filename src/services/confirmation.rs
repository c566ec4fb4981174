//! Receipt polling.

use std::{sync::Arc, time::Duration};

use alloy::primitives::TxHash;
use tokio::time::{sleep, timeout, Instant};

use crate::{
    config::{Config, DEFAULT_CONFIRMATION_TIMEOUT, DEFAULT_POLL_INTERVAL},
    error::{AppError, Result},
    ethereum::ChainRpc,
    types::ReceiptInfo,
};

/// Fixed-interval polling with an overall deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between receipt queries.
    pub interval: Duration,
    /// Give up once this much time has passed.
    pub timeout: Duration,
}

impl PollPolicy {
    /// Create a policy from an interval and a deadline.
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Policy configured for this process.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.poll_interval, config.confirmation_timeout)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_CONFIRMATION_TIMEOUT)
    }
}

/// Waits for transactions to be mined.
#[derive(Clone)]
pub struct ConfirmationPoller {
    rpc: Arc<dyn ChainRpc>,
    policy: PollPolicy,
}

impl ConfirmationPoller {
    /// Create a new poller.
    pub fn new(rpc: Arc<dyn ChainRpc>, policy: PollPolicy) -> Self {
        Self { rpc, policy }
    }

    /// The policy this poller applies.
    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    /// Poll until `tx_hash` has a receipt.
    ///
    /// Fails with [`AppError::TransactionRejected`] if the receipt reports
    /// failure and [`AppError::ConfirmationTimeout`] once the deadline passes.
    /// RPC errors end the wait immediately. Dropping the returned future
    /// cancels polling.
    pub async fn wait_for_receipt(&self, tx_hash: TxHash) -> Result<ReceiptInfo> {
        let started = Instant::now();
        tracing::info!(
            tx_hash = %tx_hash,
            interval_ms = self.policy.interval.as_millis() as u64,
            timeout_secs = self.policy.timeout.as_secs(),
            "Waiting for receipt"
        );

        let receipt = timeout(self.policy.timeout, self.poll(tx_hash))
            .await
            .map_err(|_| AppError::ConfirmationTimeout { tx_hash, waited: self.policy.timeout })??;

        if !receipt.success {
            tracing::warn!(
                tx_hash = %tx_hash,
                block = ?receipt.block_number,
                gas_used = receipt.gas_used,
                "Transaction reverted"
            );
            return Err(AppError::TransactionRejected {
                tx_hash,
                block_number: receipt.block_number,
            });
        }

        tracing::info!(
            tx_hash = %tx_hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Transaction confirmed"
        );

        Ok(receipt)
    }

    async fn poll(&self, tx_hash: TxHash) -> Result<ReceiptInfo> {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            if let Some(receipt) = self.rpc.transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            tracing::debug!(tx_hash = %tx_hash, attempts, "Receipt not available yet");
            sleep(self.policy.interval).await;
        }
    }
}

impl std::fmt::Debug for ConfirmationPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationPoller").field("policy", &self.policy).finish()
    }
}
