//! Transaction submission service.

use alloy::primitives::U256;
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::{ChainRpc, WalletManager},
    services::ConfirmationPoller,
    types::{format_ether, Confirmation, GasPrice, Submission, TxParams},
};

/// Value plus the maximum fee the sender reserves: `value + gas_limit * gas_price`.
pub fn total_cost(value: U256, gas_limit: u64, gas_price: u128) -> Result<U256> {
    U256::from(gas_limit)
        .checked_mul(U256::from(gas_price))
        .and_then(|fee| fee.checked_add(value))
        .ok_or_else(|| {
            AppError::NumericOverflow(format!(
                "value {} + {} gas at {} wei exceeds U256",
                value, gas_limit, gas_price
            ))
        })
}

/// Builds, signs, and submits transactions for one sender.
#[derive(Clone)]
pub struct TransactionSubmitter {
    rpc: Arc<dyn ChainRpc>,
    wallet: WalletManager,
    poller: ConfirmationPoller,
}

impl TransactionSubmitter {
    /// Create a new submitter.
    pub fn new(rpc: Arc<dyn ChainRpc>, wallet: WalletManager, poller: ConfirmationPoller) -> Self {
        Self { rpc, wallet, poller }
    }

    /// The sending wallet.
    pub fn wallet(&self) -> &WalletManager {
        &self.wallet
    }

    /// Sign and broadcast a transaction, returning as soon as the node accepts it.
    ///
    /// The balance check runs before anything is signed or sent, so an
    /// [`AppError::InsufficientFunds`] failure never reaches the network.
    pub async fn submit(&self, params: TxParams) -> Result<Submission> {
        let from = self.wallet.address();

        tracing::info!(
            from = %from,
            to = ?params.to,
            value = %params.value,
            gas_limit = params.gas_limit,
            create = params.is_create(),
            "Preparing transaction"
        );

        let nonce = self.rpc.pending_nonce(from).await?;

        let gas_price = match params.gas_price {
            GasPrice::Fixed(price) => price,
            GasPrice::Suggested => {
                let price = self.rpc.gas_price().await?;
                tracing::debug!(gas_price = price, "Using suggested gas price");
                price
            }
        };

        let total_cost = total_cost(params.value, params.gas_limit, gas_price)?;

        let balance = self.rpc.balance(from).await?;
        if balance < total_cost {
            tracing::warn!(
                address = %from,
                required = %total_cost,
                available = %balance,
                "Insufficient funds"
            );
            return Err(AppError::InsufficientFunds {
                address: from,
                required: total_cost,
                available: balance,
            });
        }

        let chain_id = self.rpc.chain_id().await?;
        let signed = self.wallet.sign_transaction(&params, nonce, gas_price, chain_id)?;

        let returned_hash = self.rpc.send_raw_transaction(signed.raw().clone()).await?;
        if returned_hash != signed.hash() {
            tracing::warn!(
                local = %signed.hash(),
                node = %returned_hash,
                "Node returned a different transaction hash"
            );
        }

        tracing::info!(
            tx_hash = %signed.hash(),
            nonce,
            chain_id,
            gas_price,
            total_cost = %format_ether(total_cost),
            "Transaction sent"
        );

        Ok(Submission {
            tx_hash: signed.hash(),
            from,
            to: params.to,
            nonce,
            chain_id,
            value: params.value,
            gas_limit: params.gas_limit,
            gas_price,
            total_cost,
        })
    }

    /// Submit a transaction and block until its receipt confirms success.
    pub async fn submit_and_confirm(&self, params: TxParams) -> Result<Confirmation> {
        let submission = self.submit(params).await?;
        let receipt = self.poller.wait_for_receipt(submission.tx_hash).await?;
        Ok(Confirmation { submission, receipt })
    }
}

impl std::fmt::Debug for TransactionSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionSubmitter")
            .field("wallet", &self.wallet)
            .field("poller", &self.poller)
            .finish()
    }
}
