//! Counter contract deployment and calls.

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::{contracts::Counter, ChainRpc},
    services::TransactionSubmitter,
    types::{Confirmation, TxParams},
};

/// Service for the counter contract.
#[derive(Clone)]
pub struct CounterService {
    rpc: Arc<dyn ChainRpc>,
    submitter: TransactionSubmitter,
}

/// A confirmed counter deployment.
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Address of the new contract.
    pub address: Address,
    /// The confirmed creation transaction.
    pub confirmation: Confirmation,
}

impl CounterService {
    /// Create a new counter service.
    pub fn new(rpc: Arc<dyn ChainRpc>, submitter: TransactionSubmitter) -> Self {
        Self { rpc, submitter }
    }

    /// Creation transaction for the counter, with default gas settings.
    pub fn deploy_params() -> TxParams {
        TxParams::deploy(Counter::BYTECODE.clone())
    }

    /// `increment()` transaction against `contract`, with default gas settings.
    pub fn increment_params(contract: Address) -> TxParams {
        TxParams::call(contract, Bytes::from(Counter::incrementCall {}.abi_encode()))
    }

    /// Deploy the counter and wait for the creation receipt.
    pub async fn deploy(&self, params: TxParams) -> Result<Deployment> {
        if !params.is_create() {
            return Err(AppError::InvalidAddress(
                "contract creation cannot have a recipient".into(),
            ));
        }

        let confirmation = self.submitter.submit_and_confirm(params).await?;
        let address = confirmation
            .receipt
            .contract_address
            .ok_or(AppError::MissingContractAddress(confirmation.submission.tx_hash))?;

        tracing::info!(
            contract = %address,
            tx_hash = %confirmation.submission.tx_hash,
            "Counter deployed"
        );

        Ok(Deployment { address, confirmation })
    }

    /// Call `increment()` and wait for the receipt.
    pub async fn increment(&self, params: TxParams) -> Result<Confirmation> {
        let confirmation = self.submitter.submit_and_confirm(params).await?;
        tracing::info!(contract = ?confirmation.submission.to, "Counter incremented");
        Ok(confirmation)
    }

    /// Read the current count without sending a transaction.
    pub async fn count(&self, contract: Address) -> Result<U256> {
        let data = Bytes::from(Counter::countCall {}.abi_encode());
        let output = self.rpc.call(contract, data).await?;

        if output.is_empty() {
            return Err(AppError::Rpc(format!("No contract code at {}", contract)));
        }

        let count = Counter::countCall::abi_decode_returns(&output)?;
        tracing::debug!(contract = %contract, count = %count, "Counter read");
        Ok(count)
    }
}
