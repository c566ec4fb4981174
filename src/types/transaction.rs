//! Transaction-related types.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

use super::format_ether;
use crate::ethereum::constants::{CALL_GAS_LIMIT, DEPLOY_GAS_LIMIT, TRANSFER_GAS_LIMIT};

/// How the gas price of a transaction is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GasPrice {
    /// Ask the node for its suggested price at submission time.
    #[default]
    Suggested,
    /// Use a fixed price in wei.
    Fixed(u128),
}

/// Parameters for a transaction to be signed and submitted.
#[derive(Debug, Clone)]
pub struct TxParams {
    /// Recipient address (None for contract creation).
    pub to: Option<Address>,
    /// Value in wei.
    pub value: U256,
    /// Upper bound on gas units.
    pub gas_limit: u64,
    /// Gas price selection.
    pub gas_price: GasPrice,
    /// Contract bytecode or encoded call data.
    pub input: Bytes,
}

impl TxParams {
    /// A plain value transfer.
    pub fn transfer(to: Address, value: U256) -> Self {
        Self {
            to: Some(to),
            value,
            gas_limit: TRANSFER_GAS_LIMIT,
            gas_price: GasPrice::Suggested,
            input: Bytes::new(),
        }
    }

    /// A contract creation carrying `code` as init code.
    pub fn deploy(code: Bytes) -> Self {
        Self {
            to: None,
            value: U256::ZERO,
            gas_limit: DEPLOY_GAS_LIMIT,
            gas_price: GasPrice::Suggested,
            input: code,
        }
    }

    /// A state-changing call to `to` with ABI-encoded `data`.
    pub fn call(to: Address, data: Bytes) -> Self {
        Self {
            to: Some(to),
            value: U256::ZERO,
            gas_limit: CALL_GAS_LIMIT,
            gas_price: GasPrice::Suggested,
            input: data,
        }
    }

    /// Override the gas limit.
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Override the gas price selection.
    pub fn with_gas_price(mut self, gas_price: GasPrice) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Whether this transaction creates a contract.
    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }
}

/// Outcome of a mined transaction as reported by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptInfo {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Whether execution succeeded.
    pub success: bool,
    /// Block the transaction was included in.
    pub block_number: Option<u64>,
    /// Gas consumed by execution.
    pub gas_used: u64,
    /// Address of the created contract, for deployments.
    pub contract_address: Option<Address>,
}

/// A transaction that was signed and accepted by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Transaction hash.
    pub tx_hash: TxHash,
    /// Sender address.
    pub from: Address,
    /// Recipient address (None for contract creation).
    pub to: Option<Address>,
    /// Nonce consumed by this transaction.
    pub nonce: u64,
    /// Chain the signature is bound to.
    pub chain_id: u64,
    /// Value in wei.
    pub value: U256,
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas price in wei.
    pub gas_price: u128,
    /// Value plus maximum fee, in wei.
    pub total_cost: U256,
}

impl Submission {
    /// Serializable summary.
    pub fn report(&self) -> SubmissionReport {
        SubmissionReport::from(self)
    }
}

/// A submission together with its successful receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// The submitted transaction.
    pub submission: Submission,
    /// The receipt the node produced for it.
    pub receipt: ReceiptInfo,
}

impl Confirmation {
    /// Serializable summary.
    pub fn report(&self) -> ConfirmationReport {
        ConfirmationReport {
            submission: self.submission.report(),
            block_number: self.receipt.block_number,
            gas_used: self.receipt.gas_used,
            contract_address: self.receipt.contract_address.map(|a| format!("{a:?}")),
        }
    }
}

/// Summary of a submitted (not yet confirmed) transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReport {
    /// Transaction hash.
    pub tx_hash: String,
    /// Sender address.
    pub from: String,
    /// Recipient address (absent for contract creation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Nonce consumed by this transaction.
    pub nonce: u64,
    /// Chain the signature is bound to.
    pub chain_id: u64,
    /// Value in ETH (human-readable).
    pub value: String,
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas price in wei.
    pub gas_price: String,
    /// Value plus maximum fee, in wei.
    pub total_cost_raw: String,
    /// Value plus maximum fee, in ETH.
    pub total_cost: String,
}

impl From<&Submission> for SubmissionReport {
    fn from(submission: &Submission) -> Self {
        Self {
            tx_hash: format!("{:?}", submission.tx_hash),
            from: format!("{:?}", submission.from),
            to: submission.to.map(|a| format!("{a:?}")),
            nonce: submission.nonce,
            chain_id: submission.chain_id,
            value: format_ether(submission.value),
            gas_limit: submission.gas_limit,
            gas_price: submission.gas_price.to_string(),
            total_cost_raw: submission.total_cost.to_string(),
            total_cost: format_ether(submission.total_cost),
        }
    }
}

/// Summary of a confirmed transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationReport {
    /// The submission this confirmation belongs to.
    #[serde(flatten)]
    pub submission: SubmissionReport,
    /// Block the transaction was included in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Gas consumed by execution.
    pub gas_used: u64,
    /// Address of the created contract, for deployments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
}
