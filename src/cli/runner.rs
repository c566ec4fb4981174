//! Command execution.

use std::sync::Arc;

use alloy::primitives::Address;
use serde::Serialize;

use super::{Command, GasArgs, SendArgs};
use crate::{
    config::Config,
    error::{AppError, Result},
    ethereum::{ChainRpc, EthereumClient, WalletManager},
    services::{
        BlockService, ConfirmationPoller, CounterService, PollPolicy, TransactionSubmitter,
    },
    types::{parse_ether, GasPrice, TxParams},
};

/// Wires configuration, wallet, and services together and executes commands.
///
/// Every command returns its result as pretty-printed JSON.
#[derive(Clone)]
pub struct TxRunner {
    config: Config,
    block_service: BlockService,
    submitter: TransactionSubmitter,
    counter_service: CounterService,
}

/// Parse and validate an Ethereum address from a string.
///
/// Accepts `0x` + 40 hex characters; mixed-case input is not checksum-verified.
pub fn parse_address(s: &str) -> Result<Address> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(AppError::InvalidAddress("Address cannot be empty".into()));
    }

    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(AppError::InvalidAddress(format!("Address must start with '0x': {}", s)));
    }

    if trimmed.len() != 42 {
        return Err(AppError::InvalidAddress(format!(
            "Address must be 42 characters (0x + 40 hex chars), got {}: {}",
            trimmed.len(),
            s
        )));
    }

    trimmed
        .parse::<Address>()
        .map_err(|e| AppError::InvalidAddress(format!("Invalid address format '{}': {}", s, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Parse(e.to_string()))
}

fn apply_gas(params: TxParams, gas: &GasArgs) -> TxParams {
    let params = match gas.gas_limit {
        Some(limit) => params.with_gas_limit(limit),
        None => params,
    };
    match gas.gas_price {
        Some(price) => params.with_gas_price(GasPrice::Fixed(price)),
        None => params,
    }
}

impl TxRunner {
    /// Create a runner backed by the configured RPC endpoint.
    ///
    /// No network calls are made until a command runs.
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(EthereumClient::new(&config.rpc_url)?);
        Self::with_rpc(config, client)
    }

    /// Create a runner backed by an arbitrary [`ChainRpc`].
    pub fn with_rpc(config: Config, rpc: Arc<dyn ChainRpc>) -> Result<Self> {
        let wallet = WalletManager::from_private_key(&config.private_key)?;
        let poller = ConfirmationPoller::new(rpc.clone(), PollPolicy::from_config(&config));
        let submitter = TransactionSubmitter::new(rpc.clone(), wallet, poller);
        let block_service = BlockService::new(rpc.clone());
        let counter_service = CounterService::new(rpc, submitter.clone());

        Ok(Self { config, block_service, submitter, counter_service })
    }

    /// Address transactions are sent from.
    pub fn sender(&self) -> Address {
        self.submitter.wallet().address()
    }

    /// Execute one command.
    pub async fn run(&self, command: Command) -> Result<String> {
        tracing::debug!(command = ?command, "Running command");

        match command {
            Command::Block { number } => self.block(number).await,
            Command::Balance { address } => self.balance(address.as_deref()).await,
            Command::Send(args) => self.send(&args).await,
            Command::Deploy(gas) => self.deploy(&gas).await,
            Command::Increment { contract, gas } => self.increment(&contract, &gas).await,
            Command::Count { contract } => self.count(&contract).await,
        }
    }

    /// Describe the latest block or block `number`.
    pub async fn block(&self, number: Option<u64>) -> Result<String> {
        let info = match number {
            Some(number) => self.block_service.block_info(number).await?,
            None => self.block_service.latest_block_info().await?,
        };
        to_json(&info)
    }

    /// Balance of `address`, or of the sender.
    pub async fn balance(&self, address: Option<&str>) -> Result<String> {
        let address = address.map(parse_address).transpose()?.unwrap_or_else(|| self.sender());
        to_json(&self.block_service.balance_info(address).await?)
    }

    /// Transfer ETH, optionally waiting for the receipt.
    pub async fn send(&self, args: &SendArgs) -> Result<String> {
        let to = match &args.to {
            Some(to) => parse_address(to)?,
            None => self.config.recipient.ok_or_else(|| {
                AppError::Config("No recipient: pass --to or set RECIPIENT_ADDRESS".into())
            })?,
        };

        let value = match &args.amount {
            Some(amount) => parse_ether(amount).map_err(AppError::Parse)?,
            None => self.config.transfer_amount,
        };

        let params = apply_gas(TxParams::transfer(to, value), &args.gas);

        if args.wait {
            to_json(&self.submitter.submit_and_confirm(params).await?.report())
        } else {
            to_json(&self.submitter.submit(params).await?.report())
        }
    }

    /// Deploy the counter contract.
    pub async fn deploy(&self, gas: &GasArgs) -> Result<String> {
        let params = apply_gas(CounterService::deploy_params(), gas);
        let deployment = self.counter_service.deploy(params).await?;
        to_json(&deployment.confirmation.report())
    }

    /// Increment a deployed counter.
    pub async fn increment(&self, contract: &str, gas: &GasArgs) -> Result<String> {
        let contract = parse_address(contract)?;
        let params = apply_gas(CounterService::increment_params(contract), gas);
        to_json(&self.counter_service.increment(params).await?.report())
    }

    /// Read a deployed counter.
    pub async fn count(&self, contract: &str) -> Result<String> {
        let contract = parse_address(contract)?;
        let count = self.counter_service.count(contract).await?;
        to_json(&serde_json::json!({
            "contract": format!("{contract:?}"),
            "count": count.to_string(),
        }))
    }
}

impl std::fmt::Debug for TxRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxRunner")
            .field("config", &self.config)
            .field("submitter", &self.submitter)
            .finish()
    }
}
