//! Common utilities for integration tests.

#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
    time::Duration,
};

use alloy::{
    consensus::{Transaction, TxEnvelope},
    eips::eip2718::Decodable2718,
    primitives::{address, Address, BlockHash, Bytes, TxHash, U256},
};
use async_trait::async_trait;

use sepolia_tx_runner::{
    ethereum::BlockSnapshot, AppError, ChainRpc, Config, ConfirmationPoller, PollPolicy,
    ReceiptInfo, Result, TransactionSubmitter, TxRunner, WalletManager,
};

/// Well-known Hardhat/Foundry test key (DO NOT use in production!).
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address derived from [`TEST_PRIVATE_KEY`].
pub const TEST_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Default transfer recipient used across tests.
pub const RECIPIENT: Address = address!("5A0615f4091bc72a02b96568d7d7377885bD6eA0");

pub const ONE_ETH: u64 = 1_000_000_000_000_000_000;
pub const ONE_GWEI: u128 = 1_000_000_000;
pub const SEPOLIA: u64 = 11155111;

/// What the mock answers to the next receipt query.
#[derive(Debug, Clone)]
pub enum ReceiptStep {
    /// Not mined yet.
    Pending,
    /// Mined with the given status.
    Mined { success: bool, contract_address: Option<Address> },
    /// The node call fails.
    Error(String),
}

/// A transaction the mock accepted.
#[derive(Debug, Clone)]
pub struct SentTx {
    pub hash: TxHash,
    pub nonce: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub input: Bytes,
    pub chain_id: Option<u64>,
}

#[derive(Debug, Default)]
struct MockState {
    balance: U256,
    nonce: u64,
    gas_price: u128,
    receipt_plan: VecDeque<ReceiptStep>,
    receipt_queries: usize,
    sent: Vec<SentTx>,
    call_output: Bytes,
    calls: Vec<(Address, Bytes)>,
    fail_balance: Option<String>,
    fail_send: Option<String>,
    latest_block: u64,
    blocks: HashMap<u64, BlockSnapshot>,
    reported_counts: HashMap<BlockHash, u64>,
}

/// In-memory chain implementing [`ChainRpc`].
#[derive(Debug)]
pub struct MockChain {
    chain_id: u64,
    state: Mutex<MockState>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            chain_id: SEPOLIA,
            state: Mutex::new(MockState { gas_price: ONE_GWEI, ..Default::default() }),
        }
    }

    pub fn with_balance(self, balance: U256) -> Self {
        self.state.lock().unwrap().balance = balance;
        self
    }

    pub fn with_nonce(self, nonce: u64) -> Self {
        self.state.lock().unwrap().nonce = nonce;
        self
    }

    pub fn with_gas_price(self, gas_price: u128) -> Self {
        self.state.lock().unwrap().gas_price = gas_price;
        self
    }

    pub fn with_receipts(self, steps: impl IntoIterator<Item = ReceiptStep>) -> Self {
        self.state.lock().unwrap().receipt_plan.extend(steps);
        self
    }

    pub fn with_call_output(self, output: Bytes) -> Self {
        self.state.lock().unwrap().call_output = output;
        self
    }

    pub fn failing_balance(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_balance = Some(message.to_string());
        self
    }

    pub fn failing_send(self, message: &str) -> Self {
        self.state.lock().unwrap().fail_send = Some(message.to_string());
        self
    }

    pub fn with_block(self, block: BlockSnapshot, reported_count: Option<u64>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.latest_block = state.latest_block.max(block.number);
            if let Some(count) = reported_count {
                state.reported_counts.insert(block.hash, count);
            }
            state.blocks.insert(block.number, block);
        }
        self
    }

    pub fn sent(&self) -> Vec<SentTx> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn receipt_queries(&self) -> usize {
        self.state.lock().unwrap().receipt_queries
    }

    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainRpc for MockChain {
    async fn chain_id(&self) -> Result<u64> {
        Ok(self.chain_id)
    }

    async fn latest_block_number(&self) -> Result<u64> {
        Ok(self.state.lock().unwrap().latest_block)
    }

    async fn block_by_number(&self, number: u64) -> Result<Option<BlockSnapshot>> {
        Ok(self.state.lock().unwrap().blocks.get(&number).cloned())
    }

    async fn block_transaction_count(&self, hash: BlockHash) -> Result<Option<u64>> {
        Ok(self.state.lock().unwrap().reported_counts.get(&hash).copied())
    }

    async fn pending_nonce(&self, _address: Address) -> Result<u64> {
        Ok(self.state.lock().unwrap().nonce)
    }

    async fn balance(&self, _address: Address) -> Result<U256> {
        let state = self.state.lock().unwrap();
        match &state.fail_balance {
            Some(message) => Err(AppError::Transport(message.clone())),
            None => Ok(state.balance),
        }
    }

    async fn gas_price(&self) -> Result<u128> {
        Ok(self.state.lock().unwrap().gas_price)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.fail_send {
            return Err(AppError::Rpc(message.clone()));
        }

        let envelope = TxEnvelope::decode_2718(&mut raw.as_ref())
            .map_err(|e| AppError::Rpc(format!("rlp: {e}")))?;
        let hash = *envelope.tx_hash();

        state.sent.push(SentTx {
            hash,
            nonce: envelope.nonce(),
            to: envelope.to(),
            value: envelope.value(),
            gas_limit: envelope.gas_limit(),
            gas_price: envelope.gas_price().unwrap_or_default(),
            input: envelope.input().clone(),
            chain_id: envelope.chain_id(),
        });
        state.nonce += 1;

        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<ReceiptInfo>> {
        let mut state = self.state.lock().unwrap();
        state.receipt_queries += 1;

        match state.receipt_plan.pop_front().unwrap_or(ReceiptStep::Pending) {
            ReceiptStep::Pending => Ok(None),
            ReceiptStep::Error(message) => Err(AppError::Transport(message)),
            ReceiptStep::Mined { success, contract_address } => Ok(Some(ReceiptInfo {
                tx_hash: hash,
                success,
                block_number: Some(state.latest_block + 1),
                gas_used: 21_000,
                contract_address,
            })),
        }
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((to, data));
        Ok(state.call_output.clone())
    }
}

/// Poll policy short enough for tests.
pub fn fast_policy() -> PollPolicy {
    PollPolicy::new(Duration::from_millis(5), Duration::from_millis(500))
}

/// Submitter for the test key against `chain`.
pub fn submitter(chain: &Arc<MockChain>) -> TransactionSubmitter {
    submitter_with_policy(chain, fast_policy())
}

pub fn submitter_with_policy(chain: &Arc<MockChain>, policy: PollPolicy) -> TransactionSubmitter {
    let rpc: Arc<dyn ChainRpc> = chain.clone();
    let wallet = WalletManager::from_private_key(TEST_PRIVATE_KEY).unwrap();
    let poller = ConfirmationPoller::new(rpc.clone(), policy);
    TransactionSubmitter::new(rpc, wallet, poller)
}

/// Configuration for the test key with fast polling.
pub fn test_config(recipient: Option<Address>) -> Config {
    Config::from_vars(|key| match key {
        "SEPOLIA_RPC_URL" => Some("http://127.0.0.1:8545".to_string()),
        "PRIVATE_KEY" => Some(TEST_PRIVATE_KEY.to_string()),
        "RECIPIENT_ADDRESS" => recipient.map(|a| format!("{a:?}")),
        "POLL_INTERVAL_MS" => Some("5".to_string()),
        "CONFIRMATION_TIMEOUT_SECS" => Some("2".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Runner for the test key against `chain`.
pub fn runner(chain: &Arc<MockChain>, recipient: Option<Address>) -> TxRunner {
    TxRunner::with_rpc(test_config(recipient), chain.clone()).unwrap()
}

/// Helper to create a runner against a live node from environment variables.
pub fn create_live_runner() -> Option<TxRunner> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let rpc_url = std::env::var("SEPOLIA_RPC_URL").ok()?;
    let private_key = std::env::var("PRIVATE_KEY").ok()?;

    if rpc_url.is_empty() || private_key.is_empty() {
        return None;
    }

    let config = Config::from_vars(|key| match key {
        "SEPOLIA_RPC_URL" => Some(rpc_url.clone()),
        "PRIVATE_KEY" => Some(private_key.clone()),
        "LOG_LEVEL" => Some("warn".to_string()),
        _ => std::env::var(key).ok(),
    })
    .ok()?;

    TxRunner::new(config).ok()
}

/// Skip test if no live node is configured (missing env vars).
#[macro_export]
macro_rules! skip_if_no_network {
    () => {
        match common::create_live_runner() {
            Some(runner) => runner,
            None => {
                eprintln!("Skipping test: SEPOLIA_RPC_URL or PRIVATE_KEY not set");
                return;
            }
        }
    };
}
