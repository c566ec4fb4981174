//! Ethereum RPC client.

use alloy::{
    eips::BlockNumberOrTag,
    network::{Ethereum, ReceiptResponse},
    primitives::{Address, BlockHash, Bytes, TxHash, U256, U64},
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::{
    constants::chain_name,
    rpc::{BlockSnapshot, ChainRpc},
};
use crate::{
    error::{AppError, Result},
    types::ReceiptInfo,
};

type HttpProvider = RootProvider<Ethereum>;

/// Ethereum RPC client wrapper with lazy initialization.
#[derive(Clone)]
pub struct EthereumClient {
    /// The underlying provider.
    provider: Arc<HttpProvider>,
    /// RPC URL for logging.
    rpc_url: String,
    /// Lazily initialized chain ID.
    chain_id: Arc<OnceCell<u64>>,
}

impl EthereumClient {
    /// Create a new Ethereum client.
    ///
    /// Note: This does NOT make any network calls. The connection is
    /// established lazily when the first operation is performed.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        #[allow(deprecated)]
        let provider = ProviderBuilder::new().connect_http(url).root().clone();

        tracing::info!(rpc_url = %rpc_url, "Ethereum client created (lazy initialization)");

        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: rpc_url.to_string(),
            chain_id: Arc::new(OnceCell::new()),
        })
    }

    /// The endpoint this client talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

impl std::fmt::Debug for EthereumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumClient")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id.get())
            .finish()
    }
}

#[async_trait]
impl ChainRpc for EthereumClient {
    /// Get the chain ID (fetches from network on first call).
    async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| async {
                let chain_id = self.provider.get_chain_id().await?;
                tracing::info!(
                    chain_id = chain_id,
                    network = chain_name(chain_id).unwrap_or("unknown"),
                    rpc_url = %self.rpc_url,
                    "Connected to Ethereum node"
                );
                Ok(chain_id)
            })
            .await
            .copied()
    }

    async fn latest_block_number(&self) -> Result<u64> {
        let number = self.provider.get_block_number().await?;
        Ok(number)
    }

    async fn block_by_number(&self, number: u64) -> Result<Option<BlockSnapshot>> {
        let block = self.provider.get_block_by_number(BlockNumberOrTag::Number(number)).await?;

        Ok(block.map(|block| BlockSnapshot {
            number: block.header.number,
            timestamp: block.header.timestamp,
            difficulty: block.header.difficulty,
            hash: block.header.hash,
            transaction_count: block.transactions.len(),
        }))
    }

    async fn block_transaction_count(&self, hash: BlockHash) -> Result<Option<u64>> {
        let count: Option<U64> = self
            .provider
            .raw_request("eth_getBlockTransactionCountByHash".into(), (hash,))
            .await?;
        Ok(count.map(|c| c.to::<u64>()))
    }

    async fn pending_nonce(&self, address: Address) -> Result<u64> {
        let nonce = self.provider.get_transaction_count(address).pending().await?;
        Ok(nonce)
    }

    async fn balance(&self, address: Address) -> Result<U256> {
        let balance = self.provider.get_balance(address).await?;
        Ok(balance)
    }

    async fn gas_price(&self) -> Result<u128> {
        let gas_price = self.provider.get_gas_price().await?;
        Ok(gas_price)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash> {
        let pending = self.provider.send_raw_transaction(&raw).await?;
        Ok(*pending.tx_hash())
    }

    async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<ReceiptInfo>> {
        let receipt = self.provider.get_transaction_receipt(hash).await?;

        Ok(receipt.map(|receipt| ReceiptInfo {
            tx_hash: receipt.transaction_hash(),
            success: receipt.status(),
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
            contract_address: receipt.contract_address(),
        }))
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let tx = TransactionRequest::default().to(to).input(data.into());
        let result = self.provider.call(tx).await?;
        Ok(result)
    }
}
