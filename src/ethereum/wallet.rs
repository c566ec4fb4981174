//! Wallet management and transaction signing.

use alloy::{
    consensus::{SignableTransaction, TxEnvelope, TxLegacy},
    eips::eip2718::Encodable2718,
    network::TxSignerSync,
    primitives::{Address, Bytes, TxHash, TxKind},
    signers::local::PrivateKeySigner,
};

use crate::{error::Result, types::TxParams};

/// A signed transaction ready for broadcast.
///
/// Immutable once built: the hash and raw encoding are fixed by the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    hash: TxHash,
    raw: Bytes,
    nonce: u64,
    chain_id: u64,
}

impl SignedTransaction {
    /// Transaction hash.
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// EIP-2718 encoded bytes for `eth_sendRawTransaction`.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Nonce the signature covers.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Chain the signature is bound to.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

/// Wallet manager for transaction signing.
#[derive(Clone)]
pub struct WalletManager {
    /// The local signer.
    signer: PrivateKeySigner,
    /// Wallet address.
    address: Address,
}

impl WalletManager {
    /// Create a wallet manager from a private key string.
    pub fn from_private_key(private_key: &str) -> Result<Self> {
        let key = private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);

        let signer: PrivateKeySigner = key.parse()?;

        let address = signer.address();

        tracing::info!(address = %address, "Wallet initialized");

        Ok(Self { signer, address })
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign `params` as an EIP-155 legacy transaction.
    ///
    /// Signing is deterministic (RFC 6979): identical inputs produce an
    /// identical hash.
    pub fn sign_transaction(
        &self,
        params: &TxParams,
        nonce: u64,
        gas_price: u128,
        chain_id: u64,
    ) -> Result<SignedTransaction> {
        let mut tx = TxLegacy {
            chain_id: Some(chain_id),
            nonce,
            gas_price,
            gas_limit: params.gas_limit,
            to: params.to.map_or(TxKind::Create, TxKind::Call),
            value: params.value,
            input: params.input.clone(),
        };

        let signature = self.signer.sign_transaction_sync(&mut tx)?;
        let signed = tx.into_signed(signature);
        let hash = *signed.hash();
        let raw = TxEnvelope::from(signed).encoded_2718();

        tracing::debug!(tx_hash = %hash, nonce, chain_id, "Transaction signed");

        Ok(SignedTransaction { hash, raw: raw.into(), nonce, chain_id })
    }
}

impl std::fmt::Debug for WalletManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletManager").field("address", &self.address).finish()
    }
}
