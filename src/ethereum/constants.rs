//! Ethereum network constants.
//!
//! Contains chain IDs and default gas limits.

// ============================================================================
// Chain IDs
// ============================================================================

/// Ethereum Mainnet chain ID.
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// Sepolia testnet chain ID.
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

// ============================================================================
// Gas Limits
// ============================================================================

/// Intrinsic gas of a plain value transfer.
pub const TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Default gas limit for contract deployment.
pub const DEPLOY_GAS_LIMIT: u64 = 300_000;

/// Default gas limit for a state-changing contract call.
pub const CALL_GAS_LIMIT: u64 = 100_000;

/// Human-readable name for well-known chain IDs.
pub fn chain_name(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        ETHEREUM_MAINNET_CHAIN_ID => Some("mainnet"),
        SEPOLIA_CHAIN_ID => Some("sepolia"),
        _ => None,
    }
}
