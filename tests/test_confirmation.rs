//! Integration tests for receipt polling.
//!
//! Run with: `cargo test --test test_confirmation`

mod common;

use std::{sync::Arc, time::Duration};

use alloy::primitives::{b256, TxHash};
use common::{MockChain, ReceiptStep};
use sepolia_tx_runner::{AppError, ChainRpc, ConfirmationPoller, PollPolicy};
use tokio_test::{assert_err, assert_ok};

const TX: TxHash = b256!("1111111111111111111111111111111111111111111111111111111111111111");

fn poller(chain: &Arc<MockChain>, policy: PollPolicy) -> ConfirmationPoller {
    let rpc: Arc<dyn ChainRpc> = chain.clone();
    ConfirmationPoller::new(rpc, policy)
}

/// Polling continues through pending answers until the receipt appears.
#[tokio::test]
async fn test_receipt_after_pending_polls() {
    let chain = Arc::new(MockChain::new().with_receipts([
        ReceiptStep::Pending,
        ReceiptStep::Pending,
        ReceiptStep::Mined { success: true, contract_address: None },
    ]));

    let receipt = assert_ok!(poller(&chain, common::fast_policy()).wait_for_receipt(TX).await);

    assert_eq!(receipt.tx_hash, TX);
    assert!(receipt.success);
    assert!(receipt.block_number.is_some());
    assert_eq!(chain.receipt_queries(), 3);
}

/// A failed status is a transaction failure, not a network failure.
#[tokio::test]
async fn test_failed_receipt_is_rejected() {
    let chain = Arc::new(
        MockChain::new()
            .with_receipts([ReceiptStep::Mined { success: false, contract_address: None }]),
    );

    let err = assert_err!(poller(&chain, common::fast_policy()).wait_for_receipt(TX).await);

    match &err {
        AppError::TransactionRejected { tx_hash, block_number } => {
            assert_eq!(*tx_hash, TX);
            assert!(block_number.is_some());
        }
        other => panic!("Expected TransactionRejected, got {:?}", other),
    }
    assert!(!err.is_network());
    assert_eq!(err.exit_code(), 4);
}

/// A transaction that never mines ends in a timeout after several polls.
#[tokio::test]
async fn test_never_mined_times_out() {
    let chain = Arc::new(MockChain::new());
    let policy = PollPolicy::new(Duration::from_millis(5), Duration::from_millis(60));

    let err = assert_err!(poller(&chain, policy).wait_for_receipt(TX).await);

    match err {
        AppError::ConfirmationTimeout { tx_hash, waited } => {
            assert_eq!(tx_hash, TX);
            assert_eq!(waited, Duration::from_millis(60));
        }
        other => panic!("Expected ConfirmationTimeout, got {:?}", other),
    }
    assert!(chain.receipt_queries() > 1);
}

/// The interval, not the deadline, paces the queries.
#[tokio::test(start_paused = true)]
async fn test_poll_interval_paces_queries() {
    let chain = Arc::new(MockChain::new());
    let policy = PollPolicy::new(Duration::from_secs(2), Duration::from_secs(119));

    let err = assert_err!(poller(&chain, policy).wait_for_receipt(TX).await);

    assert!(matches!(err, AppError::ConfirmationTimeout { .. }));
    // t = 0, 2, ..., 118
    assert_eq!(chain.receipt_queries(), 60);
}

/// An RPC error stops polling immediately.
#[tokio::test]
async fn test_rpc_error_ends_polling() {
    let chain = Arc::new(MockChain::new().with_receipts([
        ReceiptStep::Pending,
        ReceiptStep::Error("upstream unavailable".to_string()),
        ReceiptStep::Mined { success: true, contract_address: None },
    ]));

    let err = assert_err!(poller(&chain, common::fast_policy()).wait_for_receipt(TX).await);

    assert!(err.is_network());
    assert_eq!(chain.receipt_queries(), 2);
}

/// Dropping the wait stops further queries.
#[tokio::test]
async fn test_dropped_wait_stops_polling() {
    let chain = Arc::new(MockChain::new());
    let policy = PollPolicy::new(Duration::from_millis(5), Duration::from_secs(60));
    let poller = poller(&chain, policy);

    let waited = tokio::time::timeout(Duration::from_millis(30), poller.wait_for_receipt(TX)).await;
    assert!(waited.is_err());

    let queries = chain.receipt_queries();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(chain.receipt_queries(), queries);
}
