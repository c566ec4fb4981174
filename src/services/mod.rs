//! Business logic services module.

pub mod block;
pub mod confirmation;
pub mod counter;
pub mod submitter;

pub use block::BlockService;
pub use confirmation::{ConfirmationPoller, PollPolicy};
pub use counter::{CounterService, Deployment};
pub use submitter::{total_cost, TransactionSubmitter};
