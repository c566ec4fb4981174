//! Smart contract bindings.

pub mod counter;

pub use counter::Counter;
