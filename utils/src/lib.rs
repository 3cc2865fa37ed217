//! Shared utilities for the accrue staking ledger.

pub mod logging;

pub use logging::{init_logging, LogFormat};
