//! Abstract storage traits for the accrue staking ledger.
//!
//! Any durable backend implements these traits; the ledger depends only on
//! the traits and serializes its own records.

pub mod batch;
pub mod error;
pub mod ledger;

pub use batch::WriteBatch;
pub use error::StoreError;
pub use ledger::LedgerStore;
