use thiserror::Error;

/// Failures reported by a [`crate::LedgerStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record the ledger needs is absent.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The backend refused or failed the operation.
    #[error("store backend failed: {0}")]
    Backend(String),

    /// A record could not be encoded for writing.
    #[error("could not encode record: {0}")]
    Serialization(String),

    /// A stored record could not be decoded or has an unknown layout.
    #[error("stored record is corrupt: {0}")]
    Corruption(String),
}
