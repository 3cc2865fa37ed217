use accrue_types::AccountId;

use crate::{StoreError, WriteBatch};

/// Store trait for persisting ledger state to durable storage.
///
/// Uses opaque `Vec<u8>` so the store doesn't depend on the `accrue-ledger`
/// crate. The ledger serializes/deserializes its own records and must encode
/// integers without precision loss.
///
/// All writes go through [`LedgerStore::commit`]. A backend must apply a
/// batch completely or not at all, so readers never see account records
/// from one save next to the global record of another.
pub trait LedgerStore {
    fn iter_accounts(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError>;
    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
