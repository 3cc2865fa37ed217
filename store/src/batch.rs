//! Write batching: groups account and meta writes so a backend can apply
//! them as one unit.

use accrue_types::AccountId;

/// Writes applied all-or-nothing by [`crate::LedgerStore::commit`].
///
/// Deletions are applied before puts, so an id that is both deleted and put
/// ends up present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    accounts: Vec<(AccountId, Vec<u8>)>,
    deleted: Vec<AccountId>,
    meta: Vec<(Vec<u8>, Vec<u8>)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_account(&mut self, id: &AccountId, record: Vec<u8>) {
        self.accounts.push((id.clone(), record));
    }

    pub fn delete_account(&mut self, id: &AccountId) {
        self.deleted.push(id.clone());
    }

    pub fn put_meta(&mut self, key: &[u8], value: Vec<u8>) {
        self.meta.push((key.to_vec(), value));
    }

    pub fn accounts(&self) -> &[(AccountId, Vec<u8>)] {
        &self.accounts
    }

    pub fn deleted(&self) -> &[AccountId] {
        &self.deleted
    }

    pub fn meta(&self) -> &[(Vec<u8>, Vec<u8>)] {
        &self.meta
    }

    /// Total number of queued writes.
    pub fn len(&self) -> usize {
        self.accounts.len() + self.deleted.len() + self.meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_counts_every_queued_write() {
        let mut batch = WriteBatch::new();
        assert!(batch.is_empty());

        batch.put_account(&AccountId::from("alice"), vec![1]);
        batch.delete_account(&AccountId::from("bob"));
        batch.put_meta(b"global", vec![2]);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.deleted(), &[AccountId::from("bob")]);
        assert_eq!(batch.meta()[0].0, b"global".to_vec());
    }
}
