//! Nullable store: thread-safe in-memory storage for testing.

use accrue_store::{LedgerStore, StoreError, WriteBatch};
use accrue_types::AccountId;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// An in-memory ledger store for testing.
///
/// Commits can be made to fail on demand to exercise error paths.
pub struct NullLedgerStore {
    accounts: Mutex<BTreeMap<AccountId, Vec<u8>>>,
    meta: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
    fail_commits: AtomicBool,
}

impl NullLedgerStore {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(BTreeMap::new()),
            meta: Mutex::new(BTreeMap::new()),
            fail_commits: AtomicBool::new(false),
        }
    }

    /// Number of persisted account records.
    pub fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }

    /// Make every subsequent commit fail with [`StoreError::Backend`]
    /// without writing anything.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

impl Default for NullLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for NullLedgerStore {
    fn iter_accounts(&self) -> Result<Vec<(AccountId, Vec<u8>)>, StoreError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .map(|(id, bytes)| (id.clone(), bytes.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("commit rejected by null store".into()));
        }

        // Both maps stay locked until the whole batch is applied.
        let mut accounts = self.accounts.lock().unwrap();
        let mut meta = self.meta.lock().unwrap();
        for id in batch.deleted() {
            accounts.remove(id);
        }
        for (id, record) in batch.accounts() {
            accounts.insert(id.clone(), record.clone());
        }
        for (key, value) in batch.meta() {
            meta.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
