//! Thread-safe handle to a single ledger.

use std::sync::{Arc, Mutex};

use crate::engine::Ledger;
use crate::error::LedgerError;

/// A cloneable handle serializing every operation on one [`Ledger`].
///
/// Each closure runs under the lock, so an operation is observed either
/// completely or not at all by other handles.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run a mutating operation under the lock.
    pub fn with<R>(
        &self,
        op: impl FnOnce(&mut Ledger) -> Result<R, LedgerError>,
    ) -> Result<R, LedgerError> {
        let mut guard = self.inner.lock().map_err(|_| LedgerError::LockPoisoned)?;
        op(&mut guard)
    }

    /// Run a read-only view under the lock.
    pub fn read<R>(&self, view: impl FnOnce(&Ledger) -> R) -> Result<R, LedgerError> {
        let guard = self.inner.lock().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(view(&guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_types::{AccountId, BlockHeight, LedgerParams};
    use std::thread;

    #[test]
    fn concurrent_transfers_conserve_supply() {
        let admin = AccountId::from("admin");
        let mut ledger = Ledger::new(admin.clone(), LedgerParams::default());
        for i in 0..4 {
            ledger
                .mint(&admin, &AccountId::new(format!("user{i}")), 1_000)
                .unwrap();
        }
        let shared = SharedLedger::new(ledger);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let me = AccountId::new(format!("user{i}"));
                    let next = AccountId::new(format!("user{}", (i + 1) % 4));
                    for _ in 0..50 {
                        shared
                            .with(|l| l.transfer(&me, &next, 3, None))
                            .unwrap();
                        // Height is read under the lock so threads never go back in time.
                        shared
                            .with(|l| {
                                let now = l.last_update_time().next();
                                l.stake(&me, 1, now)
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.read(|l| l.total_supply()).unwrap(), 4_000);
        assert_eq!(shared.read(|l| l.total_staked()).unwrap(), 200);
        assert_eq!(
            shared.read(|l| l.last_update_time()).unwrap(),
            BlockHeight::new(200)
        );
        shared.read(|l| l.audit()).unwrap().unwrap();
    }

    #[test]
    fn poisoned_lock_reported() {
        let shared = SharedLedger::new(Ledger::new("admin".into(), LedgerParams::default()));
        let poisoner = shared.clone();
        let _ = thread::spawn(move || {
            let _ = poisoner.with(|_| -> Result<(), LedgerError> { panic!("boom") });
        })
        .join();

        assert_eq!(
            shared.read(|l| l.total_supply()),
            Err(LedgerError::LockPoisoned)
        );
    }
}
