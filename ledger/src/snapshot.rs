//! Ledger snapshots and store persistence.
//!
//! A snapshot captures the complete ledger state at one height. Its hash is a
//! Blake2b-256 digest of the bincode-encoded body, so a reader can detect a
//! corrupted or tampered file before trusting it. Accounts are sorted by id
//! to keep the encoding (and therefore the hash) deterministic.

use std::collections::HashMap;

use accrue_store::{LedgerStore, StoreError, WriteBatch};
use accrue_types::{AccountId, RewardEmission, TokenMetadata, ZeroStakeAccrual};
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::engine::Ledger;
use crate::error::LedgerError;
use crate::state::GlobalState;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Meta key holding the global record in a [`LedgerStore`].
const GLOBAL_META_KEY: &[u8] = b"global";

/// A point-in-time capture of the whole ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 of the serialized body (every field below).
    pub hash: [u8; 32],
    pub version: u32,
    pub global: GlobalState,
    pub zero_stake_accrual: ZeroStakeAccrual,
    pub reward_emission: RewardEmission,
    pub metadata: TokenMetadata,
    /// Non-empty accounts, sorted by id.
    pub accounts: Vec<(AccountId, Account)>,
}

/// Everything in a snapshot except the accounts; stored under one meta key.
#[derive(Serialize, Deserialize)]
struct GlobalRecord {
    version: u32,
    global: GlobalState,
    zero_stake_accrual: ZeroStakeAccrual,
    reward_emission: RewardEmission,
    metadata: TokenMetadata,
}

impl LedgerSnapshot {
    fn compute_hash(&self) -> Result<[u8; 32], LedgerError> {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let body = bincode::serialize(&(
            self.version,
            &self.global,
            self.zero_stake_accrual,
            self.reward_emission,
            &self.metadata,
            &self.accounts,
        ))
        .map_err(|e| LedgerError::Snapshot(e.to_string()))?;

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(&body);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Ok(out)
    }

    /// Whether the stored hash matches the body.
    pub fn verify(&self) -> bool {
        matches!(self.compute_hash(), Ok(hash) if hash == self.hash)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Snapshot(e.to_string()))
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Hex form of the hash, for logs and CLI output.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

impl Ledger {
    /// Capture the current state as a hashed snapshot.
    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        let mut accounts: Vec<(AccountId, Account)> = self
            .accounts()
            .map(|(id, account)| (id.clone(), *account))
            .collect();
        accounts.sort_by(|a, b| a.0.cmp(&b.0));

        let mut snap = LedgerSnapshot {
            hash: [0u8; 32],
            version: SNAPSHOT_VERSION,
            global: self.global().clone(),
            zero_stake_accrual: self.zero_stake_accrual(),
            reward_emission: self.reward_emission(),
            metadata: self.metadata().clone(),
            accounts,
        };
        snap.hash = snap.compute_hash()?;
        Ok(snap)
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// Rejects unknown versions, hash mismatches and any snapshot whose
    /// contents fail [`Ledger::audit`].
    pub fn from_snapshot(snap: LedgerSnapshot) -> Result<Self, LedgerError> {
        if snap.version != SNAPSHOT_VERSION {
            return Err(LedgerError::Snapshot(format!(
                "unsupported snapshot version {}",
                snap.version
            )));
        }
        if !snap.verify() {
            return Err(LedgerError::Snapshot("snapshot hash mismatch".into()));
        }

        let accounts: HashMap<AccountId, Account> = snap
            .accounts
            .into_iter()
            .filter(|(_, account)| !account.is_empty())
            .collect();
        let ledger = Ledger::from_parts(
            snap.global,
            accounts,
            snap.zero_stake_accrual,
            snap.reward_emission,
            snap.metadata,
        );
        ledger.audit()?;

        tracing::info!(
            accounts = ledger.account_count(),
            total_supply = ledger.total_supply(),
            "ledger restored from snapshot"
        );
        Ok(ledger)
    }

    /// Write every account and the global record to `store` in one batch.
    ///
    /// Accounts present in the store but no longer in the ledger are deleted.
    /// If the commit fails the store keeps its previous contents.
    pub fn save_to_store<S: LedgerStore + ?Sized>(&self, store: &S) -> Result<(), LedgerError> {
        let mut batch = WriteBatch::new();
        for (id, _) in store.iter_accounts()? {
            if self.account(&id).is_empty() {
                batch.delete_account(&id);
            }
        }
        for (id, account) in self.accounts() {
            batch.put_account(id, encode_record(account)?);
        }

        let global = GlobalRecord {
            version: SNAPSHOT_VERSION,
            global: self.global().clone(),
            zero_stake_accrual: self.zero_stake_accrual(),
            reward_emission: self.reward_emission(),
            metadata: self.metadata().clone(),
        };
        batch.put_meta(GLOBAL_META_KEY, encode_record(&global)?);

        let writes = batch.len();
        store.commit(batch)?;
        tracing::debug!(accounts = self.account_count(), writes, "ledger persisted");
        Ok(())
    }

    /// Load a ledger previously written with [`Ledger::save_to_store`].
    pub fn load_from_store<S: LedgerStore + ?Sized>(store: &S) -> Result<Self, LedgerError> {
        let record = store
            .get_meta(GLOBAL_META_KEY)?
            .ok_or_else(|| StoreError::NotFound("global ledger record".into()))?;
        let global: GlobalRecord = decode_record(&record, "global ledger record")?;
        if global.version != SNAPSHOT_VERSION {
            return Err(StoreError::Corruption(format!(
                "unsupported record version {}",
                global.version
            ))
            .into());
        }

        let mut accounts = HashMap::new();
        for (id, bytes) in store.iter_accounts()? {
            let account: Account = decode_record(&bytes, id.as_str())?;
            if !account.is_empty() {
                accounts.insert(id, account);
            }
        }

        let ledger = Ledger::from_parts(
            global.global,
            accounts,
            global.zero_stake_accrual,
            global.reward_emission,
            global.metadata,
        );
        ledger.audit()?;
        Ok(ledger)
    }
}

fn encode_record<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode_record<T: serde::de::DeserializeOwned>(
    bytes: &[u8],
    what: &str,
) -> Result<T, StoreError> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Corruption(format!("{what}: {e}")))
}
