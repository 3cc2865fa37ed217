//! Ledger operation failures.
//!
//! Every variant is a validation outcome returned before any mutation.

use accrue_rewards::RewardError;
use accrue_types::BlockHeight;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("caller is not the ledger admin")]
    Unauthorized,

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient stake: need {needed}, staked {available}")]
    InsufficientStake { needed: u128, available: u128 },

    #[error("supply cap exceeded: requested {requested}, remaining {remaining}")]
    SupplyCapExceeded { requested: u128, remaining: u128 },

    #[error("ledger is paused")]
    Paused,

    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("no rewards due")]
    NoRewardsDue,

    #[error("arithmetic overflow in ledger computation")]
    Overflow,

    #[error("height {now} precedes last reward update at {last_update}")]
    TimeRegression {
        last_update: BlockHeight,
        now: BlockHeight,
    },

    #[error("ledger invariant violated: {0}")]
    InvariantViolated(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl LedgerError {
    /// Stable numeric failure code reported to callers.
    pub fn code(&self) -> u32 {
        match self {
            Self::Unauthorized => 100,
            Self::InsufficientBalance { .. } => 101,
            Self::InsufficientStake { .. } => 102,
            Self::SupplyCapExceeded { .. } => 103,
            Self::Paused => 104,
            Self::InvalidAmount => 106,
            Self::NoRewardsDue => 108,
            Self::Overflow => 110,
            Self::TimeRegression { .. } => 111,
            Self::InvariantViolated(_) => 120,
            Self::Snapshot(_) => 130,
            Self::Store(_) => 131,
            Self::LockPoisoned => 140,
        }
    }
}

impl From<RewardError> for LedgerError {
    fn from(e: RewardError) -> Self {
        match e {
            RewardError::Overflow => Self::Overflow,
            RewardError::TimeRegression { last_update, now } => {
                Self::TimeRegression { last_update, now }
            }
            RewardError::CheckpointAhead { .. } => Self::InvariantViolated(e.to_string()),
        }
    }
}

impl From<accrue_store::StoreError> for LedgerError {
    fn from(e: accrue_store::StoreError) -> Self {
        Self::Store(e.to_string())
    }
}
