//! Fundamental types for the accrue staking ledger.
//!
//! This crate defines the primitives shared across every other crate in the
//! workspace: account identities, block heights, transfer memos, ledger
//! parameters and the policy knobs that select reward behaviour.

pub mod address;
pub mod error;
pub mod memo;
pub mod params;
pub mod time;

pub use address::AccountId;
pub use error::TypesError;
pub use memo::Memo;
pub use params::{LedgerParams, RewardEmission, TokenMetadata, ZeroStakeAccrual};
pub use time::BlockHeight;
