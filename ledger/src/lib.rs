//! Single-asset ledger with an integrated staking-reward engine.
//!
//! Tracks spendable balances, a staked (escrowed) subset of those balances,
//! and a reward stream that accrues to stakers in proportion to stake-time.
//! Every operation is an atomic state transition: all preconditions are
//! validated before anything is written, so a failed call leaves the ledger
//! untouched.
//!
//! Conservation: `Σ balance + Σ staked == total_supply`. Value is created only
//! by admin mint and reward claims, and destroyed only by burn.

pub mod account;
pub mod engine;
pub mod error;
pub mod event;
pub mod shared;
pub mod snapshot;
pub mod state;

pub use account::Account;
pub use engine::Ledger;
pub use error::LedgerError;
pub use event::LedgerEvent;
pub use shared::SharedLedger;
pub use snapshot::{LedgerSnapshot, SNAPSHOT_VERSION};
pub use state::GlobalState;
