//! Events recorded for every successful state transition.

use accrue_types::{AccountId, BlockHeight, Memo};
use serde::{Deserialize, Serialize};

/// Ledger-level events, drained by the caller via [`crate::Ledger::drain_events`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    Minted {
        recipient: AccountId,
        amount: u128,
        total_supply: u128,
    },
    Burned {
        account: AccountId,
        amount: u128,
        total_supply: u128,
    },
    Transferred {
        from: AccountId,
        to: AccountId,
        amount: u128,
        memo: Option<Memo>,
    },
    Staked {
        account: AccountId,
        amount: u128,
        total_staked: u128,
        at: BlockHeight,
    },
    Unstaked {
        account: AccountId,
        amount: u128,
        total_staked: u128,
        at: BlockHeight,
    },
    RewardsClaimed {
        account: AccountId,
        amount: u128,
        total_supply: u128,
        at: BlockHeight,
    },
    RewardRateSet {
        rate: u128,
        at: BlockHeight,
    },
    PausedSet {
        paused: bool,
    },
}
