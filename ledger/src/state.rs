//! Global ledger scalars.

use accrue_rewards::RewardAccumulator;
use accrue_types::AccountId;
use serde::{Deserialize, Serialize};

/// State shared by every account, owned by one `Ledger` value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Σ balance + Σ staked across all accounts.
    pub total_supply: u128,
    /// Σ staked across all accounts.
    pub total_staked: u128,
    /// Reward rate, accumulator and last update height.
    pub rewards: RewardAccumulator,
    pub paused: bool,
    /// Fixed at initialisation.
    pub admin: AccountId,
    /// Immutable cap on admin minting.
    pub max_supply: u128,
}

impl GlobalState {
    pub fn genesis(admin: AccountId, max_supply: u128, reward_rate: u128) -> Self {
        Self {
            total_supply: 0,
            total_staked: 0,
            rewards: RewardAccumulator::new(reward_rate, accrue_types::BlockHeight::GENESIS),
            paused: false,
            admin,
            max_supply,
        }
    }

    /// Headroom left under the cap. Zero once supply sits at or above it.
    pub fn remaining_supply(&self) -> u128 {
        self.max_supply.saturating_sub(self.total_supply)
    }
}
