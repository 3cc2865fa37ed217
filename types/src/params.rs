//! Ledger parameters fixed at initialisation, plus the reward policy knobs.

use serde::{Deserialize, Serialize};

/// Hard supply cap used when none is configured.
pub const DEFAULT_MAX_SUPPLY: u128 = 1_000_000_000_000_000;

/// Reward units emitted per block across all stake when none is configured.
pub const DEFAULT_REWARD_RATE: u128 = 100;

/// How the global accumulator behaves while nothing is staked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroStakeAccrual {
    /// Divide the elapsed emission by 1 instead of 0. The accumulator keeps
    /// growing with nobody entitled to the growth.
    #[default]
    SubstituteOne,
    /// Freeze the accumulator until someone stakes.
    Skip,
}

/// Whether claimed rewards are subject to the supply cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardEmission {
    /// Claims mint new supply without consulting `max_supply`.
    #[default]
    Uncapped,
    /// A claim that would push supply past `max_supply` fails and the reward
    /// stays pending.
    Capped,
}

/// Display metadata for the single asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "PermaStore Storage Token".to_string(),
            symbol: "PST".to_string(),
            decimals: 6,
        }
    }
}

/// Everything needed to initialise a ledger besides the admin identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerParams {
    /// Immutable cap on admin minting.
    pub max_supply: u128,
    /// Reward units per block shared pro rata by all stake.
    pub initial_reward_rate: u128,
    pub zero_stake_accrual: ZeroStakeAccrual,
    pub reward_emission: RewardEmission,
    pub metadata: TokenMetadata,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            max_supply: DEFAULT_MAX_SUPPLY,
            initial_reward_rate: DEFAULT_REWARD_RATE,
            zero_stake_accrual: ZeroStakeAccrual::default(),
            reward_emission: RewardEmission::default(),
            metadata: TokenMetadata::default(),
        }
    }
}
