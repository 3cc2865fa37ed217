//! The global reward-per-token accumulator.

use crate::error::RewardError;
use accrue_types::{BlockHeight, ZeroStakeAccrual};
use serde::{Deserialize, Serialize};

/// Global accrual state shared by every staker.
///
/// Stored ONCE, never per account. `reward_per_token_stored` only ever grows;
/// a rate change or a change in total stake first settles the accumulator up
/// to the current height so the old parameters apply to the elapsed interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardAccumulator {
    /// Reward units emitted per block, shared pro rata by all stake.
    pub reward_rate: u128,
    /// Cumulative reward per staked unit since genesis.
    pub reward_per_token_stored: u128,
    /// Height of the most recent global settlement.
    pub last_update: BlockHeight,
}

impl RewardAccumulator {
    pub fn new(reward_rate: u128, genesis: BlockHeight) -> Self {
        Self {
            reward_rate,
            reward_per_token_stored: 0,
            last_update: genesis,
        }
    }

    /// Accumulator growth for the interval `last_update..now`.
    ///
    /// `rate × elapsed` is computed first and then divided, truncating, by
    /// the stake denominator.
    pub fn increment(
        &self,
        total_staked: u128,
        now: BlockHeight,
        policy: ZeroStakeAccrual,
    ) -> Result<u128, RewardError> {
        let elapsed = self
            .last_update
            .blocks_until(now)
            .ok_or(RewardError::TimeRegression {
                last_update: self.last_update,
                now,
            })?;

        let denom = match (total_staked, policy) {
            (0, ZeroStakeAccrual::Skip) => return Ok(0),
            (0, ZeroStakeAccrual::SubstituteOne) => 1,
            (staked, _) => staked,
        };

        let emitted = self
            .reward_rate
            .checked_mul(elapsed as u128)
            .ok_or(RewardError::Overflow)?;
        Ok(emitted / denom)
    }

    /// Global settlement: the accumulator as of `now`.
    ///
    /// Pure; the caller decides whether to commit the result.
    pub fn settle(
        &self,
        total_staked: u128,
        now: BlockHeight,
        policy: ZeroStakeAccrual,
    ) -> Result<Self, RewardError> {
        let delta = self.increment(total_staked, now, policy)?;
        let reward_per_token_stored = self
            .reward_per_token_stored
            .checked_add(delta)
            .ok_or(RewardError::Overflow)?;
        Ok(Self {
            reward_rate: self.reward_rate,
            reward_per_token_stored,
            last_update: now,
        })
    }

    /// The same accumulator emitting at `new_rate` from now on.
    ///
    /// Only meaningful on an accumulator that was just settled.
    pub fn with_rate(self, new_rate: u128) -> Self {
        Self {
            reward_rate: new_rate,
            ..self
        }
    }
}

impl Default for RewardAccumulator {
    fn default() -> Self {
        Self::new(0, BlockHeight::GENESIS)
    }
}
