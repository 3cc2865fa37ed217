//! Per-account stake position and its settlement against the accumulator.

use crate::error::RewardError;
use serde::{Deserialize, Serialize};

/// The reward-bearing part of an account.
///
/// `staked` is held constant between settlements: every stake change settles
/// the position first, so `staked × (rpt − reward_per_token_paid)` is exactly
/// the account's share of the interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakePosition {
    /// Tokens escrowed out of the spendable balance.
    pub staked: u128,
    /// Accumulator value at the last settlement (the checkpoint).
    pub reward_per_token_paid: u128,
    /// Rewards settled but not yet claimed.
    pub pending_reward: u128,
}

impl StakePosition {
    /// Total reward owed as of accumulator value `reward_per_token`.
    pub fn earned(&self, reward_per_token: u128) -> Result<u128, RewardError> {
        let delta = reward_per_token
            .checked_sub(self.reward_per_token_paid)
            .ok_or(RewardError::CheckpointAhead {
                paid: self.reward_per_token_paid,
                stored: reward_per_token,
            })?;
        let accrued = self
            .staked
            .checked_mul(delta)
            .ok_or(RewardError::Overflow)?;
        self.pending_reward
            .checked_add(accrued)
            .ok_or(RewardError::Overflow)
    }

    /// Per-account settlement: fold the accumulator delta into
    /// `pending_reward` and move the checkpoint to `reward_per_token`.
    pub fn settle(&self, reward_per_token: u128) -> Result<Self, RewardError> {
        Ok(Self {
            staked: self.staked,
            reward_per_token_paid: reward_per_token,
            pending_reward: self.earned(reward_per_token)?,
        })
    }

    /// Whether the position carries neither stake nor unclaimed reward.
    pub fn is_idle(&self) -> bool {
        self.staked == 0 && self.pending_reward == 0
    }
}
