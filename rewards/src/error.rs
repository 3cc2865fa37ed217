//! Reward accrual errors.

use accrue_types::BlockHeight;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewardError {
    #[error("arithmetic overflow in reward computation")]
    Overflow,

    #[error("settlement at {now} precedes last update at {last_update}")]
    TimeRegression {
        last_update: BlockHeight,
        now: BlockHeight,
    },

    #[error("account checkpoint {paid} is ahead of the accumulator {stored}")]
    CheckpointAhead { paid: u128, stored: u128 },
}
