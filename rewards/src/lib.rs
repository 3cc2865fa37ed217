//! Reward accumulator: continuous pro-rata reward accrual without iterating
//! over accounts.
//!
//! `rpt += rate × elapsed ÷ total_staked` is folded into one global counter.
//! An account's share since its last checkpoint is
//! `staked × (rpt − rpt_paid)`, which is exact because any change to
//! `staked` settles the account first.
//!
//! This crate handles:
//! - Global settlement (elapsed blocks → accumulator growth)
//! - Per-account settlement (accumulator delta → pending reward)
//! - The zero-stake accrual policy
//!
//! All arithmetic is integer with truncating division, in a fixed order.

pub mod accumulator;
pub mod error;
pub mod position;

pub use accumulator::RewardAccumulator;
pub use error::RewardError;
pub use position::StakePosition;
