//! Block height, the ledger's notion of time.
//!
//! Height is an externally advanced monotonic counter. The ledger never reads
//! a wall clock; every time-dependent operation receives the current height
//! from its caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block height (number of ticks since genesis).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockHeight(u64);

impl BlockHeight {
    /// Height zero.
    pub const GENESIS: Self = Self(0);

    pub fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The height after one more tick.
    pub fn next(self) -> Self {
        self.advance(1)
    }

    /// The height after `blocks` more ticks. Saturates at `u64::MAX`.
    pub fn advance(self, blocks: u64) -> Self {
        Self(self.0.saturating_add(blocks))
    }

    /// Blocks elapsed from `self` up to `now`, or `None` if `now` is earlier.
    pub fn blocks_until(&self, now: BlockHeight) -> Option<u64> {
        now.0.checked_sub(self.0)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}
