//! Nullable clock: deterministic block height for testing.

use accrue_types::BlockHeight;
use std::cell::Cell;

/// A deterministic block clock for testing.
///
/// Height only advances when you tell it to, and never goes backwards.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_height: u64) -> Self {
        Self {
            current: Cell::new(initial_height),
        }
    }

    /// Get the current height.
    pub fn now(&self) -> BlockHeight {
        BlockHeight::new(self.current.get())
    }

    /// Advance by a single block.
    pub fn tick(&self) -> BlockHeight {
        self.advance(1)
    }

    /// Advance by a number of blocks.
    pub fn advance(&self, blocks: u64) -> BlockHeight {
        let next = self.now().advance(blocks);
        self.current.set(next.as_u64());
        next
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(0)
    }
}
