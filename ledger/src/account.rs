//! Per-account ledger entry.

use accrue_rewards::StakePosition;
use serde::{Deserialize, Serialize};

/// Balance plus stake position for one identity.
///
/// Accounts exist implicitly: an identity never seen before reads as
/// `Account::default()`, and an account drained back to that shape is
/// dropped from the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Spendable balance.
    pub balance: u128,
    pub position: StakePosition,
}

impl Account {
    pub fn staked(&self) -> u128 {
        self.position.staked
    }

    pub fn pending_reward(&self) -> u128 {
        self.position.pending_reward
    }

    /// Whether this entry is indistinguishable from a never-seen account.
    ///
    /// The checkpoint is irrelevant once nothing is staked or pending: the
    /// next stake settles the account before the stake changes.
    pub fn is_empty(&self) -> bool {
        self.balance == 0 && self.position.is_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drained_account_is_empty_regardless_of_checkpoint() {
        let account = Account {
            balance: 0,
            position: StakePosition {
                staked: 0,
                reward_per_token_paid: 42,
                pending_reward: 0,
            },
        };
        assert!(account.is_empty());
    }

    #[test]
    fn pending_reward_keeps_account_alive() {
        let account = Account {
            balance: 0,
            position: StakePosition {
                staked: 0,
                reward_per_token_paid: 1,
                pending_reward: 5,
            },
        };
        assert!(!account.is_empty());
        assert_eq!(account.pending_reward(), 5);
    }
}
