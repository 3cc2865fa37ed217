//! JSON-friendly views of ledger state.

use serde::Serialize;

use accrue_ledger::Ledger;
use accrue_types::{BlockHeight, RewardEmission, TokenMetadata, ZeroStakeAccrual};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub balance: u128,
    pub staked: u128,
    /// Settled but unclaimed rewards as of the account's last checkpoint.
    pub pending_reward: u128,
    /// Rewards claimable at the summary height.
    pub claimable: u128,
    pub reward_per_token_paid: u128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub height: u64,
    pub admin: String,
    pub metadata: TokenMetadata,
    pub total_supply: u128,
    pub total_staked: u128,
    pub max_supply: u128,
    pub reward_rate: u128,
    pub reward_per_token_stored: u128,
    pub last_update: u64,
    pub paused: bool,
    pub zero_stake_accrual: ZeroStakeAccrual,
    pub reward_emission: RewardEmission,
    /// Non-empty accounts, sorted by id.
    pub accounts: Vec<AccountSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_hash: Option<String>,
}

impl LedgerSummary {
    /// Summarize `ledger` as seen at `height`.
    ///
    /// `claimable` falls back to the settled `pending_reward` if the height
    /// precedes the last accumulator update.
    pub fn from_ledger(ledger: &Ledger, height: BlockHeight) -> Self {
        let mut accounts: Vec<AccountSummary> = ledger
            .accounts()
            .map(|(id, account)| AccountSummary {
                id: id.to_string(),
                balance: account.balance,
                staked: account.staked(),
                pending_reward: account.pending_reward(),
                claimable: ledger
                    .pending_rewards(id, height)
                    .unwrap_or(account.pending_reward()),
                reward_per_token_paid: account.position.reward_per_token_paid,
            })
            .collect();
        accounts.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            height: height.as_u64(),
            admin: ledger.admin().to_string(),
            metadata: ledger.metadata().clone(),
            total_supply: ledger.total_supply(),
            total_staked: ledger.total_staked(),
            max_supply: ledger.max_supply(),
            reward_rate: ledger.reward_rate(),
            reward_per_token_stored: ledger.reward_per_token_stored(),
            last_update: ledger.last_update_time().as_u64(),
            paused: ledger.is_paused(),
            zero_stake_accrual: ledger.zero_stake_accrual(),
            reward_emission: ledger.reward_emission(),
            accounts,
            snapshot_hash: None,
        }
    }

    pub fn with_hash(mut self, hash: String) -> Self {
        self.snapshot_hash = Some(hash);
        self
    }
}
