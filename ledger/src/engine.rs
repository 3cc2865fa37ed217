//! The ledger & reward engine.

use std::collections::HashMap;

use accrue_rewards::RewardAccumulator;
use accrue_types::{
    AccountId, BlockHeight, LedgerParams, Memo, RewardEmission, TokenMetadata, ZeroStakeAccrual,
};

use crate::account::Account;
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::state::GlobalState;

/// The ledger. Owns all balances, stake positions and the reward accumulator.
///
/// Operations take the caller identity explicitly; those that touch the
/// reward stream also take the current block height. Each operation computes
/// its complete successor state on copies and commits only after every check
/// has passed.
pub struct Ledger {
    global: GlobalState,
    accounts: HashMap<AccountId, Account>,
    zero_stake_accrual: ZeroStakeAccrual,
    reward_emission: RewardEmission,
    metadata: TokenMetadata,
    events: Vec<LedgerEvent>,
}

impl Ledger {
    /// Create an empty ledger at genesis with a fixed admin.
    pub fn new(admin: AccountId, params: LedgerParams) -> Self {
        Self {
            global: GlobalState::genesis(admin, params.max_supply, params.initial_reward_rate),
            accounts: HashMap::new(),
            zero_stake_accrual: params.zero_stake_accrual,
            reward_emission: params.reward_emission,
            metadata: params.metadata,
            events: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        global: GlobalState,
        accounts: HashMap<AccountId, Account>,
        zero_stake_accrual: ZeroStakeAccrual,
        reward_emission: RewardEmission,
        metadata: TokenMetadata,
    ) -> Self {
        Self {
            global,
            accounts,
            zero_stake_accrual,
            reward_emission,
            metadata,
            events: Vec::new(),
        }
    }

    // ── Balance ledger ──────────────────────────────────────────────────────

    /// Create `amount` new tokens in `recipient`'s balance. Admin only.
    ///
    /// Allowed while paused.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        recipient: &AccountId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller, "mint")?;
        require_positive(amount)?;

        let remaining = self.global.remaining_supply();
        if amount > remaining {
            return Err(LedgerError::SupplyCapExceeded {
                requested: amount,
                remaining,
            });
        }
        let total_supply = add(self.global.total_supply, amount)?;

        let mut account = self.account(recipient);
        account.balance = add(account.balance, amount)?;

        self.put_account(recipient, account);
        self.global.total_supply = total_supply;

        tracing::debug!(recipient = %recipient, amount, total_supply, "minted");
        self.events.push(LedgerEvent::Minted {
            recipient: recipient.clone(),
            amount,
            total_supply,
        });
        Ok(())
    }

    /// Destroy `amount` tokens from the caller's spendable balance.
    pub fn burn(&mut self, caller: &AccountId, amount: u128) -> Result<(), LedgerError> {
        self.require_active()?;
        require_positive(amount)?;

        let mut account = self.account(caller);
        account.balance = debit_balance(account.balance, amount)?;
        let total_supply = sub(self.global.total_supply, amount)?;

        self.put_account(caller, account);
        self.global.total_supply = total_supply;

        tracing::debug!(account = %caller, amount, total_supply, "burned");
        self.events.push(LedgerEvent::Burned {
            account: caller.clone(),
            amount,
            total_supply,
        });
        Ok(())
    }

    /// Move `amount` from the caller's balance to `recipient`'s.
    ///
    /// A transfer to oneself debits and re-credits the same account, leaving
    /// the balance unchanged.
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        recipient: &AccountId,
        amount: u128,
        memo: Option<Memo>,
    ) -> Result<(), LedgerError> {
        self.require_active()?;
        require_positive(amount)?;

        let mut sender = self.account(caller);
        sender.balance = debit_balance(sender.balance, amount)?;

        let mut receiver = if caller == recipient {
            sender
        } else {
            self.account(recipient)
        };
        receiver.balance = add(receiver.balance, amount)?;

        if caller != recipient {
            self.put_account(caller, sender);
        }
        self.put_account(recipient, receiver);

        tracing::debug!(from = %caller, to = %recipient, amount, memo = ?memo, "transferred");
        self.events.push(LedgerEvent::Transferred {
            from: caller.clone(),
            to: recipient.clone(),
            amount,
            memo,
        });
        Ok(())
    }

    /// Gate burn, transfer, stake, unstake and claim. Admin only.
    pub fn set_paused(&mut self, caller: &AccountId, paused: bool) -> Result<(), LedgerError> {
        self.require_admin(caller, "set_paused")?;

        self.global.paused = paused;

        tracing::info!(paused, "pause flag set");
        self.events.push(LedgerEvent::PausedSet { paused });
        Ok(())
    }

    // ── Reward accumulator ──────────────────────────────────────────────────

    /// Escrow `amount` of the caller's balance into stake.
    ///
    /// The accumulator and the caller's position are settled first so the
    /// new tokens earn nothing for the interval that already elapsed.
    pub fn stake(
        &mut self,
        caller: &AccountId,
        amount: u128,
        now: BlockHeight,
    ) -> Result<(), LedgerError> {
        self.require_active()?;
        require_positive(amount)?;

        let rewards = self.settle_global(now)?;
        let mut account = self.settle_account(caller, &rewards)?;

        account.balance = debit_balance(account.balance, amount)?;
        account.position.staked = add(account.position.staked, amount)?;
        let total_staked = add(self.global.total_staked, amount)?;

        self.global.rewards = rewards;
        self.global.total_staked = total_staked;
        self.put_account(caller, account);

        tracing::debug!(account = %caller, amount, total_staked, at = %now, "staked");
        self.events.push(LedgerEvent::Staked {
            account: caller.clone(),
            amount,
            total_staked,
            at: now,
        });
        Ok(())
    }

    /// Release `amount` of the caller's stake back into their balance.
    pub fn unstake(
        &mut self,
        caller: &AccountId,
        amount: u128,
        now: BlockHeight,
    ) -> Result<(), LedgerError> {
        self.require_active()?;
        require_positive(amount)?;

        let rewards = self.settle_global(now)?;
        let mut account = self.settle_account(caller, &rewards)?;

        let staked = account.position.staked;
        if staked < amount {
            return Err(LedgerError::InsufficientStake {
                needed: amount,
                available: staked,
            });
        }
        account.position.staked = staked - amount;
        account.balance = add(account.balance, amount)?;
        let total_staked = sub(self.global.total_staked, amount)?;

        self.global.rewards = rewards;
        self.global.total_staked = total_staked;
        self.put_account(caller, account);

        tracing::debug!(account = %caller, amount, total_staked, at = %now, "unstaked");
        self.events.push(LedgerEvent::Unstaked {
            account: caller.clone(),
            amount,
            total_staked,
            at: now,
        });
        Ok(())
    }

    /// Pay out everything the caller has earned, minting it as new supply.
    ///
    /// Under [`RewardEmission::Uncapped`] the mint ignores `max_supply`.
    pub fn claim_rewards(
        &mut self,
        caller: &AccountId,
        now: BlockHeight,
    ) -> Result<u128, LedgerError> {
        self.require_active()?;

        let rewards = self.settle_global(now)?;
        let mut account = self.settle_account(caller, &rewards)?;

        let amount = account.position.pending_reward;
        if amount == 0 {
            return Err(LedgerError::NoRewardsDue);
        }
        if self.reward_emission == RewardEmission::Capped {
            let remaining = self.global.remaining_supply();
            if amount > remaining {
                return Err(LedgerError::SupplyCapExceeded {
                    requested: amount,
                    remaining,
                });
            }
        }
        account.position.pending_reward = 0;
        account.balance = add(account.balance, amount)?;
        let total_supply = add(self.global.total_supply, amount)?;

        self.global.rewards = rewards;
        self.global.total_supply = total_supply;
        self.put_account(caller, account);

        tracing::debug!(account = %caller, amount, total_supply, at = %now, "rewards claimed");
        self.events.push(LedgerEvent::RewardsClaimed {
            account: caller.clone(),
            amount,
            total_supply,
            at: now,
        });
        Ok(amount)
    }

    /// Change the emission rate. Admin only.
    ///
    /// The accumulator is settled at the old rate up to `now` before the new
    /// rate takes effect, so no staker gains or loses retroactively.
    pub fn set_reward_rate(
        &mut self,
        caller: &AccountId,
        new_rate: u128,
        now: BlockHeight,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller, "set_reward_rate")?;
        require_positive(new_rate)?;

        let rewards = self.settle_global(now)?.with_rate(new_rate);
        self.global.rewards = rewards;

        tracing::info!(rate = new_rate, at = %now, "reward rate set");
        self.events.push(LedgerEvent::RewardRateSet {
            rate: new_rate,
            at: now,
        });
        Ok(())
    }

    /// Global settlement as of `now`, without committing it.
    fn settle_global(&self, now: BlockHeight) -> Result<RewardAccumulator, LedgerError> {
        let settled =
            self.global
                .rewards
                .settle(self.global.total_staked, now, self.zero_stake_accrual)?;
        tracing::trace!(
            reward_per_token = settled.reward_per_token_stored,
            total_staked = self.global.total_staked,
            at = %now,
            "global settlement"
        );
        Ok(settled)
    }

    /// Per-account settlement against an already settled accumulator, on a copy.
    fn settle_account(
        &self,
        id: &AccountId,
        rewards: &RewardAccumulator,
    ) -> Result<Account, LedgerError> {
        let mut account = self.account(id);
        account.position = account.position.settle(rewards.reward_per_token_stored)?;
        Ok(account)
    }

    // ── Views ───────────────────────────────────────────────────────────────

    /// The account entry for `id`; a never-seen identity reads as empty.
    pub fn account(&self, id: &AccountId) -> Account {
        self.accounts.get(id).copied().unwrap_or_default()
    }

    pub fn balance_of(&self, id: &AccountId) -> u128 {
        self.account(id).balance
    }

    pub fn staked_of(&self, id: &AccountId) -> u128 {
        self.account(id).staked()
    }

    /// Rewards `id` could claim at height `now`. Does not mutate state.
    pub fn pending_rewards(&self, id: &AccountId, now: BlockHeight) -> Result<u128, LedgerError> {
        let rewards = self.settle_global(now)?;
        Ok(self.account(id).position.earned(rewards.reward_per_token_stored)?)
    }

    pub fn total_supply(&self) -> u128 {
        self.global.total_supply
    }

    pub fn total_staked(&self) -> u128 {
        self.global.total_staked
    }

    pub fn max_supply(&self) -> u128 {
        self.global.max_supply
    }

    pub fn reward_rate(&self) -> u128 {
        self.global.rewards.reward_rate
    }

    pub fn reward_per_token_stored(&self) -> u128 {
        self.global.rewards.reward_per_token_stored
    }

    pub fn last_update_time(&self) -> BlockHeight {
        self.global.rewards.last_update
    }

    pub fn is_paused(&self) -> bool {
        self.global.paused
    }

    pub fn admin(&self) -> &AccountId {
        &self.global.admin
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn global(&self) -> &GlobalState {
        &self.global
    }

    pub fn zero_stake_accrual(&self) -> ZeroStakeAccrual {
        self.zero_stake_accrual
    }

    pub fn reward_emission(&self) -> RewardEmission {
        self.reward_emission
    }

    /// Iterate over every non-empty account.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &Account)> {
        self.accounts.iter()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Hand over and clear the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Consistency ─────────────────────────────────────────────────────────

    /// Recompute the ledger invariants from the account map.
    ///
    /// Checks conservation (`Σ balance + Σ staked == total_supply`), the stake
    /// sum, that no checkpoint is ahead of the accumulator and, under capped
    /// emission, the supply cap.
    pub fn audit(&self) -> Result<(), LedgerError> {
        let mut balances: u128 = 0;
        let mut staked: u128 = 0;
        let stored = self.global.rewards.reward_per_token_stored;

        for (id, account) in &self.accounts {
            balances = add(balances, account.balance)?;
            staked = add(staked, account.staked())?;
            if account.position.reward_per_token_paid > stored {
                return Err(LedgerError::InvariantViolated(format!(
                    "account {id} checkpoint {} ahead of accumulator {stored}",
                    account.position.reward_per_token_paid
                )));
            }
        }

        let held = add(balances, staked)?;
        if held != self.global.total_supply {
            return Err(LedgerError::InvariantViolated(format!(
                "balances {balances} + staked {staked} != total supply {}",
                self.global.total_supply
            )));
        }
        if staked != self.global.total_staked {
            return Err(LedgerError::InvariantViolated(format!(
                "staked sum {staked} != total staked {}",
                self.global.total_staked
            )));
        }
        if self.reward_emission == RewardEmission::Capped
            && self.global.total_supply > self.global.max_supply
        {
            return Err(LedgerError::InvariantViolated(format!(
                "total supply {} exceeds cap {}",
                self.global.total_supply, self.global.max_supply
            )));
        }
        Ok(())
    }

    // ── Internal helpers ────────────────────────────────────────────────────

    fn require_admin(&self, caller: &AccountId, op: &'static str) -> Result<(), LedgerError> {
        if *caller != self.global.admin {
            tracing::warn!(caller = %caller, op, "rejected non-admin call");
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }

    fn require_active(&self) -> Result<(), LedgerError> {
        if self.global.paused {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }

    /// Write back an account, dropping it once it is empty.
    fn put_account(&mut self, id: &AccountId, account: Account) {
        if account.is_empty() {
            self.accounts.remove(id);
        } else {
            self.accounts.insert(id.clone(), account);
        }
    }
}

fn require_positive(amount: u128) -> Result<(), LedgerError> {
    if amount == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

fn debit_balance(balance: u128, amount: u128) -> Result<u128, LedgerError> {
    balance
        .checked_sub(amount)
        .ok_or(LedgerError::InsufficientBalance {
            needed: amount,
            available: balance,
        })
}

fn add(a: u128, b: u128) -> Result<u128, LedgerError> {
    a.checked_add(b).ok_or(LedgerError::Overflow)
}

fn sub(a: u128, b: u128) -> Result<u128, LedgerError> {
    a.checked_sub(b).ok_or(LedgerError::Overflow)
}
