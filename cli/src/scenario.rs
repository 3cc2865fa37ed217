//! Deterministic scenario replay.
//!
//! A scenario is a JSON document listing ledger operations in order. Time is
//! only moved by `advance` steps, so replaying the same file always yields
//! the same ledger.
//!
//! Each step is an object keyed by the operation name. Amounts are JSON
//! integers and may use the full `u128` range.
//!
//! ```json
//! {
//!   "steps": [
//!     { "mint": { "to": "alice", "amount": 1000 } },
//!     { "stake": { "caller": "alice", "amount": 200 } },
//!     { "advance": { "blocks": 2 } },
//!     { "claim": { "caller": "alice" } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use accrue_ledger::{Ledger, LedgerError, LedgerEvent};
use accrue_types::{AccountId, BlockHeight, Memo};

use crate::summary::LedgerSummary;
use crate::CliError;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    /// Height of the first step.
    #[serde(default)]
    pub start_height: u64,
    pub steps: Vec<Step>,
}

/// One scenario step. Admin operations default `caller` to the ledger admin.
///
/// Externally tagged: an internally tagged enum is buffered by serde before
/// the variant is known, and that buffer cannot carry `u128` amounts.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    Mint {
        #[serde(default)]
        caller: Option<AccountId>,
        to: AccountId,
        amount: u128,
    },
    Burn {
        caller: AccountId,
        amount: u128,
    },
    Transfer {
        caller: AccountId,
        to: AccountId,
        amount: u128,
        #[serde(default)]
        memo: Option<String>,
    },
    Stake {
        caller: AccountId,
        amount: u128,
    },
    Unstake {
        caller: AccountId,
        amount: u128,
    },
    Claim {
        caller: AccountId,
    },
    SetRewardRate {
        #[serde(default)]
        caller: Option<AccountId>,
        rate: u128,
    },
    SetPaused {
        #[serde(default)]
        caller: Option<AccountId>,
        paused: bool,
    },
    Advance {
        blocks: u64,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mint { .. } => "mint",
            Self::Burn { .. } => "burn",
            Self::Transfer { .. } => "transfer",
            Self::Stake { .. } => "stake",
            Self::Unstake { .. } => "unstake",
            Self::Claim { .. } => "claim",
            Self::SetRewardRate { .. } => "set_reward_rate",
            Self::SetPaused { .. } => "set_paused",
            Self::Advance { .. } => "advance",
        }
    }
}

/// Result of a single step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub op: &'static str,
    pub height: u64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Amount paid out by a successful claim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed: Option<u128>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepOutcome>,
    /// Every event emitted during the replay, in order.
    pub events: Vec<LedgerEvent>,
    pub final_state: LedgerSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_hash: Option<String>,
}

impl Scenario {
    pub fn from_json_str(s: &str) -> Result<Self, CliError> {
        serde_json::from_str(s).map_err(|e| CliError::Scenario(e.to_string()))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }
}

/// Apply every step of `scenario` to `ledger`.
///
/// Failed operations are recorded and replay continues. The ledger is
/// audited after every step; an audit failure aborts the replay.
pub fn replay(ledger: &mut Ledger, scenario: &Scenario) -> Result<ReplayReport, CliError> {
    let mut now = BlockHeight::new(scenario.start_height);
    let mut outcomes = Vec::with_capacity(scenario.steps.len());
    let mut events = Vec::new();

    for (index, step) in scenario.steps.iter().enumerate() {
        let result = apply_step(ledger, step, &mut now)?;
        let outcome = match result {
            Ok(claimed) => {
                tracing::info!(index, op = step.name(), at = %now, "step applied");
                StepOutcome {
                    index,
                    op: step.name(),
                    height: now.as_u64(),
                    ok: true,
                    code: None,
                    error: None,
                    claimed,
                }
            }
            Err(e) => {
                tracing::info!(
                    index,
                    op = step.name(),
                    at = %now,
                    code = e.code(),
                    error = %e,
                    "step rejected"
                );
                StepOutcome {
                    index,
                    op: step.name(),
                    height: now.as_u64(),
                    ok: false,
                    code: Some(e.code()),
                    error: Some(e.to_string()),
                    claimed: None,
                }
            }
        };
        outcomes.push(outcome);

        ledger.audit().map_err(|e| {
            tracing::error!(index, error = %e, "audit failed");
            e
        })?;
        events.extend(ledger.drain_events());
    }

    Ok(ReplayReport {
        steps: outcomes,
        events,
        final_state: LedgerSummary::from_ledger(ledger, now),
        snapshot_hash: None,
    })
}

/// The ledger's verdict on one step; `Some` carries a claimed amount.
type StepResult = Result<Option<u128>, LedgerError>;

/// The outer `Result` carries malformed-step errors.
fn apply_step(
    ledger: &mut Ledger,
    step: &Step,
    now: &mut BlockHeight,
) -> Result<StepResult, CliError> {
    let admin = ledger.admin().clone();
    let caller_or_admin =
        |caller: &Option<AccountId>| caller.clone().unwrap_or_else(|| admin.clone());

    let result = match step {
        Step::Mint { caller, to, amount } => {
            ledger.mint(&caller_or_admin(caller), to, *amount).map(|_| None)
        }
        Step::Burn { caller, amount } => ledger.burn(caller, *amount).map(|_| None),
        Step::Transfer {
            caller,
            to,
            amount,
            memo,
        } => {
            let memo = memo.as_deref().map(Memo::new).transpose()?;
            ledger.transfer(caller, to, *amount, memo).map(|_| None)
        }
        Step::Stake { caller, amount } => ledger.stake(caller, *amount, *now).map(|_| None),
        Step::Unstake { caller, amount } => ledger.unstake(caller, *amount, *now).map(|_| None),
        Step::Claim { caller } => ledger.claim_rewards(caller, *now).map(Some),
        Step::SetRewardRate { caller, rate } => ledger
            .set_reward_rate(&caller_or_admin(caller), *rate, *now)
            .map(|_| None),
        Step::SetPaused { caller, paused } => ledger
            .set_paused(&caller_or_admin(caller), *paused)
            .map(|_| None),
        Step::Advance { blocks } => {
            *now = now.advance(*blocks);
            Ok(None)
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_types::LedgerParams;

    fn ledger() -> Ledger {
        Ledger::new(AccountId::from("admin"), LedgerParams::default())
    }

    #[test]
    fn replays_stake_and_claim() {
        let scenario = Scenario::from_json_str(
            r#"{
                "steps": [
                    { "mint": { "to": "alice", "amount": 1000 } },
                    { "stake": { "caller": "alice", "amount": 200 } },
                    { "advance": { "blocks": 2 } },
                    { "claim": { "caller": "alice" } }
                ]
            }"#,
        )
        .unwrap();

        let mut ledger = ledger();
        let report = replay(&mut ledger, &scenario).unwrap();
        assert!(report.steps.iter().all(|s| s.ok));
        assert_eq!(report.steps[3].claimed, Some(200));
        assert_eq!(report.events.len(), 3);
        assert!(matches!(
            report.events[2],
            LedgerEvent::RewardsClaimed { amount: 200, .. }
        ));
        assert_eq!(report.final_state.total_supply, 1200);
        assert_eq!(report.final_state.height, 2);
    }

    #[test]
    fn rejected_steps_carry_codes() {
        let scenario = Scenario::from_json_str(
            r#"{
                "steps": [
                    { "mint": { "caller": "mallory", "to": "mallory", "amount": 5 } },
                    { "burn": { "caller": "alice", "amount": 1 } },
                    { "set_paused": { "paused": true } },
                    { "claim": { "caller": "alice" } }
                ]
            }"#,
        )
        .unwrap();

        let report = replay(&mut ledger(), &scenario).unwrap();
        let codes: Vec<Option<u32>> = report.steps.iter().map(|s| s.code).collect();
        assert_eq!(codes, vec![Some(100), Some(101), None, Some(104)]);
    }

    #[test]
    fn oversized_memo_aborts_replay() {
        let scenario = Scenario::from_json_str(
            r#"{
                "steps": [
                    { "transfer": { "caller": "a", "to": "b", "amount": 1,
                      "memo": "this memo is far longer than thirty-four bytes" } }
                ]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            replay(&mut ledger(), &scenario),
            Err(CliError::Types(_))
        ));
    }

    #[test]
    fn unknown_op_rejected() {
        let result = Scenario::from_json_str(r#"{ "steps": [ { "explode": {} } ] }"#);
        assert!(matches!(result, Err(CliError::Scenario(_))));
    }

    #[test]
    fn amounts_above_u64_parse_exactly() {
        let big = u128::from(u64::MAX) + 1;
        let scenario = Scenario::from_json_str(&format!(
            r#"{{ "steps": [
                {{ "mint": {{ "to": "alice", "amount": {big} }} }},
                {{ "set_reward_rate": {{ "rate": {big} }} }}
            ] }}"#
        ))
        .unwrap();
        assert_eq!(
            scenario.steps[0],
            Step::Mint {
                caller: None,
                to: AccountId::from("alice"),
                amount: big,
            }
        );

        let mut ledger = Ledger::new(
            AccountId::from("admin"),
            LedgerParams {
                max_supply: u128::MAX,
                ..LedgerParams::default()
            },
        );
        let report = replay(&mut ledger, &scenario).unwrap();
        assert!(report.steps.iter().all(|s| s.ok));
        assert_eq!(report.final_state.total_supply, big);
        assert_eq!(report.final_state.reward_rate, big);
    }

    #[test]
    fn misspelled_field_rejected() {
        let result = Scenario::from_json_str(
            r#"{ "steps": [ { "burn": { "caller": "alice", "ammount": 1 } } ] }"#,
        );
        assert!(matches!(result, Err(CliError::Scenario(_))));
    }
}
