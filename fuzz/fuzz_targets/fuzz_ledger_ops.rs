#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use accrue_ledger::Ledger;
use accrue_types::{AccountId, BlockHeight, LedgerParams, RewardEmission, ZeroStakeAccrual};

#[derive(Arbitrary, Debug)]
enum Op {
    Mint { to: u8, amount: u128 },
    Burn { who: u8, amount: u128 },
    Transfer { from: u8, to: u8, amount: u128 },
    Stake { who: u8, amount: u128 },
    Unstake { who: u8, amount: u128 },
    Claim { who: u8 },
    SetRate { who: u8, rate: u128 },
    SetPaused { who: u8, paused: bool },
    Advance { blocks: u64 },
    Rewind { blocks: u8 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    skip_zero_stake: bool,
    capped: bool,
    max_supply: u128,
    ops: Vec<Op>,
}

fn actor(i: u8) -> AccountId {
    AccountId::new(format!("actor{}", i % 4))
}

// Drive arbitrary operation sequences, including huge amounts and rates.
// Operations may fail but must never panic or break the ledger invariants.
fuzz_target!(|input: Input| {
    let params = LedgerParams {
        max_supply: input.max_supply,
        zero_stake_accrual: if input.skip_zero_stake {
            ZeroStakeAccrual::Skip
        } else {
            ZeroStakeAccrual::SubstituteOne
        },
        reward_emission: if input.capped {
            RewardEmission::Capped
        } else {
            RewardEmission::Uncapped
        },
        ..LedgerParams::default()
    };
    let admin = actor(0);
    let mut ledger = Ledger::new(admin.clone(), params);
    let mut now = BlockHeight::GENESIS;

    for op in input.ops {
        let before = ledger.reward_per_token_stored();
        let _ = match op {
            Op::Mint { to, amount } => ledger.mint(&admin, &actor(to), amount),
            Op::Burn { who, amount } => ledger.burn(&actor(who), amount),
            Op::Transfer { from, to, amount } => {
                ledger.transfer(&actor(from), &actor(to), amount, None)
            }
            Op::Stake { who, amount } => ledger.stake(&actor(who), amount, now),
            Op::Unstake { who, amount } => ledger.unstake(&actor(who), amount, now),
            Op::Claim { who } => ledger.claim_rewards(&actor(who), now).map(|_| ()),
            Op::SetRate { who, rate } => ledger.set_reward_rate(&actor(who), rate, now),
            Op::SetPaused { who, paused } => ledger.set_paused(&actor(who), paused),
            Op::Advance { blocks } => {
                now = now.advance(blocks);
                Ok(())
            }
            // Exercises the time-regression path.
            Op::Rewind { blocks } => {
                let earlier = BlockHeight::new(now.as_u64().saturating_sub(u64::from(blocks)));
                ledger.stake(&actor(1), 1, earlier)
            }
        };

        assert!(ledger.reward_per_token_stored() >= before);
        if let Err(e) = ledger.audit() {
            panic!("audit failed: {e}");
        }
        ledger.drain_events();
    }
});
