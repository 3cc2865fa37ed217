use proptest::prelude::*;

use accrue_rewards::{RewardAccumulator, StakePosition};
use accrue_types::{BlockHeight, ZeroStakeAccrual};

fn arb_policy() -> impl Strategy<Value = ZeroStakeAccrual> {
    prop_oneof![Just(ZeroStakeAccrual::SubstituteOne), Just(ZeroStakeAccrual::Skip)]
}

proptest! {
    /// The accumulator never decreases across any chain of settlements.
    #[test]
    fn accumulator_monotonic(
        rate in 0u128..1_000_000,
        steps in prop::collection::vec((0u64..1_000, 0u128..1_000_000), 1..50),
        policy in arb_policy(),
    ) {
        let mut acc = RewardAccumulator::new(rate, BlockHeight::GENESIS);
        let mut now = BlockHeight::GENESIS;
        for (blocks, total_staked) in steps {
            now = now.advance(blocks);
            let next = acc.settle(total_staked, now, policy).unwrap();
            prop_assert!(next.reward_per_token_stored >= acc.reward_per_token_stored);
            prop_assert_eq!(next.last_update, now);
            acc = next;
        }
    }

    /// Settling twice at the same height changes nothing.
    #[test]
    fn settlement_idempotent(
        rate in 0u128..1_000_000,
        blocks in 0u64..100_000,
        total_staked in 0u128..1_000_000,
        staked in 0u128..1_000_000,
        policy in arb_policy(),
    ) {
        let now = BlockHeight::new(blocks);
        let acc = RewardAccumulator::new(rate, BlockHeight::GENESIS)
            .settle(total_staked, now, policy)
            .unwrap();
        prop_assert_eq!(acc.settle(total_staked, now, policy).unwrap(), acc);

        let pos = StakePosition { staked, ..Default::default() }
            .settle(acc.reward_per_token_stored)
            .unwrap();
        prop_assert_eq!(pos.settle(acc.reward_per_token_stored).unwrap(), pos);
    }

    /// A sole staker whose stake divides the emission receives exactly
    /// `rate × elapsed`.
    #[test]
    fn sole_staker_receives_full_emission(
        rate_per_token in 1u128..1_000,
        staked in 1u128..10_000,
        blocks in 1u64..1_000,
    ) {
        let rate = rate_per_token * staked;
        let now = BlockHeight::new(blocks);
        let acc = RewardAccumulator::new(rate, BlockHeight::GENESIS)
            .settle(staked, now, ZeroStakeAccrual::SubstituteOne)
            .unwrap();
        let pos = StakePosition { staked, ..Default::default() };
        prop_assert_eq!(pos.earned(acc.reward_per_token_stored).unwrap(), rate * blocks as u128);
    }

    /// Truncation never pays out more than was emitted.
    #[test]
    fn payout_bounded_by_emission(
        rate in 1u128..1_000_000,
        stakes in prop::collection::vec(1u128..10_000, 1..10),
        blocks in 1u64..1_000,
    ) {
        let total: u128 = stakes.iter().sum();
        let now = BlockHeight::new(blocks);
        let acc = RewardAccumulator::new(rate, BlockHeight::GENESIS)
            .settle(total, now, ZeroStakeAccrual::SubstituteOne)
            .unwrap();
        let paid: u128 = stakes
            .iter()
            .map(|&staked| {
                StakePosition { staked, ..Default::default() }
                    .earned(acc.reward_per_token_stored)
                    .unwrap()
            })
            .sum();
        prop_assert!(paid <= rate * blocks as u128);
    }
}
