//! Property tests for lifecycle rules (pure domain, no DB).
//!
//! Lifecycle contract:
//! - The pot always equals the sum of stakes of deposited players
//! - Depositing is idempotent at the flag level
//! - Activation fires exactly when the last player deposits, never on a join

use proptest::prelude::*;

use crate::domain::lifecycle::{all_deposited, total_pot, PlayerStake};
use crate::domain::payout::compute_payout;
use crate::entities::games::GameStatus;

fn stakes_strategy() -> impl Strategy<Value = Vec<PlayerStake>> {
    (1usize..8, 1i64..=10_000).prop_flat_map(|(n, amount)| {
        proptest::collection::vec(any::<bool>(), n).prop_map(move |flags| {
            flags
                .iter()
                .enumerate()
                .map(|(i, &deposited)| PlayerStake {
                    player_id: (i as i64) + 1,
                    deposit_amount: amount,
                    has_deposited: deposited,
                })
                .collect()
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the pot is exactly the sum over deposited players.
    #[test]
    fn prop_pot_equals_sum_of_deposited_stakes(stakes in stakes_strategy()) {
        let expected: i64 = stakes
            .iter()
            .filter(|s| s.has_deposited)
            .map(|s| s.deposit_amount)
            .sum();
        prop_assert_eq!(total_pot(&stakes), expected);
    }

    /// Property: a second deposit for an already-deposited player changes
    /// neither the pot nor the activation condition.
    #[test]
    fn prop_second_deposit_is_a_no_op(
        stakes in stakes_strategy(),
        idx in any::<prop::sample::Index>(),
    ) {
        let mut stakes = stakes;
        let i = idx.index(stakes.len());
        stakes[i].has_deposited = true;

        let pot_once = total_pot(&stakes);
        let active_once = all_deposited(&stakes);

        stakes[i].has_deposited = true;
        prop_assert_eq!(total_pot(&stakes), pot_once);
        prop_assert_eq!(all_deposited(&stakes), active_once);
    }

    /// Property: with N players the game activates on the Nth deposit and
    /// not a moment earlier, with the pot growing one stake at a time.
    #[test]
    fn prop_activation_fires_exactly_on_last_deposit(
        n in 1usize..8,
        amount in 1i64..=10_000,
    ) {
        let mut stakes: Vec<PlayerStake> = (0..n)
            .map(|i| PlayerStake {
                player_id: (i as i64) + 1,
                deposit_amount: amount,
                has_deposited: false,
            })
            .collect();

        for i in 0..n {
            prop_assert!(!all_deposited(&stakes),
                "game must stay pending before deposit {}", i + 1);
            stakes[i].has_deposited = true;
            prop_assert_eq!(total_pot(&stakes), amount * ((i as i64) + 1));
        }
        prop_assert!(all_deposited(&stakes));
    }

    /// Property: a join appends a not-yet-deposited player, so it can never
    /// make the activation condition true, and it leaves the pot unchanged.
    #[test]
    fn prop_joining_never_activates(
        stakes in stakes_strategy(),
        amount in 1i64..=10_000,
    ) {
        let mut stakes = stakes;
        let pot_before = total_pot(&stakes);
        let next_id = stakes.iter().map(|s| s.player_id).max().unwrap_or(0) + 1;

        stakes.push(PlayerStake {
            player_id: next_id,
            deposit_amount: amount,
            has_deposited: false,
        });

        prop_assert!(!all_deposited(&stakes));
        prop_assert_eq!(total_pot(&stakes), pot_before);
    }

    /// Property: once completed, the settlement pays out exactly the pot plus
    /// the yield when every player has deposited.
    #[test]
    fn prop_settlement_conserves_pot_and_yield(
        n in 1usize..8,
        amount in 1i64..=10_000,
        current_yield in 0i64..=100_000,
        winner_idx in any::<prop::sample::Index>(),
    ) {
        let stakes: Vec<PlayerStake> = (0..n)
            .map(|i| PlayerStake {
                player_id: (i as i64) + 1,
                deposit_amount: amount,
                has_deposited: true,
            })
            .collect();
        let pot = total_pot(&stakes);
        let winner_id = stakes[winner_idx.index(stakes.len())].player_id;

        let breakdown =
            compute_payout(GameStatus::Completed, pot, current_yield, Some(winner_id), &stakes);
        let paid: i64 = breakdown.lines.iter().map(|l| l.total).sum();

        prop_assert_eq!(paid, pot + current_yield);
        prop_assert_eq!(breakdown.unassigned_yield, 0);
    }
}
