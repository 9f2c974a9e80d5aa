use proptest::prelude::*;

use crate::domain::scoring::{final_multiplier, score_deltas, settle};
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{cards, playing_state};
use crate::domain::tricks::play_cards;
use crate::domain::{test_gens, test_prelude};
use crate::errors::domain::ValidationKind;

#[test]
fn landlord_win_at_unit_multiplier() {
    assert_eq!(score_deltas(0, 0, 1, true), [2, -1, -1]);
}

#[test]
fn farmer_win_at_unit_multiplier() {
    assert_eq!(score_deltas(0, 2, 1, true), [-2, 1, 1]);
    assert_eq!(score_deltas(1, 0, 1, true), [1, -2, 1]);
}

#[test]
fn farmer_win_without_cooperation_pays_only_winner() {
    assert_eq!(score_deltas(0, 2, 3, false), [-3, 0, 3]);
    // Landlord wins are unaffected by the cooperation flag.
    assert_eq!(score_deltas(2, 2, 3, false), [-3, -3, 6]);
}

#[test]
fn final_multiplier_is_capped() {
    assert_eq!(final_multiplier(2, 4, 64), 8);
    assert_eq!(final_multiplier(16, 16, 64), 64);
    assert_eq!(final_multiplier(u32::MAX, 2, 64), 64);
}

#[test]
fn settle_reads_state() {
    let mut state = playing_state([cards(&["3C"]), cards(&["4C"]), cards(&["5C"])], 1, 0);
    state.bid_multiplier = 2;
    state.score_multiplier = 2;

    let err = settle(&state).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));

    play_cards(&mut state, 0, &cards(&["3C"])).unwrap();
    assert_eq!(state.phase, Phase::Settled);
    let result = settle(&state).unwrap();
    assert_eq!(result.landlord, 1);
    assert_eq!(result.winner, 0);
    assert!(!result.landlord_won);
    assert_eq!(result.multiplier, 4);
    assert_eq!(result.deltas, [4, -8, 4]);
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every settlement is a zero-sum transfer
    #[test]
    fn prop_deltas_sum_to_zero(
        landlord in 0u8..3,
        winner in 0u8..3,
        m in test_gens::multiplier(),
        coop in any::<bool>(),
    ) {
        let deltas = score_deltas(landlord, winner, m, coop);
        prop_assert_eq!(deltas.iter().sum::<i64>(), 0);
        let landlord_delta = deltas[landlord as usize];
        if winner == landlord {
            prop_assert_eq!(landlord_delta, 2 * m as i64);
        } else {
            prop_assert!(landlord_delta < 0);
            prop_assert!(deltas[winner as usize] > 0);
        }
    }
}
