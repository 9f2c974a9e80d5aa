use crate::domain::bidding::{
    place_bid, place_double, resolve_first_bidder, start_round, BidOutcome, DoubleOutcome,
};
use crate::domain::rules::{FirstBidder, RuleConfig, HAND_SIZE};
use crate::domain::seed_derivation::derive_first_bidder;
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::started_round;
use crate::domain::{deal, Deal};
use crate::errors::domain::{DomainError, ValidationKind};

fn outbid_rules() -> RuleConfig {
    RuleConfig {
        outbid: true,
        ..RuleConfig::default()
    }
}

#[test]
fn simple_variant_first_accept_takes_landlord() {
    let mut state = started_round(RuleConfig::default(), 7);
    assert_eq!(state.phase, Phase::Bidding);
    assert_eq!(state.turn, Some(0));

    assert_eq!(
        place_bid(&mut state, 0, false).unwrap(),
        BidOutcome::Continue { next: 1 }
    );
    let bottom = state.bottom.clone();
    let outcome = place_bid(&mut state, 1, true).unwrap();
    assert_eq!(
        outcome,
        BidOutcome::LandlordAssigned {
            landlord: 1,
            bottom: bottom.clone()
        }
    );

    assert_eq!(state.landlord, Some(1));
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.turn, Some(1));
    assert!(state.bottom_revealed);
    assert_eq!(state.hands[1].len(), HAND_SIZE + 3);
    assert!(bottom.iter().all(|c| state.hands[1].contains(c)));
    assert_eq!(state.bid_multiplier, 1);
    assert!(state.conserves_deck());
}

#[test]
fn outbid_last_acceptor_wins_and_raises() {
    let mut state = started_round(outbid_rules(), 11);
    place_bid(&mut state, 0, true).unwrap();
    assert_eq!(state.bid_multiplier, 1);
    place_bid(&mut state, 1, false).unwrap();
    let outcome = place_bid(&mut state, 2, true).unwrap();

    assert!(matches!(outcome, BidOutcome::LandlordAssigned { landlord: 2, .. }));
    assert_eq!(state.bid_multiplier, 2);
}

#[test]
fn outbid_all_accept_doubles_twice() {
    let mut state = started_round(outbid_rules(), 12);
    for seat in 0..3 {
        place_bid(&mut state, seat, true).unwrap();
    }
    assert_eq!(state.landlord, Some(2));
    assert_eq!(state.bid_multiplier, 4);
}

#[test]
fn outbid_raise_respects_cap() {
    let rules = RuleConfig {
        max_multiplier: 2,
        ..outbid_rules()
    };
    let mut state = started_round(rules, 13);
    for seat in 0..3 {
        place_bid(&mut state, seat, true).unwrap();
    }
    assert_eq!(state.bid_multiplier, 2);
}

#[test]
fn all_decline_requires_redeal() {
    let mut state = started_round(RuleConfig::default(), 3);
    place_bid(&mut state, 0, false).unwrap();
    place_bid(&mut state, 1, false).unwrap();
    let outcome = place_bid(&mut state, 2, false).unwrap();

    assert_eq!(outcome, BidOutcome::RedealRequired);
    assert_eq!(state.phase, Phase::Dealing);
    assert!(state.turn.is_none());
    assert!(state.landlord.is_none());

    // A fresh deal may now be loaded.
    start_round(&mut state, deal(Some(4)).unwrap()).unwrap();
    assert_eq!(state.phase, Phase::Bidding);
    assert_eq!(state.deal_seed, Some(4));
    assert_eq!(state.bidding.decided, 0);
}

#[test]
fn out_of_turn_bid_is_rejected_without_mutation() {
    let mut state = started_round(RuleConfig::default(), 5);
    let before = state.clone();
    let err = place_bid(&mut state, 2, true).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(state, before);
}

#[test]
fn bid_outside_bidding_phase_is_rejected() {
    let mut state = GameState::new(RuleConfig::default());
    let err = place_bid(&mut state, 0, true).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn invalid_seat_is_rejected() {
    let mut state = started_round(RuleConfig::default(), 5);
    let err = place_bid(&mut state, 3, true).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InvalidSeat));
}

#[test]
fn start_round_twice_is_a_phase_mismatch() {
    let mut state = started_round(RuleConfig::default(), 1);
    let err = start_round(&mut state, deal(Some(2)).unwrap()).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn start_round_rejects_broken_partition() {
    let mut d = deal(Some(9)).unwrap();
    let dup = d.hands[0][0];
    d.hands[1][0] = dup;
    let mut state = GameState::new(RuleConfig::default());
    let err = start_round(&mut state, d).unwrap_err();
    assert!(matches!(err, DomainError::Precondition(_)));
    assert_eq!(state.phase, Phase::Dealing);
}

#[test]
fn start_round_rejects_short_hand() {
    let mut d: Deal = deal(Some(9)).unwrap();
    d.hands[2].pop();
    let mut state = GameState::new(RuleConfig::default());
    assert!(matches!(
        start_round(&mut state, d),
        Err(DomainError::Precondition(_))
    ));
}

#[test]
fn random_first_bidder_follows_deal_seed() {
    for seed in [1u64, 2, 3, 99, 12345] {
        let rules = RuleConfig {
            first_bidder: FirstBidder::Random,
            ..RuleConfig::default()
        };
        let state = started_round(rules, seed);
        assert_eq!(state.turn, Some(derive_first_bidder(seed)));
        assert_eq!(state.bidding.first_bidder, derive_first_bidder(seed));
    }
}

#[test]
fn configured_first_bidder_out_of_range_is_precondition() {
    let err = resolve_first_bidder(FirstBidder::Seat(5), 0).unwrap_err();
    assert!(matches!(err, DomainError::Precondition(_)));
}

#[test]
fn doubling_starts_with_landlord_and_multiplies() {
    let rules = RuleConfig {
        doubling: true,
        first_bidder: FirstBidder::Seat(2),
        ..RuleConfig::default()
    };
    let mut state = started_round(rules, 21);
    place_bid(&mut state, 2, false).unwrap();
    place_bid(&mut state, 0, true).unwrap();
    assert_eq!(state.phase, Phase::Doubling);
    assert_eq!(state.turn, Some(0));

    let err = place_double(&mut state, 1, true).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));

    assert_eq!(
        place_double(&mut state, 0, true).unwrap(),
        DoubleOutcome::Continue { next: 1 }
    );
    place_double(&mut state, 1, false).unwrap();
    let outcome = place_double(&mut state, 2, true).unwrap();
    assert_eq!(outcome, DoubleOutcome::Complete { score_multiplier: 4 });
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.turn, Some(0));
}

#[test]
fn double_outside_doubling_is_rejected() {
    let mut state = started_round(RuleConfig::default(), 2);
    place_bid(&mut state, 0, true).unwrap();
    let err = place_double(&mut state, 0, true).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}
