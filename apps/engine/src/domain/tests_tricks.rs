use crate::domain::combos::ComboKind;
use crate::domain::rules::RuleConfig;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{cards, playing_state};
use crate::domain::tricks::{auto_resolve_play, is_leading, legal_plays, pass, play_cards};
use crate::domain::Rank;
use crate::errors::domain::ValidationKind;

fn table() -> crate::domain::state::GameState {
    playing_state(
        [
            cards(&["3C", "3D", "5C", "9H", "KS"]),
            cards(&["4C", "4D", "7C", "7D", "7H", "7S"]),
            cards(&["6C", "6D", "QH", "SJ", "BJ"]),
        ],
        0,
        0,
    )
}

#[test]
fn leader_cannot_pass() {
    let mut state = table();
    assert!(is_leading(&state));
    let err = pass(&mut state, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CannotPassOnLead));
}

#[test]
fn follow_must_beat_same_shape() {
    let mut state = table();
    let r = play_cards(&mut state, 0, &cards(&["3C", "3D"])).unwrap();
    assert_eq!(r.combo.kind, ComboKind::Pair);
    assert_eq!(r.cards_left, 3);
    assert_eq!(state.turn, Some(1));

    // A single does not answer a pair.
    let err = play_cards(&mut state, 1, &cards(&["7C"])).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InsufficientToBeat));

    play_cards(&mut state, 1, &cards(&["4C", "4D"])).unwrap();
    let err = play_cards(&mut state, 2, &cards(&["QH"])).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::InsufficientToBeat));
    play_cards(&mut state, 2, &cards(&["6C", "6D"])).unwrap();
    assert_eq!(state.last_play.as_ref().map(|p| p.seat), Some(2));
}

#[test]
fn bomb_and_rocket_override_shapes() {
    let mut state = table();
    play_cards(&mut state, 0, &cards(&["3C", "3D"])).unwrap();
    let r = play_cards(&mut state, 1, &cards(&["7C", "7D", "7H", "7S"])).unwrap();
    assert_eq!(r.combo.kind, ComboKind::Bomb);
    let r = play_cards(&mut state, 2, &cards(&["SJ", "BJ"])).unwrap();
    assert_eq!(r.combo.kind, ComboKind::Rocket);
    assert!(!r.bomb_doubled);
    assert_eq!(state.score_multiplier, 1);
}

#[test]
fn bombs_double_when_enabled() {
    let mut state = table();
    state.rules = RuleConfig {
        bombs_double: true,
        ..RuleConfig::default()
    };
    play_cards(&mut state, 0, &cards(&["5C"])).unwrap();
    let r = play_cards(&mut state, 1, &cards(&["7C", "7D", "7H", "7S"])).unwrap();
    assert!(r.bomb_doubled);
    play_cards(&mut state, 2, &cards(&["SJ", "BJ"])).unwrap();
    assert_eq!(state.score_multiplier, 4);
}

#[test]
fn two_passes_reset_trick_to_last_player() {
    let mut state = table();
    play_cards(&mut state, 0, &cards(&["KS"])).unwrap();
    let r = pass(&mut state, 1).unwrap();
    assert!(!r.trick_reset);
    assert_eq!(state.consecutive_passes, 1);
    let r = pass(&mut state, 2).unwrap();
    assert!(r.trick_reset);
    assert_eq!(r.next, 0);
    assert!(state.last_play.is_none());
    assert_eq!(state.consecutive_passes, 0);
    assert_eq!(state.turn, Some(0));

    // The leader leads again and cannot pass.
    let err = pass(&mut state, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CannotPassOnLead));
}

#[test]
fn play_after_pass_clears_pass_count() {
    let mut state = table();
    play_cards(&mut state, 0, &cards(&["5C"])).unwrap();
    pass(&mut state, 1).unwrap();
    play_cards(&mut state, 2, &cards(&["QH"])).unwrap();
    assert_eq!(state.consecutive_passes, 0);
    pass(&mut state, 0).unwrap();
    pass(&mut state, 1).unwrap();
    assert_eq!(state.turn, Some(2));
    assert!(state.last_play.is_none());
}

#[test]
fn rejections_leave_state_untouched() {
    let mut state = table();
    let before = state.clone();

    let err = play_cards(&mut state, 1, &cards(&["4C"])).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    let err = play_cards(&mut state, 0, &cards(&["AS"])).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::CardsNotInHand));
    let err = play_cards(&mut state, 0, &cards(&["3C", "5C"])).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::IllegalCombination));
    let err = play_cards(&mut state, 0, &[]).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::IllegalCombination));

    assert_eq!(state, before);
}

#[test]
fn rejection_precedence_turn_before_holdings() {
    let mut state = table();
    // Seat 1 does not hold AS and it is not seat 1's turn: turn wins.
    let err = play_cards(&mut state, 1, &cards(&["AS"])).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    // Phase outranks turn.
    state.phase = Phase::Bidding;
    let err = play_cards(&mut state, 1, &cards(&["AS"])).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn emptying_hand_settles_round() {
    let mut state = playing_state(
        [cards(&["3C"]), cards(&["4C", "5C"]), cards(&["6C", "7C"])],
        1,
        0,
    );
    let r = play_cards(&mut state, 0, &cards(&["3C"])).unwrap();
    assert_eq!(r.winner, Some(0));
    assert_eq!(state.phase, Phase::Settled);
    assert_eq!(state.winner, Some(0));
    assert!(state.turn.is_none());
    let err = pass(&mut state, 1).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn legal_plays_respect_table() {
    let mut state = table();
    let lead = legal_plays(&state, 0);
    assert!(lead.iter().any(|c| c.kind == ComboKind::Pair));
    play_cards(&mut state, 0, &cards(&["KS"])).unwrap();
    let follow = legal_plays(&state, 1);
    // Only the bomb beats a king from seat 1's hand.
    assert_eq!(follow.len(), 1);
    assert_eq!(follow[0].kind, ComboKind::Bomb);
    let follow = legal_plays(&state, 2);
    assert!(follow.iter().all(|c| c.power > Rank::King || c.kind.is_bomb_like()));
}

#[test]
fn auto_resolve_passes_or_leads_lowest() {
    let mut state = table();
    assert_eq!(auto_resolve_play(&state, 0).unwrap(), Some(cards(&["3C"])));
    play_cards(&mut state, 0, &cards(&["3C"])).unwrap();
    assert_eq!(auto_resolve_play(&state, 1).unwrap(), None);
    let err = auto_resolve_play(&state, 2).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
}
