use crate::domain::commands::{apply_command, auto_command, Command, DealCards};
use crate::domain::events::EngineEvent;
use crate::domain::rules::{RuleConfig, DECK_SIZE};
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::{cards, playing_state};
use crate::domain::deal;
use crate::errors::domain::ValidationKind;

fn dealt(rules: RuleConfig, seed: u64) -> GameState {
    let fresh = GameState::new(rules);
    let cmd = Command::Deal {
        deal: DealCards::from(deal(Some(seed)).unwrap()),
    };
    apply_command(&fresh, cmd).unwrap().state
}

#[test]
fn deal_command_opens_bidding() {
    let fresh = GameState::new(RuleConfig::default());
    let t = apply_command(
        &fresh,
        Command::Deal {
            deal: deal(Some(42)).unwrap().into(),
        },
    )
    .unwrap();

    assert_eq!(t.state.phase, Phase::Bidding);
    assert_eq!(
        t.events,
        vec![
            EngineEvent::RoundStarted {
                deal_seed: 42,
                first_bidder: 0
            },
            EngineEvent::TurnBecame { seat: 0 },
        ]
    );
    // Input untouched.
    assert_eq!(fresh.phase, Phase::Dealing);
}

#[test]
fn rejected_command_leaves_input_unchanged() {
    let state = dealt(RuleConfig::default(), 1);
    let before = state.clone();
    let err = apply_command(
        &state,
        Command::Bid {
            seat: 1,
            accept: true,
        },
    )
    .unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::OutOfTurn));
    assert_eq!(state, before);
}

#[test]
fn accept_emits_decision_and_reveal() {
    let state = dealt(RuleConfig::default(), 2);
    let t = apply_command(
        &state,
        Command::Bid {
            seat: 0,
            accept: true,
        },
    )
    .unwrap();
    assert!(matches!(
        t.events[0],
        EngineEvent::BidDecision {
            seat: 0,
            accept: true,
            bid_multiplier: 1
        }
    ));
    match &t.events[1] {
        EngineEvent::Revealed { landlord, bottom } => {
            assert_eq!(*landlord, 0);
            assert_eq!(bottom, &state.bottom);
        }
        other => panic!("expected reveal, got {other:?}"),
    }
    assert_eq!(t.events.last(), Some(&EngineEvent::TurnBecame { seat: 0 }));
}

#[test]
fn all_decline_emits_redeal() {
    let mut state = dealt(RuleConfig::default(), 3);
    let mut last = Vec::new();
    for seat in 0..3 {
        let t = apply_command(
            &state,
            Command::Bid {
                seat,
                accept: false,
            },
        )
        .unwrap();
        state = t.state;
        last = t.events;
    }
    assert_eq!(state.phase, Phase::Dealing);
    assert!(last.contains(&EngineEvent::RedealRequired { deal_seed: 3 }));
    assert!(!last.iter().any(|e| matches!(e, EngineEvent::TurnBecame { .. })));
}

#[test]
fn final_play_emits_round_result() {
    let state = playing_state([cards(&["3C"]), cards(&["4C"]), cards(&["5C"])], 0, 0);
    let t = apply_command(
        &state,
        Command::Play {
            seat: 0,
            cards: cards(&["3C"]),
        },
    )
    .unwrap();
    let result = t
        .events
        .iter()
        .find_map(|e| match e {
            EngineEvent::RoundResult { result } => Some(result.clone()),
            _ => None,
        })
        .expect("round result");
    assert!(result.landlord_won);
    assert_eq!(result.deltas, [2, -1, -1]);
}

#[test]
fn bomb_play_reports_raised_multiplier() {
    let mut state = playing_state(
        [cards(&["5C", "6C"]), cards(&["7C", "7D", "7H", "7S", "8C"]), cards(&["9C"])],
        0,
        0,
    );
    state.rules = RuleConfig {
        bombs_double: true,
        ..RuleConfig::default()
    };
    state = apply_command(
        &state,
        Command::Play {
            seat: 0,
            cards: cards(&["5C"]),
        },
    )
    .unwrap()
    .state;

    let t = apply_command(
        &state,
        Command::Play {
            seat: 1,
            cards: cards(&["7C", "7D", "7H", "7S"]),
        },
    )
    .unwrap();
    let played = t
        .events
        .iter()
        .find_map(|e| match e {
            EngineEvent::Played {
                score_multiplier,
                bomb_doubled,
                ..
            } => Some((*score_multiplier, *bomb_doubled)),
            _ => None,
        })
        .expect("played event");
    assert_eq!(played, (2, true));
    assert_eq!(t.state.score_multiplier, 2);
}

#[test]
fn second_pass_emits_trick_reset() {
    let mut state = playing_state(
        [cards(&["3C", "3D"]), cards(&["4C"]), cards(&["5C"])],
        0,
        0,
    );
    for cmd in [
        Command::Play {
            seat: 0,
            cards: cards(&["3C"]),
        },
        Command::Pass { seat: 1 },
    ] {
        state = apply_command(&state, cmd).unwrap().state;
    }
    let t = apply_command(&state, Command::Pass { seat: 2 }).unwrap();
    assert_eq!(
        t.events,
        vec![
            EngineEvent::Passed { seat: 2 },
            EngineEvent::TrickReset { leader: 0 },
            EngineEvent::TurnBecame { seat: 0 },
        ]
    );
}

#[test]
fn auto_commands_drive_a_round_to_completion() {
    let mut state = dealt(RuleConfig::default(), 77);
    // Seat 0 takes the landlord role so the round does not re-deal.
    state = apply_command(
        &state,
        Command::Bid {
            seat: 0,
            accept: true,
        },
    )
    .unwrap()
    .state;

    let mut steps = 0;
    while state.phase == Phase::Playing {
        let seat = state.turn.expect("someone acts while playing");
        let cmd = auto_command(&state, seat).unwrap();
        state = apply_command(&state, cmd).unwrap().state;
        assert!(state.conserves_deck());
        steps += 1;
        assert!(steps <= 3 * DECK_SIZE, "round did not terminate");
    }
    assert_eq!(state.phase, Phase::Settled);
    assert!(state.winner.is_some());
}

#[test]
fn auto_command_declines_bids_and_doubles() {
    let state = dealt(RuleConfig::default(), 5);
    assert_eq!(
        auto_command(&state, 0).unwrap(),
        Command::Bid {
            seat: 0,
            accept: false
        }
    );
    let fresh = GameState::new(RuleConfig::default());
    let err = auto_command(&fresh, 0).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::PhaseMismatch));
}

#[test]
fn commands_round_trip_through_json() {
    let cmd = Command::Play {
        seat: 1,
        cards: cards(&["TC", "BJ"]),
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains("\"command\":\"play\""));
    assert!(json.contains("\"TC\""));
    let back: Command = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cmd);
}
