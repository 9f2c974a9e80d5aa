//! Property tests for whole rounds driven through `apply_command`.
//!
//! Properties tested:
//! - hands, played cards and the hidden bottom always form one deck
//! - a round ends within a bounded number of actions
//! - two consecutive passes always clear the table
//! - settled rounds are zero-sum under farmer cooperation

use proptest::prelude::*;

use crate::domain::commands::{apply_command, Command, DealCards};
use crate::domain::events::EngineEvent;
use crate::domain::rules::{DECK_SIZE, PLAYERS};
use crate::domain::state::{GameState, Phase};
use crate::domain::tricks::legal_plays;
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every deal partitions the deck
    #[test]
    fn prop_deal_partitions_deck(d in test_gens::arb_deal()) {
        let mut all: Vec<_> = d.hands.iter().flatten().copied().collect();
        all.extend(d.bottom.iter().copied());
        prop_assert_eq!(all.len(), DECK_SIZE);
        all.sort();
        all.dedup();
        prop_assert_eq!(all.len(), DECK_SIZE);
    }

    /// Property: arbitrary legal choices always reach a consistent end
    #[test]
    fn prop_round_terminates_consistently(
        d in test_gens::arb_deal(),
        rules in test_gens::rule_config(),
        bids in proptest::collection::vec(any::<bool>(), PLAYERS),
        doubles in proptest::collection::vec(any::<bool>(), PLAYERS),
        choices in proptest::collection::vec(any::<u16>(), 200),
    ) {
        let coop = rules.farmer_coop;
        let mut state = apply_command(
            &GameState::new(rules),
            Command::Deal { deal: DealCards::from(d) },
        ).unwrap().state;

        while state.phase == Phase::Bidding {
            let seat = state.turn.unwrap();
            let accept = bids[seat as usize];
            state = apply_command(&state, Command::Bid { seat, accept }).unwrap().state;
            prop_assert!(state.conserves_deck());
        }
        if state.phase == Phase::Dealing {
            prop_assert!(bids.iter().all(|b| !b));
            return Ok(());
        }

        while state.phase == Phase::Doubling {
            let seat = state.turn.unwrap();
            let accept = doubles[seat as usize];
            state = apply_command(&state, Command::Double { seat, accept }).unwrap().state;
        }

        let start_cards = state.cards_remaining();
        let mut plays = 0usize;
        let mut actions = 0usize;
        let mut settled_result = None;
        while state.phase == Phase::Playing {
            let seat = state.turn.unwrap();
            let options = legal_plays(&state, seat);
            let can_pass = state.last_play.is_some();
            let pick = choices[actions % choices.len()] as usize;
            let cmd = if can_pass && (options.is_empty() || pick % 3 == 0) {
                Command::Pass { seat }
            } else {
                prop_assert!(!options.is_empty(), "leader always has a play");
                let combo = &options[pick % options.len()];
                plays += 1;
                Command::Play { seat, cards: combo.cards.clone() }
            };
            let was_pass = matches!(cmd, Command::Pass { .. });
            let passes_before = state.consecutive_passes;

            let t = apply_command(&state, cmd).unwrap();
            state = t.state;
            actions += 1;

            prop_assert!(state.conserves_deck());
            if was_pass && passes_before == 1 {
                prop_assert!(state.last_play.is_none());
                let reset = t
                    .events
                    .iter()
                    .any(|e| matches!(e, EngineEvent::TrickReset { .. }));
                prop_assert!(reset, "second pass must reset the trick");
            }
            for e in t.events {
                if let EngineEvent::RoundResult { result } = e {
                    settled_result = Some(result);
                }
            }
            prop_assert!(plays <= start_cards);
            prop_assert!(actions <= 3 * start_cards);
        }

        prop_assert_eq!(state.phase, Phase::Settled);
        let result = settled_result.unwrap();
        prop_assert!(state.hands[result.winner as usize].is_empty());
        prop_assert!(result.multiplier <= state.rules.max_multiplier);
        if coop {
            prop_assert_eq!(result.deltas.iter().sum::<i64>(), 0);
        }
    }
}
