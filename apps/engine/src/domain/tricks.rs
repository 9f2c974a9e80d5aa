use tracing::debug;

use super::candidates::{legal_follows, minimal_lead};
use super::cards_logic::{hand_contains_all, remove_cards};
use super::combos::{beats, classify, Combination};
use super::rules::capped_double;
use super::state::{next_seat, require_phase, require_turn_of, GameState, Phase, Seat, TablePlay};
use super::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of a successful play, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayResult {
    pub combo: Combination,
    /// Cards left in the player's hand after the play.
    pub cards_left: usize,
    /// Set when the score multiplier doubled because a bomb or rocket landed.
    pub bomb_doubled: bool,
    /// `Some(seat)` when the play emptied the hand and settled the round.
    pub winner: Option<Seat>,
}

/// Result of a successful pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassResult {
    /// Set when this was the second consecutive pass and the table cleared.
    pub trick_reset: bool,
    /// Seat to act next (the new leader after a reset).
    pub next: Seat,
}

/// True when `seat` is leading (nothing on the table to beat).
pub fn is_leading(state: &GameState) -> bool {
    state.last_play.is_none()
}

/// Combinations `seat` could legally put down now, independent of turn
/// enforcement. Empty outside `Playing`.
pub fn legal_plays(state: &GameState, seat: Seat) -> Vec<Combination> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }
    let Some(hand) = state.hands.get(seat as usize) else {
        return Vec::new();
    };
    legal_follows(
        hand,
        state.last_play.as_ref().map(|p| &p.combo),
        state.rules.four_with_two,
    )
}

/// Play `cards` for `seat`, validating before any mutation.
pub fn play_cards(
    state: &mut GameState,
    seat: Seat,
    cards: &[Card],
) -> Result<PlayResult, DomainError> {
    require_phase(state, Phase::Playing)?;
    require_turn_of(state, seat)?;

    if cards.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::IllegalCombination,
            "Empty play; pass instead",
        ));
    }
    if !hand_contains_all(&state.hands[seat as usize], cards) {
        return Err(DomainError::validation(
            ValidationKind::CardsNotInHand,
            "Cards not in hand",
        ));
    }
    let combo = classify(cards, state.rules.four_with_two)?;
    if let Some(last) = &state.last_play {
        if !beats(&combo, &last.combo) {
            return Err(DomainError::validation(
                ValidationKind::InsufficientToBeat,
                format!(
                    "{:?} at {:?} does not beat {:?} at {:?}",
                    combo.kind, combo.power, last.combo.kind, last.combo.power
                ),
            ));
        }
    }

    let hand = &mut state.hands[seat as usize];
    remove_cards(hand, &combo.cards);
    let cards_left = hand.len();
    state.played.extend(combo.cards.iter().copied());

    let bomb_doubled = state.rules.bombs_double && combo.kind.is_bomb_like();
    if bomb_doubled {
        state.score_multiplier = capped_double(state.score_multiplier, state.rules.max_multiplier);
    }

    state.last_play = Some(TablePlay {
        seat,
        combo: combo.clone(),
    });
    state.consecutive_passes = 0;

    debug!(seat, kind = ?combo.kind, power = ?combo.power, cards_left, "Cards played");

    let winner = if cards_left == 0 {
        state.phase = Phase::Settled;
        state.winner = Some(seat);
        state.turn = None;
        Some(seat)
    } else {
        state.turn = Some(next_seat(seat));
        None
    };

    Ok(PlayResult {
        combo,
        cards_left,
        bomb_doubled,
        winner,
    })
}

/// Pass for `seat`. Leading seats may not pass.
pub fn pass(state: &mut GameState, seat: Seat) -> Result<PassResult, DomainError> {
    require_phase(state, Phase::Playing)?;
    require_turn_of(state, seat)?;

    let Some(last) = &state.last_play else {
        return Err(DomainError::validation(
            ValidationKind::CannotPassOnLead,
            "Leading seat must play",
        ));
    };
    let leader = last.seat;

    state.consecutive_passes += 1;
    if state.consecutive_passes >= 2 {
        state.last_play = None;
        state.consecutive_passes = 0;
        state.turn = Some(leader);
        debug!(seat, leader, "Trick reset");
        return Ok(PassResult {
            trick_reset: true,
            next: leader,
        });
    }

    let next = next_seat(seat);
    state.turn = Some(next);
    Ok(PassResult {
        trick_reset: false,
        next,
    })
}

/// Deterministic stand-in for a seat that failed to act: pass when allowed,
/// otherwise the lowest single.
pub fn auto_resolve_play(state: &GameState, seat: Seat) -> Result<Option<Vec<Card>>, DomainError> {
    require_phase(state, Phase::Playing)?;
    require_turn_of(state, seat)?;
    if !is_leading(state) {
        return Ok(None);
    }
    let lead = minimal_lead(&state.hands[seat as usize])
        .ok_or_else(|| DomainError::validation_other("Invariant violated: leader has no cards"))?;
    Ok(Some(lead.cards))
}
