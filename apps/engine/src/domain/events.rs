//! Outbound engine events.
//!
//! Events are produced alongside each accepted command and are meant for
//! rendering and logging collaborators. `TurnBecame` is derived by comparing
//! the state before and after a transition.

use serde::{Deserialize, Serialize};

use super::combos::Combination;
use super::scoring::RoundResult;
use super::state::{GameState, Phase, Seat};
use super::Card;

/// Rating track an update applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingRole {
    Overall,
    Landlord,
    Farmer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    RoundStarted {
        deal_seed: u64,
        first_bidder: Seat,
    },
    BidDecision {
        seat: Seat,
        accept: bool,
        bid_multiplier: u32,
    },
    RedealRequired {
        deal_seed: u64,
    },
    Revealed {
        landlord: Seat,
        bottom: Vec<Card>,
    },
    DoubleDecision {
        seat: Seat,
        accept: bool,
        score_multiplier: u32,
    },
    Played {
        seat: Seat,
        combo: Combination,
        cards_left: usize,
        /// Score multiplier after the play; moves only under `bombs_double`.
        score_multiplier: u32,
        bomb_doubled: bool,
    },
    Passed {
        seat: Seat,
    },
    TrickReset {
        leader: Seat,
    },
    TurnBecame {
        seat: Seat,
    },
    RoundResult {
        result: RoundResult,
    },
    RatingUpdated {
        seat: Seat,
        identity: String,
        role: RatingRole,
        mu_before: f64,
        sigma_before: f64,
        mu_after: f64,
        sigma_after: f64,
    },
    RatingSkipped {
        identity: String,
        reason: String,
    },
}

/// Emit `TurnBecame` when the seat to act changed, or when the phase changed
/// and someone must act.
pub fn derive_turn_change(before: &GameState, after: &GameState) -> Option<EngineEvent> {
    if after.phase == Phase::Settled || after.phase == Phase::Dealing {
        return None;
    }
    let seat = after.turn?;
    if before.turn != after.turn || before.phase != after.phase {
        Some(EngineEvent::TurnBecame { seat })
    } else {
        None
    }
}
