//! Round settlement: final multiplier and per-seat point transfer.

use serde::{Deserialize, Serialize};

use super::rules::PLAYERS;
use super::state::{other_seats, require_landlord, require_phase, GameState, Phase, Seat};
use crate::errors::domain::DomainError;

/// Settled outcome of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub landlord: Seat,
    pub winner: Seat,
    pub landlord_won: bool,
    /// Capped `bid_multiplier * score_multiplier`.
    pub multiplier: u32,
    pub deltas: [i64; PLAYERS],
}

/// `bid * score`, capped at `cap`.
pub fn final_multiplier(bid_multiplier: u32, score_multiplier: u32, cap: u32) -> u32 {
    bid_multiplier
        .saturating_mul(score_multiplier)
        .min(cap.max(1))
}

/// Per-seat deltas for a settled round.
///
/// Landlord win: landlord +2M, each farmer -M. Farmer win with cooperation:
/// each farmer +M, landlord -2M. Without cooperation only the winning farmer
/// collects M and the landlord pays M.
pub fn score_deltas(landlord: Seat, winner: Seat, multiplier: u32, farmer_coop: bool) -> [i64; PLAYERS] {
    let m = multiplier as i64;
    let mut deltas = [0i64; PLAYERS];
    if winner == landlord {
        deltas[landlord as usize] = 2 * m;
        for f in other_seats(landlord) {
            deltas[f as usize] = -m;
        }
    } else if farmer_coop {
        deltas[landlord as usize] = -2 * m;
        for f in other_seats(landlord) {
            deltas[f as usize] = m;
        }
    } else {
        deltas[landlord as usize] = -m;
        deltas[winner as usize] = m;
    }
    deltas
}

/// Settle a finished round.
pub fn settle(state: &GameState) -> Result<RoundResult, DomainError> {
    require_phase(state, Phase::Settled)?;
    let landlord = require_landlord(state, "settle")?;
    let winner = state
        .winner
        .ok_or_else(|| DomainError::validation_other("Invariant violated: winner must be set"))?;

    let multiplier = final_multiplier(
        state.bid_multiplier,
        state.score_multiplier,
        state.rules.max_multiplier,
    );
    Ok(RoundResult {
        landlord,
        winner,
        landlord_won: winner == landlord,
        multiplier,
        deltas: score_deltas(landlord, winner, multiplier, state.rules.farmer_coop),
    })
}
