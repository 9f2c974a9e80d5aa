//! What one seat can see at a decision point.
//!
//! `SeatView` is the interface between the engine and seat controllers. It
//! carries the seat's own hand, public table state and helpers that answer
//! the rules questions, so AI seats never re-implement legality.

use serde::{Deserialize, Serialize};

use super::combos::Combination;
use super::rules::{RuleConfig, PLAYERS};
use super::state::{require_turn_of, GameState, Phase, Seat, TablePlay};
use super::tricks::legal_plays;
use super::Card;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: Seat,
    pub phase: Phase,
    pub hand: Vec<Card>,
    pub landlord: Option<Seat>,
    /// Visible only once revealed.
    pub bottom: Option<Vec<Card>>,
    pub bid_multiplier: u32,
    pub score_multiplier: u32,
    pub last_play: Option<TablePlay>,
    pub cards_left: [usize; PLAYERS],
    /// Bids already spoken this deal, by seat.
    pub bids: [Option<bool>; PLAYERS],
    pub rules: RuleConfig,
    legal: Vec<Combination>,
}

impl SeatView {
    /// Snapshot for `seat`, which must be the seat to act.
    pub fn for_seat(state: &GameState, seat: Seat) -> Result<Self, DomainError> {
        require_turn_of(state, seat)?;
        let mut cards_left = [0usize; PLAYERS];
        for (i, hand) in state.hands.iter().enumerate() {
            cards_left[i] = hand.len();
        }
        Ok(Self {
            seat,
            phase: state.phase,
            hand: state.hands[seat as usize].clone(),
            landlord: state.landlord,
            bottom: state.bottom_revealed.then(|| state.bottom.clone()),
            bid_multiplier: state.bid_multiplier,
            score_multiplier: state.score_multiplier,
            last_play: state.last_play.clone(),
            cards_left,
            bids: state.bidding.decisions,
            rules: state.rules.clone(),
            legal: legal_plays(state, seat),
        })
    }

    /// Combinations this seat may put down now.
    pub fn legal_plays(&self) -> &[Combination] {
        &self.legal
    }

    /// Passing is allowed only when following.
    pub fn can_pass(&self) -> bool {
        self.phase == Phase::Playing && self.last_play.is_some()
    }

    pub fn is_landlord(&self) -> bool {
        self.landlord == Some(self.seat)
    }

    /// True when the combination on the table was put down by a teammate.
    pub fn partner_on_table(&self) -> bool {
        match (&self.last_play, self.landlord) {
            (Some(play), Some(landlord)) => {
                play.seat != self.seat && play.seat != landlord && self.seat != landlord
            }
            _ => false,
        }
    }
}
