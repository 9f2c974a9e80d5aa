use serde::{Deserialize, Serialize};

use super::cards_logic::full_deck;
use super::combos::Combination;
use super::rules::{RuleConfig, PLAYERS};
use super::Card;
use crate::errors::domain::{DomainError, ValidationKind};

pub type Seat = u8; // 0..=2

/// Round progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No cards dealt yet, or everyone declined and a re-deal is due.
    Dealing,
    /// Seats accept or decline the landlord role in turn.
    Bidding,
    /// Optional post-reveal doubling, landlord first.
    Doubling,
    /// Trick play until a hand empties.
    Playing,
    /// A seat emptied its hand; the round is over.
    Settled,
}

/// The combination currently on the table and who played it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePlay {
    pub seat: Seat,
    pub combo: Combination,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiddingRecord {
    pub first_bidder: Seat,
    /// Accept/decline per seat, in seat order.
    pub decisions: [Option<bool>; PLAYERS],
    pub decided: u8,
    /// Highest accepting seat so far (outbid variant).
    pub provisional: Option<Seat>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoublingRecord {
    pub decisions: [Option<bool>; PLAYERS],
    pub decided: u8,
}

/// Entire round container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub rules: RuleConfig,
    /// Seed of the current deal.
    pub deal_seed: Option<u64>,
    pub hands: [Vec<Card>; PLAYERS],
    /// Face-down until a landlord is assigned, then merged into that hand.
    pub bottom: Vec<Card>,
    pub bottom_revealed: bool,
    pub landlord: Option<Seat>,
    pub bid_multiplier: u32,
    pub score_multiplier: u32,
    /// Seat expected to act; `None` when nobody can act.
    pub turn: Option<Seat>,
    /// `None` while awaiting a lead.
    pub last_play: Option<TablePlay>,
    pub consecutive_passes: u8,
    pub bidding: BiddingRecord,
    pub doubling: DoublingRecord,
    pub winner: Option<Seat>,
    /// Every card played this round, in order.
    pub played: Vec<Card>,
}

impl GameState {
    /// Fresh state awaiting a deal.
    pub fn new(rules: RuleConfig) -> Self {
        Self {
            phase: Phase::Dealing,
            rules,
            deal_seed: None,
            hands: Default::default(),
            bottom: Vec::new(),
            bottom_revealed: false,
            landlord: None,
            bid_multiplier: 1,
            score_multiplier: 1,
            turn: None,
            last_play: None,
            consecutive_passes: 0,
            bidding: BiddingRecord::default(),
            doubling: DoublingRecord::default(),
            winner: None,
            played: Vec::new(),
        }
    }

    pub fn is_farmer(&self, seat: Seat) -> bool {
        self.landlord.is_some_and(|l| l != seat)
    }

    /// Cards still held across all seats.
    pub fn cards_remaining(&self) -> usize {
        self.hands.iter().map(Vec::len).sum()
    }

    /// Hands, played cards and the unrevealed bottom together form exactly
    /// one deck.
    pub fn conserves_deck(&self) -> bool {
        if self.phase == Phase::Dealing && self.deal_seed.is_none() {
            return true;
        }
        let mut all: Vec<Card> = self.hands.iter().flatten().copied().collect();
        all.extend(self.played.iter().copied());
        if !self.bottom_revealed {
            all.extend(self.bottom.iter().copied());
        }
        all.sort();
        let mut deck = full_deck();
        deck.sort();
        all == deck
    }
}

/// Seat / turn math helpers (3 fixed seats: 0..=2).
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    ((seat as i16 + delta as i16).rem_euclid(PLAYERS as i16)) as Seat
}

/// Returns the next seat in rotation (0 → 1 → 2 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Returns the previous seat (0 ← 1 ← 2 ← 0).
#[inline]
pub fn prev_seat(seat: Seat) -> Seat {
    seat_offset(seat, -1)
}

/// The two seats other than `seat`, in rotation order.
pub fn other_seats(seat: Seat) -> [Seat; 2] {
    [next_seat(seat), seat_offset(seat, 2)]
}

pub fn validate_seat(seat: Seat) -> Result<(), DomainError> {
    if (seat as usize) < PLAYERS {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidSeat,
            format!("Seat {seat} out of range"),
        ))
    }
}

pub fn require_phase(state: &GameState, phase: Phase) -> Result<(), DomainError> {
    if state.phase == phase {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Expected {phase:?}, round is in {:?}", state.phase),
        ))
    }
}

/// Check that `seat` is valid and is the seat expected to act.
pub fn require_turn_of(state: &GameState, seat: Seat) -> Result<(), DomainError> {
    validate_seat(seat)?;
    let turn = state.turn.ok_or_else(|| {
        DomainError::validation_other("Invariant violated: turn must be set")
    })?;
    if turn != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("Seat {seat} acted on seat {turn}'s turn"),
        ));
    }
    Ok(())
}

pub fn require_landlord(state: &GameState, ctx: &'static str) -> Result<Seat, DomainError> {
    state.landlord.ok_or_else(|| {
        DomainError::validation_other(format!("Invariant violated: landlord must be set ({ctx})"))
    })
}
