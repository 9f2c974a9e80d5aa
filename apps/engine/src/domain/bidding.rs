//! Landlord bidding and the post-reveal doubling sub-phase.

use tracing::{debug, info};

use super::cards_logic::full_deck;
use super::dealing::Deal;
use super::rules::{capped_double, FirstBidder, BOTTOM_SIZE, HAND_SIZE, PLAYERS};
use super::seed_derivation::derive_first_bidder;
use super::Card;
use super::state::{
    next_seat, require_landlord, require_phase, require_turn_of, BiddingRecord, GameState, Phase,
    Seat,
};
use crate::errors::domain::DomainError;

/// Outcome of a single bid decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidOutcome {
    /// Bidding continues with `next`.
    Continue { next: Seat },
    /// A landlord was chosen and the bottom merged into their hand.
    LandlordAssigned { landlord: Seat, bottom: Vec<Card> },
    /// Every seat declined. The state is back in `Dealing`.
    RedealRequired,
}

/// Outcome of a single double decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoubleOutcome {
    Continue { next: Seat },
    /// All seats spoke; play starts with the landlord.
    Complete { score_multiplier: u32 },
}

/// Resolve the opening bidder for a deal under the configured policy.
pub fn resolve_first_bidder(first: FirstBidder, deal_seed: u64) -> Result<Seat, DomainError> {
    match first {
        FirstBidder::Seat(seat) if (seat as usize) < PLAYERS => Ok(seat),
        FirstBidder::Seat(seat) => Err(DomainError::precondition(format!(
            "First bidder seat {seat} out of range"
        ))),
        FirstBidder::Random => Ok(derive_first_bidder(deal_seed)),
    }
}

/// Load `deal` into `state` and open bidding.
///
/// Allowed from `Dealing` only, either on a fresh state or after everyone
/// declined. Multipliers and records reset; rules are kept.
pub fn start_round(state: &mut GameState, deal: Deal) -> Result<Seat, DomainError> {
    require_phase(state, Phase::Dealing)?;
    validate_partition(&deal)?;
    let first = resolve_first_bidder(state.rules.first_bidder, deal.seed)?;

    let rules = state.rules.clone();
    *state = GameState::new(rules);
    state.deal_seed = Some(deal.seed);
    state.hands = deal.hands;
    state.bottom = deal.bottom;
    state.phase = Phase::Bidding;
    state.turn = Some(first);
    state.bidding = BiddingRecord {
        first_bidder: first,
        ..BiddingRecord::default()
    };

    info!(seed = deal.seed, first_bidder = first, "Round started");
    Ok(first)
}

fn validate_partition(deal: &Deal) -> Result<(), DomainError> {
    if deal.hands.iter().any(|h| h.len() != HAND_SIZE) || deal.bottom.len() != BOTTOM_SIZE {
        return Err(DomainError::precondition(
            "Deal must hold three 17-card hands and a 3-card bottom",
        ));
    }
    let mut all: Vec<Card> = deal.hands.iter().flatten().copied().collect();
    all.extend(deal.bottom.iter().copied());
    all.sort();
    let mut deck = full_deck();
    deck.sort();
    if all != deck {
        return Err(DomainError::precondition(
            "Hands and bottom do not partition the deck",
        ));
    }
    Ok(())
}

/// Record `seat`'s accept/decline.
///
/// Simple variant: the first accept takes the landlord role. Outbid variant:
/// every seat speaks once, each accept after the first doubles the bid
/// multiplier, and the last acceptor becomes landlord.
pub fn place_bid(state: &mut GameState, seat: Seat, accept: bool) -> Result<BidOutcome, DomainError> {
    require_phase(state, Phase::Bidding)?;
    require_turn_of(state, seat)?;

    state.bidding.decisions[seat as usize] = Some(accept);
    state.bidding.decided += 1;

    if accept {
        if !state.rules.outbid {
            return Ok(assign_landlord(state, seat));
        }
        if state.bidding.provisional.is_some() {
            state.bid_multiplier = capped_double(state.bid_multiplier, state.rules.max_multiplier);
        }
        state.bidding.provisional = Some(seat);
    }
    debug!(seat, accept, bid_multiplier = state.bid_multiplier, "Bid recorded");

    if (state.bidding.decided as usize) < PLAYERS {
        let next = next_seat(seat);
        state.turn = Some(next);
        return Ok(BidOutcome::Continue { next });
    }

    match state.bidding.provisional {
        Some(landlord) => Ok(assign_landlord(state, landlord)),
        None => {
            state.phase = Phase::Dealing;
            state.turn = None;
            info!(seed = ?state.deal_seed, "All seats declined; re-deal required");
            Ok(BidOutcome::RedealRequired)
        }
    }
}

fn assign_landlord(state: &mut GameState, landlord: Seat) -> BidOutcome {
    let bottom = state.bottom.clone();
    let hand = &mut state.hands[landlord as usize];
    hand.extend(bottom.iter().copied());
    hand.sort();
    state.bottom_revealed = true;
    state.landlord = Some(landlord);
    state.turn = Some(landlord);
    state.phase = if state.rules.doubling {
        Phase::Doubling
    } else {
        Phase::Playing
    };
    info!(
        landlord,
        bid_multiplier = state.bid_multiplier,
        "Landlord assigned, bottom revealed"
    );
    BidOutcome::LandlordAssigned { landlord, bottom }
}

/// Record `seat`'s double decision. The landlord speaks first.
pub fn place_double(
    state: &mut GameState,
    seat: Seat,
    accept: bool,
) -> Result<DoubleOutcome, DomainError> {
    require_phase(state, Phase::Doubling)?;
    require_turn_of(state, seat)?;
    let landlord = require_landlord(state, "place_double")?;

    state.doubling.decisions[seat as usize] = Some(accept);
    state.doubling.decided += 1;
    if accept {
        state.score_multiplier =
            capped_double(state.score_multiplier, state.rules.max_multiplier);
    }
    debug!(seat, accept, score_multiplier = state.score_multiplier, "Double recorded");

    if (state.doubling.decided as usize) < PLAYERS {
        let next = next_seat(seat);
        state.turn = Some(next);
        return Ok(DoubleOutcome::Continue { next });
    }

    state.phase = Phase::Playing;
    state.turn = Some(landlord);
    Ok(DoubleOutcome::Complete {
        score_multiplier: state.score_multiplier,
    })
}
