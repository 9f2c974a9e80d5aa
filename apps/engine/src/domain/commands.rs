//! Inbound commands and the pure transition entry point.
//!
//! `apply_command` never touches its input: it works on a clone and hands
//! back the new state together with the events the command produced. A
//! rejected command therefore leaves the caller's state exactly as it was.

use serde::{Deserialize, Serialize};

use super::bidding::{place_bid, place_double, start_round, BidOutcome, DoubleOutcome};
use super::dealing::Deal;
use super::events::{derive_turn_change, EngineEvent};
use super::scoring::settle;
use super::state::{GameState, Phase, Seat};
use super::tricks::{auto_resolve_play, pass, play_cards};
use super::Card;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Deal { deal: DealCards },
    Bid { seat: Seat, accept: bool },
    Double { seat: Seat, accept: bool },
    Play { seat: Seat, cards: Vec<Card> },
    Pass { seat: Seat },
}

/// Serializable deal payload carried by `Command::Deal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealCards {
    pub hands: [Vec<Card>; 3],
    pub bottom: Vec<Card>,
    pub seed: u64,
}

impl From<Deal> for DealCards {
    fn from(d: Deal) -> Self {
        Self {
            hands: d.hands,
            bottom: d.bottom,
            seed: d.seed,
        }
    }
}

impl From<DealCards> for Deal {
    fn from(d: DealCards) -> Self {
        Self {
            hands: d.hands,
            bottom: d.bottom,
            seed: d.seed,
        }
    }
}

impl Command {
    /// Acting seat, `None` for `Deal`.
    pub fn seat(&self) -> Option<Seat> {
        match self {
            Command::Deal { .. } => None,
            Command::Bid { seat, .. }
            | Command::Double { seat, .. }
            | Command::Play { seat, .. }
            | Command::Pass { seat } => Some(*seat),
        }
    }
}

/// New state plus the events an accepted command produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GameState,
    pub events: Vec<EngineEvent>,
}

/// Apply `cmd` to a copy of `state`.
pub fn apply_command(state: &GameState, cmd: Command) -> Result<Transition, DomainError> {
    let mut next = state.clone();
    let mut events = Vec::new();

    match cmd {
        Command::Deal { deal } => {
            let deal: Deal = deal.into();
            let deal_seed = deal.seed;
            let first_bidder = start_round(&mut next, deal)?;
            events.push(EngineEvent::RoundStarted {
                deal_seed,
                first_bidder,
            });
        }
        Command::Bid { seat, accept } => {
            let outcome = place_bid(&mut next, seat, accept)?;
            events.push(EngineEvent::BidDecision {
                seat,
                accept,
                bid_multiplier: next.bid_multiplier,
            });
            match outcome {
                BidOutcome::Continue { .. } => {}
                BidOutcome::LandlordAssigned { landlord, bottom } => {
                    events.push(EngineEvent::Revealed { landlord, bottom });
                }
                BidOutcome::RedealRequired => {
                    events.push(EngineEvent::RedealRequired {
                        deal_seed: next.deal_seed.unwrap_or_default(),
                    });
                }
            }
        }
        Command::Double { seat, accept } => {
            let outcome = place_double(&mut next, seat, accept)?;
            let score_multiplier = match outcome {
                DoubleOutcome::Continue { .. } => next.score_multiplier,
                DoubleOutcome::Complete { score_multiplier } => score_multiplier,
            };
            events.push(EngineEvent::DoubleDecision {
                seat,
                accept,
                score_multiplier,
            });
        }
        Command::Play { seat, cards } => {
            let result = play_cards(&mut next, seat, &cards)?;
            events.push(EngineEvent::Played {
                seat,
                combo: result.combo,
                cards_left: result.cards_left,
                score_multiplier: next.score_multiplier,
                bomb_doubled: result.bomb_doubled,
            });
        }
        Command::Pass { seat } => {
            let result = pass(&mut next, seat)?;
            events.push(EngineEvent::Passed { seat });
            if result.trick_reset {
                events.push(EngineEvent::TrickReset {
                    leader: result.next,
                });
            }
        }
    }

    if next.phase == Phase::Settled && state.phase != Phase::Settled {
        events.push(EngineEvent::RoundResult {
            result: settle(&next)?,
        });
    }
    events.extend(derive_turn_change(state, &next));

    Ok(Transition {
        state: next,
        events,
    })
}

/// The command a timed-out or misbehaving seat is resolved with.
///
/// Bidding and doubling decline; play passes when legal and otherwise leads
/// the lowest single.
pub fn auto_command(state: &GameState, seat: Seat) -> Result<Command, DomainError> {
    match state.phase {
        Phase::Bidding => Ok(Command::Bid {
            seat,
            accept: false,
        }),
        Phase::Doubling => Ok(Command::Double {
            seat,
            accept: false,
        }),
        Phase::Playing => Ok(match auto_resolve_play(state, seat)? {
            None => Command::Pass { seat },
            Some(cards) => Command::Play { seat, cards },
        }),
        Phase::Dealing | Phase::Settled => Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("No seat acts in {:?}", state.phase),
        )),
    }
}
