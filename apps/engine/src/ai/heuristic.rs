//! Rule-of-thumb player.
//!
//! Bids on hand strength, leads its longest cheap combination, follows with
//! the weakest combination that beats the table, lets a teammate's play
//! stand and keeps bombs for when an opponent is close to going out.

use super::trait_def::{AiError, AiPlayer, PlayDecision};
use crate::domain::cards_logic::rank_counts;
use crate::domain::{Card, ComboKind, Combination, Rank, SeatView};

/// Strength at or above which the seat takes the landlord role.
const BID_THRESHOLD: u32 = 7;
/// Strength at or above which the seat doubles.
const DOUBLE_THRESHOLD: u32 = 11;
/// An opponent at or below this many cards is worth a bomb.
const DANGER_CARDS: usize = 4;

pub struct HeuristicPlayer;

impl HeuristicPlayer {
    pub const NAME: &'static str = "heuristic";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(_seed: Option<u64>) -> Self {
        Self
    }
}

/// Points for high cards and bombs.
pub fn hand_strength(hand: &[Card]) -> u32 {
    let counts = rank_counts(hand);
    let mut score = 0u32;
    for card in hand {
        score += match card.rank {
            Rank::BigJoker => 4,
            Rank::SmallJoker => 3,
            Rank::Two => 2,
            Rank::Ace => 1,
            _ => 0,
        };
    }
    score += 4 * counts.iter().filter(|&&c| c == 4).count() as u32;
    if counts[Rank::SmallJoker.value() as usize] == 1 && counts[Rank::BigJoker.value() as usize] == 1 {
        score += 2;
    }
    score
}

fn opponents_in_danger(view: &SeatView) -> bool {
    view.cards_left
        .iter()
        .enumerate()
        .filter(|&(seat, _)| seat != view.seat as usize)
        .filter(|&(seat, _)| match view.landlord {
            // Farmers only fear the landlord; the landlord fears both.
            Some(l) if l != view.seat => seat == l as usize,
            _ => true,
        })
        .any(|(_, &left)| left <= DANGER_CARDS)
}

fn lead_choice(legal: &[Combination]) -> Option<&Combination> {
    let cheap = legal.iter().filter(|c| !c.kind.is_bomb_like());
    cheap
        .max_by(|a, b| {
            a.cards
                .len()
                .cmp(&b.cards.len())
                .then_with(|| b.power.cmp(&a.power))
        })
        .or_else(|| legal.first())
}

fn weakest(legal: &[Combination], bombs: bool) -> Option<&Combination> {
    legal
        .iter()
        .filter(|c| c.kind.is_bomb_like() == bombs)
        .min_by(|a, b| a.power.cmp(&b.power).then_with(|| a.cards.len().cmp(&b.cards.len())))
}

impl AiPlayer for HeuristicPlayer {
    fn choose_bid(&self, view: &SeatView) -> Result<bool, AiError> {
        Ok(hand_strength(&view.hand) >= BID_THRESHOLD)
    }

    fn choose_double(&self, view: &SeatView) -> Result<bool, AiError> {
        Ok(hand_strength(&view.hand) >= DOUBLE_THRESHOLD)
    }

    fn choose_play(&self, view: &SeatView) -> Result<PlayDecision, AiError> {
        let legal = view.legal_plays();

        // Going out wins the round.
        if let Some(out) = legal.iter().find(|c| c.cards.len() == view.hand.len()) {
            return Ok(PlayDecision::Play(out.cards.clone()));
        }

        if !view.can_pass() {
            return lead_choice(legal)
                .map(|c| PlayDecision::Play(c.cards.clone()))
                .ok_or_else(|| AiError::InvalidMove("Leader has no legal play".into()));
        }

        if view.partner_on_table() {
            return Ok(PlayDecision::Pass);
        }

        if let Some(c) = weakest(legal, false) {
            // Don't spend jokers or twos on a low single unless pressed.
            let precious = c.kind == ComboKind::Single && c.power >= Rank::Two;
            if !precious || opponents_in_danger(view) {
                return Ok(PlayDecision::Play(c.cards.clone()));
            }
        }
        if opponents_in_danger(view) {
            if let Some(bomb) = weakest(legal, true) {
                return Ok(PlayDecision::Play(bomb.cards.clone()));
            }
        }
        Ok(PlayDecision::Pass)
    }
}
