//! Hand helpers shared by the validator, the turn engine and AI seats.

use super::cards_types::{Card, Rank, Suit};

/// Per-rank card counts indexed by `Rank::value()`.
pub type RankCounts = [u8; 15];

/// Standard 54-card deck in canonical order (rank, then suit, jokers last).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(54);
    for rank in Rank::SUITED {
        for suit in Suit::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck.push(Card::SMALL_JOKER);
    deck.push(Card::BIG_JOKER);
    deck
}

pub fn rank_counts(cards: &[Card]) -> RankCounts {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.value() as usize] += 1;
    }
    counts
}

/// True when `hand` holds every card of `cards` (as a multiset).
pub fn hand_contains_all(hand: &[Card], cards: &[Card]) -> bool {
    let mut pool: Vec<Card> = hand.to_vec();
    for card in cards {
        match pool.iter().position(|c| c == card) {
            Some(pos) => {
                pool.swap_remove(pos);
            }
            None => return false,
        }
    }
    true
}

/// Remove `cards` from `hand`. Callers must check `hand_contains_all` first;
/// cards not present are ignored.
pub fn remove_cards(hand: &mut Vec<Card>, cards: &[Card]) {
    for card in cards {
        if let Some(pos) = hand.iter().position(|c| c == card) {
            hand.remove(pos);
        }
    }
}

/// True when no (rank, suit) key appears twice.
pub fn all_distinct(cards: &[Card]) -> bool {
    let mut sorted = cards.to_vec();
    sorted.sort();
    sorted.windows(2).all(|w| w[0] != w[1])
}

/// Cards of `hand` with the given rank, lowest suit first.
pub fn cards_of_rank(hand: &[Card], rank: Rank) -> Vec<Card> {
    let mut v: Vec<Card> = hand.iter().copied().filter(|c| c.rank == rank).collect();
    v.sort();
    v
}
