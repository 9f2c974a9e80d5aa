//! Core card-related types: Card, Rank, Suit

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

/// Rank in play order: 3 is lowest, 2 outranks the ace, jokers top everything.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Two,
    SmallJoker,
    BigJoker,
}

impl Rank {
    /// The thirteen suited ranks, lowest first.
    pub const SUITED: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    /// Zero-based position in play order (Three = 0, BigJoker = 14).
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        const ALL: [Rank; 15] = [
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
            Rank::Nine,
            Rank::Ten,
            Rank::Jack,
            Rank::Queen,
            Rank::King,
            Rank::Ace,
            Rank::Two,
            Rank::SmallJoker,
            Rank::BigJoker,
        ];
        ALL.get(value as usize).copied()
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Rank::SmallJoker | Rank::BigJoker)
    }

    /// Ranks allowed inside straights, pair-straights and airplanes.
    pub const fn is_sequenceable(self) -> bool {
        !matches!(self, Rank::Two | Rank::SmallJoker | Rank::BigJoker)
    }
}

/// A single card. Jokers carry no suit; every other rank must have one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Option<Suit>,
}

impl Card {
    pub const SMALL_JOKER: Card = Card {
        rank: Rank::SmallJoker,
        suit: None,
    };
    pub const BIG_JOKER: Card = Card {
        rank: Rank::BigJoker,
        suit: None,
    };

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Card {
            rank,
            suit: Some(suit),
        }
    }

    /// True when the rank/suit pairing can exist in a real deck.
    pub fn is_well_formed(&self) -> bool {
        self.rank.is_joker() == self.suit.is_none()
    }
}

// Ord on Card sorts by rank first (play order), then suit. Jokers sort last.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.rank.cmp(&other.rank) {
            std::cmp::Ordering::Equal => self.suit.cmp(&other.suit),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
