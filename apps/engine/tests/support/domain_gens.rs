// Proptest generators for domain types.
// Hands are drawn from the real deck so they never hold duplicate cards.

use landlord_engine::domain::rules::FourWithTwoPolicy;
use landlord_engine::domain::{deal, full_deck, Card, Deal, Rank, Suit};
use proptest::prelude::*;
use proptest::sample::subsequence;

/// Generate a random Suit
pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

/// Generate a random suited Rank
pub fn suited_rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::SUITED.to_vec())
}

/// Generate a hand of `min..=max` distinct cards
pub fn hand(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    subsequence(full_deck(), min..=max)
}

/// Generate a plausible play: up to eight distinct cards
pub fn play() -> impl Strategy<Value = Vec<Card>> {
    hand(1, 8)
}

/// Generate a deal from a random seed
pub fn arb_deal() -> impl Strategy<Value = Deal> {
    any::<u64>().prop_map(|seed| deal(Some(seed)).expect("full deck always deals"))
}

pub fn four_with_two_policy() -> impl Strategy<Value = FourWithTwoPolicy> {
    prop_oneof![
        Just(FourWithTwoPolicy::Both),
        Just(FourWithTwoPolicy::TwoSingles),
        Just(FourWithTwoPolicy::TwoPairs),
    ]
}
