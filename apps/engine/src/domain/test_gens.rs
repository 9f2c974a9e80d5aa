// Proptest generators for domain types.
// Card sets are drawn from the real deck so they never hold duplicate keys.

use proptest::prelude::*;
use proptest::sample::subsequence;

use crate::domain::cards_logic::full_deck;
use crate::domain::rules::{FirstBidder, FourWithTwoPolicy, RuleConfig};
use crate::domain::{deal, Card, Deal, Rank};

/// Generate a random suited Rank
pub fn suited_rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::SUITED.to_vec())
}

/// Generate any card of the deck, jokers included
pub fn card() -> impl Strategy<Value = Card> {
    prop::sample::select(full_deck())
}

/// Generate between `min` and `max` distinct cards, sorted
pub fn unique_cards(min: usize, max: usize) -> impl Strategy<Value = Vec<Card>> {
    subsequence(full_deck(), min..=max)
}

/// Generate a complete deal from a random seed
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

/// Generate rule variations that a round must handle end to end
pub fn rule_config() -> impl Strategy<Value = RuleConfig> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        four_with_two_policy(),
        prop_oneof![(0u8..3).prop_map(FirstBidder::Seat), Just(FirstBidder::Random)],
    )
        .prop_map(
            |(outbid, doubling, farmer_coop, bombs_double, four_with_two, first_bidder)| {
                RuleConfig {
                    outbid,
                    doubling,
                    farmer_coop,
                    bombs_double,
                    four_with_two,
                    first_bidder,
                    ..RuleConfig::default()
                }
            },
        )
}

/// Generate a multiplier in the usual range
pub fn multiplier() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1u32), Just(2), Just(4), Just(8), 1u32..=64]
}
