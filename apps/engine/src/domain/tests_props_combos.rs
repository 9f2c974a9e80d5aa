//! Property tests for the pattern validator.
//!
//! Properties tested:
//! - classify is deterministic and order-independent
//! - a classified combination's size matches its kind and length
//! - beats is irreflexive and asymmetric
//! - the rocket beats everything else, bombs beat every non-bomb
//! - enumerated candidates come from the hand and classify to themselves

use proptest::prelude::*;

use crate::domain::candidates::{candidates, legal_follows};
use crate::domain::cards_logic::hand_contains_all;
use crate::domain::combos::{beats, classify, ComboKind};
use crate::domain::rules::FourWithTwoPolicy;
use crate::domain::{test_gens, test_prelude, Card, Rank, Suit};

fn bomb_of(rank: Rank) -> Vec<Card> {
    Suit::ALL.iter().map(|&s| Card::new(rank, s)).collect()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: classification ignores card order and never panics
    #[test]
    fn prop_classify_is_order_independent(
        cards in test_gens::unique_cards(1, 12),
        policy in test_gens::four_with_two_policy(),
    ) {
        let forward = classify(&cards, policy);
        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(forward, classify(&reversed, policy));
    }

    /// Property: size matches kind and length
    #[test]
    fn prop_classified_size_matches_kind(
        cards in test_gens::unique_cards(1, 20),
        policy in test_gens::four_with_two_policy(),
    ) {
        if let Ok(combo) = classify(&cards, policy) {
            prop_assert_eq!(combo.kind.card_count(combo.length), cards.len());
            prop_assert_eq!(combo.cards.len(), cards.len());
        }
    }

    /// Property: beats is a strict order on pairs of combinations
    #[test]
    fn prop_beats_is_strict(
        a in test_gens::unique_cards(1, 6),
        b in test_gens::unique_cards(1, 6),
    ) {
        let policy = FourWithTwoPolicy::Both;
        if let (Ok(a), Ok(b)) = (classify(&a, policy), classify(&b, policy)) {
            prop_assert!(!beats(&a, &a));
            prop_assert!(!(beats(&a, &b) && beats(&b, &a)));
        }
    }

    /// Property: the rocket beats any other combination; bombs beat non-bombs
    #[test]
    fn prop_rocket_and_bomb_dominate(
        cards in test_gens::unique_cards(1, 8),
        rank in test_gens::suited_rank(),
    ) {
        let policy = FourWithTwoPolicy::Both;
        let rocket = classify(&[Card::SMALL_JOKER, Card::BIG_JOKER], policy).unwrap();
        let bomb = classify(&bomb_of(rank), policy).unwrap();
        if let Ok(other) = classify(&cards, policy) {
            if other.kind != ComboKind::Rocket {
                prop_assert!(beats(&rocket, &other));
                prop_assert!(!beats(&other, &rocket));
            }
            if !other.kind.is_bomb_like() {
                prop_assert!(beats(&bomb, &other));
            }
        }
    }

    /// Property: every candidate is drawn from the hand and classifies to itself
    #[test]
    fn prop_candidates_are_sound(
        hand in test_gens::unique_cards(1, 20),
        policy in test_gens::four_with_two_policy(),
    ) {
        let all = candidates(&hand, policy);
        prop_assert!(!all.is_empty());
        for combo in &all {
            prop_assert!(hand_contains_all(&hand, &combo.cards));
            let again = classify(&combo.cards, policy).unwrap();
            prop_assert_eq!(&again, combo);
        }
        // Every single card is always available.
        let singles = all.iter().filter(|c| c.kind == ComboKind::Single).count();
        let mut ranks: Vec<Rank> = hand.iter().map(|c| c.rank).collect();
        ranks.dedup();
        prop_assert!(singles >= ranks.len());
    }

    /// Property: follows strictly beat the table
    #[test]
    fn prop_follows_beat_table(
        hand in test_gens::unique_cards(5, 20),
        table in test_gens::card(),
    ) {
        prop_assume!(!hand.contains(&table));
        let policy = FourWithTwoPolicy::Both;
        let last = classify(&[table], policy).unwrap();
        for combo in legal_follows(&hand, Some(&last), policy) {
            prop_assert!(beats(&combo, &last));
        }
    }
}

#[test]
fn four_with_two_singles_follows_policy() {
    let cards = crate::domain::try_parse_cards(["9C", "9D", "9H", "9S", "3C", "KD"]).unwrap();
    assert!(classify(&cards, FourWithTwoPolicy::TwoPairs).is_err());
    assert_eq!(
        classify(&cards, FourWithTwoPolicy::Both).unwrap().kind,
        ComboKind::FourWithTwoSingles
    );
    assert_eq!(
        classify(&cards, FourWithTwoPolicy::TwoSingles).unwrap().kind,
        ComboKind::FourWithTwoSingles
    );
}
