//! Deterministic card dealing logic.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::cards_logic::{all_distinct, full_deck};
use super::rules::{BOTTOM_SIZE, DECK_SIZE, HAND_SIZE, PLAYERS};
use super::Card;
use crate::errors::domain::DomainError;

/// Result of one deal: three sorted hands plus the face-down bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; PLAYERS],
    pub bottom: Vec<Card>,
    /// Seed that reproduces this deal.
    pub seed: u64,
}

/// Check that `deck` is a complete, duplicate-free 54-card deck.
pub fn validate_deck(deck: &[Card]) -> Result<(), DomainError> {
    if deck.len() != DECK_SIZE {
        return Err(DomainError::precondition(format!(
            "Deck must hold {DECK_SIZE} cards, got {}",
            deck.len()
        )));
    }
    if let Some(bad) = deck.iter().find(|c| !c.is_well_formed()) {
        return Err(DomainError::precondition(format!(
            "Deck holds malformed card {bad:?}"
        )));
    }
    if !all_distinct(deck) {
        return Err(DomainError::precondition("Deck holds duplicate cards"));
    }
    Ok(())
}

/// Shuffle and deal the standard deck. `None` draws a fresh seed.
pub fn deal(seed: Option<u64>) -> Result<Deal, DomainError> {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    deal_from_deck(full_deck(), seed)
}

/// Shuffle `deck` (Fisher-Yates via ChaCha8) and split it 17/17/17 + 3.
pub fn deal_from_deck(mut deck: Vec<Card>, seed: u64) -> Result<Deal, DomainError> {
    validate_deck(&deck)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let bottom = deck.split_off(PLAYERS * HAND_SIZE);
    debug_assert_eq!(bottom.len(), BOTTOM_SIZE);

    let mut hands: [Vec<Card>; PLAYERS] = Default::default();
    for (seat, slot) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        let mut hand = deck[start..start + HAND_SIZE].to_vec();
        hand.sort();
        *slot = hand;
    }

    Ok(Deal {
        hands,
        bottom,
        seed,
    })
}
