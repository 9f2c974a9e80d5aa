//! Card-pattern classification and comparison.
//!
//! `classify` maps a card multiset onto exactly one `ComboKind` or rejects it.
//! `beats` orders two combinations: the rocket beats everything, a bomb beats
//! every non-bomb, and otherwise only same-kind, same-length combinations are
//! comparable, by the lowest rank of their main body.

use serde::{Deserialize, Serialize};

use super::cards_logic::{all_distinct, rank_counts, RankCounts};
use super::cards_types::{Card, Rank};
use super::rules::FourWithTwoPolicy;
use crate::errors::domain::{DomainError, ValidationKind};

/// Highest rank value that may appear in a sequence (Ace).
const MAX_SEQUENCE_VALUE: u8 = Rank::Ace.value();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboKind {
    Single,
    Pair,
    Triple,
    TripleWithSingle,
    TripleWithPair,
    /// Five or more consecutive single ranks.
    Straight,
    /// Three or more consecutive pairs.
    PairStraight,
    /// Two or more consecutive triples, no kickers.
    Airplane,
    AirplaneWithSingles,
    AirplaneWithPairs,
    FourWithTwoSingles,
    FourWithTwoPairs,
    Bomb,
    Rocket,
}

impl ComboKind {
    /// Number of cards a combination of this kind and `length` must hold.
    pub const fn card_count(self, length: u8) -> usize {
        let length = length as usize;
        match self {
            ComboKind::Single => 1,
            ComboKind::Pair | ComboKind::Rocket => 2,
            ComboKind::Triple => 3,
            ComboKind::TripleWithSingle | ComboKind::Bomb => 4,
            ComboKind::TripleWithPair => 5,
            ComboKind::FourWithTwoSingles => 6,
            ComboKind::FourWithTwoPairs => 8,
            ComboKind::Straight => length,
            ComboKind::PairStraight => 2 * length,
            ComboKind::Airplane => 3 * length,
            ComboKind::AirplaneWithSingles => 4 * length,
            ComboKind::AirplaneWithPairs => 5 * length,
        }
    }

    pub const fn is_bomb_like(self) -> bool {
        matches!(self, ComboKind::Bomb | ComboKind::Rocket)
    }
}

/// A classified group of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub kind: ComboKind,
    /// Lowest rank of the main body (the run, the triple, the four).
    pub power: Rank,
    /// Sequence units for straights, pair-straights and airplanes; 1 otherwise.
    pub length: u8,
    /// The cards, sorted.
    pub cards: Vec<Card>,
}

impl Combination {
    fn new(kind: ComboKind, power: Rank, length: u8, cards: &[Card]) -> Self {
        let mut cards = cards.to_vec();
        cards.sort();
        Combination {
            kind,
            power,
            length,
            cards,
        }
    }
}

fn illegal(detail: impl Into<String>) -> DomainError {
    DomainError::validation(ValidationKind::IllegalCombination, detail)
}

/// Classify `cards` into a combination under the given four-with-two policy.
pub fn classify(cards: &[Card], policy: FourWithTwoPolicy) -> Result<Combination, DomainError> {
    if cards.is_empty() {
        return Err(illegal("No cards played"));
    }
    if let Some(bad) = cards.iter().find(|c| !c.is_well_formed()) {
        return Err(illegal(format!("Malformed card {bad:?}")));
    }
    if !all_distinct(cards) {
        return Err(illegal("Duplicate cards in play"));
    }

    let n = cards.len();
    let counts = rank_counts(cards);
    // (rank value, count) for every rank present, ascending
    let groups: Vec<(u8, u8)> = counts
        .iter()
        .enumerate()
        .filter(|(_, &c)| c > 0)
        .map(|(v, &c)| (v as u8, c))
        .collect();
    let rank = |v: u8| Rank::from_value(v).unwrap_or(Rank::Three);
    let max_group = groups.iter().map(|&(_, c)| c).max().unwrap_or(0);

    if n == 2
        && counts[Rank::SmallJoker.value() as usize] == 1
        && counts[Rank::BigJoker.value() as usize] == 1
    {
        return Ok(Combination::new(ComboKind::Rocket, Rank::BigJoker, 1, cards));
    }

    if groups.len() == 1 {
        let (v, _) = groups[0];
        let kind = match n {
            1 => Some(ComboKind::Single),
            2 => Some(ComboKind::Pair),
            3 => Some(ComboKind::Triple),
            4 => Some(ComboKind::Bomb),
            _ => None,
        };
        if let Some(kind) = kind {
            return Ok(Combination::new(kind, rank(v), 1, cards));
        }
    }

    if groups.len() == 2 {
        if let Some(&(t, _)) = groups.iter().find(|&&(_, c)| c == 3) {
            let other = groups.iter().find(|&&(v, _)| v != t).map(|&(_, c)| c);
            match (n, other) {
                (4, Some(1)) => {
                    return Ok(Combination::new(ComboKind::TripleWithSingle, rank(t), 1, cards))
                }
                (5, Some(2)) => {
                    return Ok(Combination::new(ComboKind::TripleWithPair, rank(t), 1, cards))
                }
                _ => {}
            }
        }
    }

    if max_group == 4 && (n == 6 || n == 8) {
        if let Some(combo) = classify_four_with_two(cards, &groups, policy) {
            return Ok(combo);
        }
    }

    if let Some(combo) = classify_sequence(cards, &groups) {
        return Ok(combo);
    }

    if let Some(combo) = classify_airplane_with_kickers(cards, &counts, &groups) {
        return Ok(combo);
    }

    Err(illegal(format!("{n} cards do not form a recognized combination")))
}

fn classify_four_with_two(
    cards: &[Card],
    groups: &[(u8, u8)],
    policy: FourWithTwoPolicy,
) -> Option<Combination> {
    let fours: Vec<u8> = groups.iter().filter(|&&(_, c)| c == 4).map(|&(v, _)| v).collect();
    if fours.len() != 1 {
        return None;
    }
    let four = fours[0];
    let kickers: Vec<u8> = groups
        .iter()
        .filter(|&&(v, _)| v != four)
        .map(|&(_, c)| c)
        .collect();
    let power = Rank::from_value(four)?;
    match cards.len() {
        6 if policy.allows_singles() => Some(Combination::new(
            ComboKind::FourWithTwoSingles,
            power,
            1,
            cards,
        )),
        8 if policy.allows_pairs() && kickers.len() == 2 && kickers.iter().all(|&c| c == 2) => {
            Some(Combination::new(ComboKind::FourWithTwoPairs, power, 1, cards))
        }
        _ => None,
    }
}

/// True when `values` are consecutive and all fit inside a sequence.
fn is_run(values: &[u8]) -> bool {
    values.iter().all(|&v| v <= MAX_SEQUENCE_VALUE) && values.windows(2).all(|w| w[1] == w[0] + 1)
}

fn classify_sequence(cards: &[Card], groups: &[(u8, u8)]) -> Option<Combination> {
    let n = cards.len();
    let values: Vec<u8> = groups.iter().map(|&(v, _)| v).collect();
    let width = groups.first()?.1;
    if !groups.iter().all(|&(_, c)| c == width) || !is_run(&values) {
        return None;
    }
    let units = values.len();
    let (kind, min_units) = match width {
        1 => (ComboKind::Straight, 5),
        2 => (ComboKind::PairStraight, 3),
        3 => (ComboKind::Airplane, 2),
        _ => return None,
    };
    if units < min_units || units * width as usize != n {
        return None;
    }
    let power = Rank::from_value(values[0])?;
    Some(Combination::new(kind, power, units as u8, cards))
}

/// Starting values of every run of `units` consecutive ranks with exactly
/// three cards each, highest start first.
fn triple_runs(counts: &RankCounts, units: usize) -> Vec<u8> {
    if units == 0 || units > (MAX_SEQUENCE_VALUE as usize + 1) {
        return Vec::new();
    }
    let last_start = MAX_SEQUENCE_VALUE as usize + 1 - units;
    (0..=last_start)
        .rev()
        .filter(|&s| (s..s + units).all(|v| counts[v] == 3))
        .map(|s| s as u8)
        .collect()
}

fn classify_airplane_with_kickers(
    cards: &[Card],
    counts: &RankCounts,
    groups: &[(u8, u8)],
) -> Option<Combination> {
    let n = cards.len();

    if n % 4 == 0 && n / 4 >= 2 {
        let units = n / 4;
        if let Some(&start) = triple_runs(counts, units).first() {
            // Main ranks hold exactly three cards, so the remaining `units`
            // cards are kickers of other ranks.
            let power = Rank::from_value(start)?;
            return Some(Combination::new(
                ComboKind::AirplaneWithSingles,
                power,
                units as u8,
                cards,
            ));
        }
    }

    if n % 5 == 0 && n / 5 >= 2 {
        let units = n / 5;
        for start in triple_runs(counts, units) {
            let main = start as usize..start as usize + units;
            let kicker_groups: Vec<u8> = groups
                .iter()
                .filter(|&&(v, _)| !main.contains(&(v as usize)))
                .map(|&(_, c)| c)
                .collect();
            if kicker_groups.len() == units && kicker_groups.iter().all(|&c| c == 2) {
                let power = Rank::from_value(start)?;
                return Some(Combination::new(
                    ComboKind::AirplaneWithPairs,
                    power,
                    units as u8,
                    cards,
                ));
            }
        }
    }

    None
}

/// Does `a` beat `b`? A strict order: never true for equal combinations.
pub fn beats(a: &Combination, b: &Combination) -> bool {
    match (a.kind, b.kind) {
        (ComboKind::Rocket, other) => other != ComboKind::Rocket,
        (_, ComboKind::Rocket) => false,
        (ComboKind::Bomb, ComboKind::Bomb) => a.power > b.power,
        (ComboKind::Bomb, _) => true,
        (_, ComboKind::Bomb) => false,
        (ka, kb) => ka == kb && a.length == b.length && a.power > b.power,
    }
}
