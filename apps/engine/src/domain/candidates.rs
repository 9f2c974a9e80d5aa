//! Enumerates combinations a hand can form.
//!
//! Kickers are filled from the lowest available cards, except for
//! triple-with-single / triple-with-pair where every kicker rank is offered.
//! Every candidate is re-checked through `classify`, so the list never holds
//! an illegal play.

use std::collections::HashSet;

use super::cards_logic::{cards_of_rank, rank_counts, RankCounts};
use super::cards_types::{Card, Rank};
use super::combos::{beats, classify, Combination, ComboKind};
use super::rules::FourWithTwoPolicy;

const ACE: usize = Rank::Ace.value() as usize;

fn rank_at(v: usize) -> Option<Rank> {
    Rank::from_value(v as u8)
}

/// Lowest `n` cards of rank value `v`.
fn take(hand: &[Card], v: usize, n: usize) -> Vec<Card> {
    match rank_at(v) {
        Some(rank) => cards_of_rank(hand, rank).into_iter().take(n).collect(),
        None => Vec::new(),
    }
}

/// Every run start/length with at least `width` cards per rank.
fn runs(counts: &RankCounts, width: u8, min_units: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for start in 0..=ACE {
        let mut units = 0;
        while start + units <= ACE && counts[start + units] >= width {
            units += 1;
            if units >= min_units {
                out.push((start, units));
            }
        }
    }
    out
}

/// Lowest `n` single cards whose rank is not in `excluded`.
fn lowest_singles(hand: &[Card], excluded: &[usize], n: usize) -> Option<Vec<Card>> {
    let mut sorted = hand.to_vec();
    sorted.sort();
    let picked: Vec<Card> = sorted
        .into_iter()
        .filter(|c| !excluded.contains(&(c.rank.value() as usize)))
        .take(n)
        .collect();
    (picked.len() == n).then_some(picked)
}

/// Lowest `n` pairs whose rank is not in `excluded`.
fn lowest_pairs(
    hand: &[Card],
    counts: &RankCounts,
    excluded: &[usize],
    n: usize,
) -> Option<Vec<Card>> {
    let ranks: Vec<usize> = (0..counts.len())
        .filter(|v| counts[*v] >= 2 && !excluded.contains(v))
        .take(n)
        .collect();
    if ranks.len() < n {
        return None;
    }
    Some(ranks.into_iter().flat_map(|v| take(hand, v, 2)).collect())
}

/// All distinct combinations `hand` can form, weakest first within a kind.
pub fn candidates(hand: &[Card], policy: FourWithTwoPolicy) -> Vec<Combination> {
    let counts = rank_counts(hand);
    let mut raw: Vec<Vec<Card>> = Vec::new();

    for v in 0..counts.len() {
        let c = counts[v] as usize;
        for n in 1..=c.min(4) {
            raw.push(take(hand, v, n));
        }
        if c >= 3 {
            for k in (0..counts.len()).filter(|&k| k != v) {
                let mut single = take(hand, v, 3);
                single.extend(take(hand, k, 1));
                raw.push(single);
                if counts[k] >= 2 {
                    let mut pair = take(hand, v, 3);
                    pair.extend(take(hand, k, 2));
                    raw.push(pair);
                }
            }
        }
        if c == 4 {
            if let Some(kick) = lowest_singles(hand, &[v], 2) {
                let mut cards = take(hand, v, 4);
                cards.extend(kick);
                raw.push(cards);
            }
            if let Some(kick) = lowest_pairs(hand, &counts, &[v], 2) {
                let mut cards = take(hand, v, 4);
                cards.extend(kick);
                raw.push(cards);
            }
        }
    }

    if counts[Rank::SmallJoker.value() as usize] == 1 && counts[Rank::BigJoker.value() as usize] == 1
    {
        raw.push(vec![Card::SMALL_JOKER, Card::BIG_JOKER]);
    }

    for (width, min_units) in [(1u8, 5usize), (2, 3), (3, 2)] {
        for (start, units) in runs(&counts, width, min_units) {
            let main: Vec<Card> = (start..start + units)
                .flat_map(|v| take(hand, v, width as usize))
                .collect();
            if width == 3 {
                let excluded: Vec<usize> = (start..start + units).collect();
                if let Some(kick) = lowest_singles(hand, &excluded, units) {
                    let mut cards = main.clone();
                    cards.extend(kick);
                    raw.push(cards);
                }
                if let Some(kick) = lowest_pairs(hand, &counts, &excluded, units) {
                    let mut cards = main.clone();
                    cards.extend(kick);
                    raw.push(cards);
                }
            }
            raw.push(main);
        }
    }

    let mut seen: HashSet<Vec<Card>> = HashSet::new();
    let mut out: Vec<Combination> = raw
        .into_iter()
        .filter_map(|cards| classify(&cards, policy).ok())
        .filter(|combo| seen.insert(combo.cards.clone()))
        .collect();
    out.sort_by(|a, b| {
        (a.kind.is_bomb_like(), a.cards.len(), a.power, &a.cards).cmp(&(
            b.kind.is_bomb_like(),
            b.cards.len(),
            b.power,
            &b.cards,
        ))
    });
    out
}

/// Candidates that may legally be played over `last` (all of them on lead).
pub fn legal_follows(
    hand: &[Card],
    last: Option<&Combination>,
    policy: FourWithTwoPolicy,
) -> Vec<Combination> {
    let all = candidates(hand, policy);
    match last {
        None => all,
        Some(last) => all.into_iter().filter(|c| beats(c, last)).collect(),
    }
}

/// The weakest single card in `hand`, used as the deterministic auto-play.
pub fn minimal_lead(hand: &[Card]) -> Option<Combination> {
    let lowest = hand.iter().min().copied()?;
    Some(Combination {
        kind: ComboKind::Single,
        power: lowest.rank,
        length: 1,
        cards: vec![lowest],
    })
}
