//! RNG seed derivation utilities for deterministic match behavior.
//!
//! Every random decision in a match (each re-deal, the opening bidder,
//! AI seat RNGs) draws from a seed derived from the match seed, so replaying
//! a match seed replays the whole match.

/// Seed for the `attempt`-th deal of a match (0 for the first deal,
/// incremented on every all-decline re-deal).
pub fn derive_dealing_seed(match_seed: u64, attempt: u8) -> u64 {
    splitmix(
        match_seed
            .wrapping_add((attempt as u64).wrapping_mul(1_000_003))
            .wrapping_add(2),
    )
}

/// Opening bidder for `FirstBidder::Random`, taken from the deal seed.
pub fn derive_first_bidder(deal_seed: u64) -> u8 {
    (splitmix(deal_seed ^ 0xA5A5_A5A5) % 3) as u8
}

/// Seed for an AI seat's own RNG within a match.
pub fn derive_seat_seed(match_seed: u64, seat: u8) -> u64 {
    splitmix(
        match_seed
            .wrapping_add((seat as u64).wrapping_mul(100))
            .wrapping_add(1),
    )
}

// SplitMix64 finalizer: spreads nearby inputs across the full u64 range.
fn splitmix(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
