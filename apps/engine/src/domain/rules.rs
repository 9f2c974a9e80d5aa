use serde::{Deserialize, Serialize};

pub const PLAYERS: usize = 3;
pub const HAND_SIZE: usize = 17;
pub const BOTTOM_SIZE: usize = 3;
pub const DECK_SIZE: usize = 54;
pub const DEFAULT_MAX_MULTIPLIER: u32 = 64;

/// Who opens the bidding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstBidder {
    Seat(u8),
    /// Derived from the deal seed, so a replayed seed bids the same way.
    Random,
}

/// Accepted kicker shapes for four-of-a-kind with two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FourWithTwoPolicy {
    #[serde(rename = "both")]
    Both,
    #[serde(rename = "2singles")]
    TwoSingles,
    #[serde(rename = "2pairs")]
    TwoPairs,
}

impl FourWithTwoPolicy {
    pub fn allows_singles(self) -> bool {
        matches!(self, Self::Both | Self::TwoSingles)
    }

    pub fn allows_pairs(self) -> bool {
        matches!(self, Self::Both | Self::TwoPairs)
    }
}

/// Table rules a round is played under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Cap shared by the bid multiplier, the score multiplier and their product.
    pub max_multiplier: u32,
    pub first_bidder: FirstBidder,
    /// When set every seat bids once and each later accept raises the stake.
    pub outbid: bool,
    /// Enables the post-reveal double sub-phase.
    pub doubling: bool,
    /// Both farmers share a farmer win.
    pub farmer_coop: bool,
    pub four_with_two: FourWithTwoPolicy,
    /// Each bomb or rocket played doubles the score multiplier.
    pub bombs_double: bool,
    /// Re-deals allowed per match after everyone declines.
    pub max_redeals: u8,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_multiplier: DEFAULT_MAX_MULTIPLIER,
            first_bidder: FirstBidder::Seat(0),
            outbid: false,
            doubling: false,
            farmer_coop: true,
            four_with_two: FourWithTwoPolicy::Both,
            bombs_double: false,
            max_redeals: 16,
        }
    }
}

/// Double `m`, saturating at `cap`.
pub fn capped_double(m: u32, cap: u32) -> u32 {
    m.saturating_mul(2).min(cap.max(1))
}
