//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod candidates;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod combos;
pub mod commands;
pub mod dealing;
pub mod events;
pub mod player_view;

pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_commands;
#[cfg(test)]
mod tests_props_combos;
#[cfg(test)]
mod tests_props_round;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use candidates::{candidates, legal_follows, minimal_lead};
pub use cards_logic::{full_deck, hand_contains_all};
pub use cards_parsing::{format_cards, try_parse_cards};
pub use cards_types::{Card, Rank, Suit};
pub use combos::{beats, classify, ComboKind, Combination};
pub use commands::{apply_command, auto_command, Command, Transition};
pub use dealing::{deal, deal_from_deck, Deal};
pub use events::{EngineEvent, RatingRole};
pub use player_view::SeatView;
pub use rules::{FirstBidder, FourWithTwoPolicy, RuleConfig};
pub use scoring::RoundResult;
pub use seed_derivation::{derive_dealing_seed, derive_seat_seed};
pub use state::{GameState, Phase, Seat};
