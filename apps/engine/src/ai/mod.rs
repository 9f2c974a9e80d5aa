//! AI seats.
//!
//! - `AiPlayer`: decision trait over a `SeatView`
//! - `RandomPlayer`: random legal moves (seedable for tests)
//! - `HeuristicPlayer`: hand-strength bidding and cheap-first play
//! - `registry`: name → factory lookup

mod heuristic;
mod random;
pub mod registry;
mod trait_def;

pub use heuristic::{hand_strength, HeuristicPlayer};
pub use random::RandomPlayer;
pub use registry::{by_name, create_ai, registered_ais, AiFactory};
pub use trait_def::{AiError, AiPlayer, PlayDecision};
