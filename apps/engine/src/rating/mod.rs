//! Skill ratings (two-team Gaussian model), the descriptive ladder, player
//! identities and the persistence contract.

pub mod gaussian;
pub mod identity;
pub mod ladder;
pub mod model;
pub mod service;
pub mod store;
pub mod trueskill;

pub use identity::PlayerIdentity;
pub use ladder::LadderEntry;
pub use model::{Rating, RatingRecord};
pub use service::{LeaderboardRow, RatingChange, RatingOutcome, RatingService};
pub use store::{JsonFileRatingStore, MemoryRatingStore, RatingStore};
pub use trueskill::{update_two_teams, win_probability};
