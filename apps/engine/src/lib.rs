#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{ConfigError, EngineConfig, MatchConfig, RatingConfig};
pub use domain::{apply_command, Command, EngineEvent, GameState, Phase, RuleConfig, Seat};
pub use errors::{DomainError, ErrorCode, ValidationKind};
pub use rating::{PlayerIdentity, Rating, RatingService, RatingStore};
pub use services::match_flow::{MatchReport, MatchRunner};
pub use services::seat::{AiSeat, ChannelSeat, SeatController};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
