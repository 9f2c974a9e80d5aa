//! Match orchestration: seat controllers and the runner that drives a
//! whole round through them.

pub mod match_flow;
pub mod seat;

pub use match_flow::{MatchReport, MatchRunner};
pub use seat::{AiSeat, ChannelSeat, Decision, DecisionRequest, SeatController, SeatPrompt};
