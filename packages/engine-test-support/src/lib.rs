//! Engine test support utilities
//!
//! Shared by the engine's integration tests: unified logging initialization
//! and helpers for generating identity names that never collide across runs.

pub mod logging;
pub mod unique_helpers;

pub use unique_helpers::unique_str;
