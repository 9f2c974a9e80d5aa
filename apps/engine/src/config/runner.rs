use serde::{Deserialize, Serialize};

use super::{parse_var, ConfigError};

pub const DEFAULT_SEAT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Limits the match runner applies to each seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// How long a seat may take for one decision before auto-resolve.
    pub seat_timeout_ms: u64,
    /// Rejected submissions tolerated per decision before auto-resolve.
    pub max_retries: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seat_timeout_ms: DEFAULT_SEAT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl MatchConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let d = Self::default();
        let cfg = Self {
            seat_timeout_ms: parse_var(lookup, "LANDLORD_SEAT_TIMEOUT_MS", d.seat_timeout_ms)?,
            max_retries: parse_var(lookup, "LANDLORD_MAX_RETRIES", d.max_retries)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seat_timeout_ms == 0 {
            return Err(ConfigError::invalid("seat_timeout_ms must be positive"));
        }
        Ok(())
    }

    pub fn seat_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.seat_timeout_ms)
    }
}
