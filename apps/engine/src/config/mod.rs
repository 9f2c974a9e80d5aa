//! Engine configuration: table rules, rating constants and match runner
//! limits. Each section loads from `LANDLORD_*` environment variables, or the
//! whole set from a JSON document.

pub mod rating;
pub mod rules;
pub mod runner;

use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use rating::RatingConfig;
pub use runner::MatchConfig;

use crate::domain::rules::RuleConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidVar {
        var: String,
        value: String,
        reason: String,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("config file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::Invalid(detail.into())
    }
}

/// Every configurable section together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: RuleConfig,
    pub rating: RatingConfig,
    pub runner: MatchConfig,
}

impl EngineConfig {
    /// Load all sections from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|name| env::var(name).ok())
    }

    /// Load all sections through `lookup` (a stand-in for `env::var`).
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            rules: rules::from_lookup(lookup)?,
            rating: RatingConfig::from_lookup(lookup)?,
            runner: MatchConfig::from_lookup(lookup)?,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        rules::validate(&self.rules)?;
        self.rating.validate()?;
        self.runner.validate()
    }
}

/// Parse an optional variable, keeping `default` when unset.
pub(crate) fn parse_var<T>(
    lookup: &dyn Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidVar {
            var: name.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

/// Parse a boolean flag accepting `1/0`, `true/false`, `yes/no`, `on/off`.
pub(crate) fn parse_flag(
    lookup: &dyn Fn(&str) -> Option<String>,
    name: &str,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidVar {
            var: name.to_string(),
            value: raw,
            reason: "expected a boolean".into(),
        }),
    }
}
