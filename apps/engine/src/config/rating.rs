use serde::{Deserialize, Serialize};

use super::{parse_var, ConfigError};

pub const DEFAULT_MU: f64 = 25.0;
pub const DEFAULT_SIGMA: f64 = 25.0 / 3.0;
pub const DEFAULT_BETA: f64 = 25.0 / 6.0;
pub const DEFAULT_TAU: f64 = 25.0 / 300.0;
pub const DEFAULT_SIGMA_SQ_FLOOR: f64 = 1e-6;
pub const DEFAULT_LADDER_K: f64 = 100.0;
pub const DEFAULT_LADDER_N0: f64 = 10.0;

/// Skill model constants and ladder scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Baseline mean for unknown or malformed ratings.
    pub mu: f64,
    /// Baseline deviation.
    pub sigma: f64,
    /// Performance noise per player.
    pub beta: f64,
    /// Dynamics noise added after each update.
    pub tau: f64,
    /// Lower bound on the posterior variance.
    pub sigma_sq_floor: f64,
    pub ladder_k: f64,
    /// Shrinkage pseudo-count for small samples.
    pub ladder_n0: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
            beta: DEFAULT_BETA,
            tau: DEFAULT_TAU,
            sigma_sq_floor: DEFAULT_SIGMA_SQ_FLOOR,
            ladder_k: DEFAULT_LADDER_K,
            ladder_n0: DEFAULT_LADDER_N0,
        }
    }
}

impl RatingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let d = Self::default();
        let cfg = Self {
            mu: parse_var(lookup, "LANDLORD_RATING_MU", d.mu)?,
            sigma: parse_var(lookup, "LANDLORD_RATING_SIGMA", d.sigma)?,
            beta: parse_var(lookup, "LANDLORD_RATING_BETA", d.beta)?,
            tau: parse_var(lookup, "LANDLORD_RATING_TAU", d.tau)?,
            sigma_sq_floor: parse_var(lookup, "LANDLORD_RATING_SIGMA_SQ_FLOOR", d.sigma_sq_floor)?,
            ladder_k: parse_var(lookup, "LANDLORD_LADDER_K", d.ladder_k)?,
            ladder_n0: parse_var(lookup, "LANDLORD_LADDER_N0", d.ladder_n0)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            ("mu", self.mu),
            ("sigma", self.sigma),
            ("beta", self.beta),
            ("tau", self.tau),
            ("sigma_sq_floor", self.sigma_sq_floor),
            ("ladder_k", self.ladder_k),
            ("ladder_n0", self.ladder_n0),
        ];
        if let Some((name, _)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::invalid(format!("{name} must be finite")));
        }
        if self.sigma <= 0.0 || self.beta <= 0.0 || self.sigma_sq_floor <= 0.0 {
            return Err(ConfigError::invalid(
                "sigma, beta and sigma_sq_floor must be positive",
            ));
        }
        if self.tau < 0.0 || self.ladder_n0 < 0.0 {
            return Err(ConfigError::invalid("tau and ladder_n0 must not be negative"));
        }
        Ok(())
    }
}
