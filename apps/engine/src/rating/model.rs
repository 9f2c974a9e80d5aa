use serde::{Deserialize, Serialize};

use crate::config::RatingConfig;

/// Gaussian skill belief for one identity and role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64,
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    pub fn baseline(cfg: &RatingConfig) -> Self {
        Self::new(cfg.mu, cfg.sigma)
    }

    /// Conservative rating: `mu - 3 sigma`.
    pub fn conservative(&self) -> f64 {
        self.mu - 3.0 * self.sigma
    }

    /// Finite mean and a finite, positive deviation.
    pub fn is_valid(&self) -> bool {
        self.mu.is_finite() && self.sigma.is_finite() && self.sigma > 0.0
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }
}

/// Skill tracks kept for one identity plus its ladder entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingRecord {
    pub overall: Option<Rating>,
    pub landlord: Option<Rating>,
    pub farmer: Option<Rating>,
    pub ladder: super::ladder::LadderEntry,
}

impl RatingRecord {
    /// Overall rating, or the baseline when missing or malformed.
    pub fn overall_or_baseline(&self, cfg: &RatingConfig) -> Rating {
        self.overall
            .filter(Rating::is_valid)
            .unwrap_or_else(|| Rating::baseline(cfg))
    }

    /// Role rating, falling back to overall, then the baseline.
    pub fn role_or_fallback(&self, landlord: bool, cfg: &RatingConfig) -> Rating {
        let role = if landlord { self.landlord } else { self.farmer };
        role.filter(Rating::is_valid)
            .unwrap_or_else(|| self.overall_or_baseline(cfg))
    }

    pub fn set_role(&mut self, landlord: bool, rating: Rating) {
        if landlord {
            self.landlord = Some(rating);
        } else {
            self.farmer = Some(rating);
        }
    }
}
