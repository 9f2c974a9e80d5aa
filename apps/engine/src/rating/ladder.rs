//! Descriptive ladder score, independent of the skill model.

use serde::{Deserialize, Serialize};

use crate::config::RatingConfig;

/// Upper bound on the extra weight a lopsided round can carry.
const MAX_EXTRA_WEIGHT: f64 = 3.0;
/// Score points per unit of extra weight.
const SCORE_PER_WEIGHT: f64 = 20.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderEntry {
    /// Σ weight·(actual − expected).
    pub weighted_sum: f64,
    /// Net score points across all rounds.
    pub delta_score: i64,
    pub matches: u32,
}

/// `1 + min(3, |Δscore| / 20)`.
pub fn round_weight(score_delta: i64) -> f64 {
    1.0 + (score_delta.unsigned_abs() as f64 / SCORE_PER_WEIGHT).min(MAX_EXTRA_WEIGHT)
}

impl LadderEntry {
    /// Fold one round in. `won` is the identity's team outcome and
    /// `expected` its pre-round win probability.
    pub fn record(&mut self, won: bool, expected: f64, score_delta: i64) {
        let actual = if won { 1.0 } else { 0.0 };
        self.weighted_sum += round_weight(score_delta) * (actual - expected);
        self.delta_score += score_delta;
        self.matches += 1;
    }

    /// `K · (sum / n) · sqrt(n / (n + N0))`, zero before any match.
    pub fn delta_rating(&self, cfg: &RatingConfig) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        let n = self.matches as f64;
        cfg.ladder_k * (self.weighted_sum / n) * (n / (n + cfg.ladder_n0)).sqrt()
    }

    /// A stored entry with non-finite data is treated as empty.
    pub fn sanitized(self) -> Self {
        if self.weighted_sum.is_finite() {
            self
        } else {
            Self::default()
        }
    }
}
