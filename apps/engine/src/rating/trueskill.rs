//! Two-team TrueSkill-style update.
//!
//! ```text
//! c² = Σσ²(winners) + Σσ²(losers) + 2β²
//! t  = (Σμ(winners) − Σμ(losers)) / c
//! v  = φ(t)/Φ(t),  w = v(v + t)
//! winners: μ += σ²/c·v     losers: μ −= σ²/c·v
//! both:    σ² ← max(σ²(1 − w·σ²/c²), floor) + τ²
//! ```

use super::gaussian::{cdf, v_win, w_win};
use super::model::Rating;
use crate::config::RatingConfig;
use crate::errors::domain::DomainError;

/// Posterior ratings for both teams, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamUpdate {
    pub winners: Vec<Rating>,
    pub losers: Vec<Rating>,
}

fn team_sums(team: &[Rating]) -> (f64, f64) {
    team.iter()
        .fold((0.0, 0.0), |(mu, var), r| (mu + r.mu, var + r.variance()))
}

/// Performance spread `c` for a pairing.
pub fn spread(a: &[Rating], b: &[Rating], cfg: &RatingConfig) -> f64 {
    let (_, var_a) = team_sums(a);
    let (_, var_b) = team_sums(b);
    (var_a + var_b + 2.0 * cfg.beta * cfg.beta).sqrt()
}

/// Pre-game probability that team `a` beats team `b`: `Φ(Δμ/c)`.
pub fn win_probability(a: &[Rating], b: &[Rating], cfg: &RatingConfig) -> f64 {
    let (mu_a, _) = team_sums(a);
    let (mu_b, _) = team_sums(b);
    cdf((mu_a - mu_b) / spread(a, b, cfg))
}

/// Apply one win/loss observation.
///
/// Fails with `DomainError::Numerical` when any intermediate or posterior
/// value is non-finite; callers keep the prior ratings in that case.
pub fn update_two_teams(
    winners: &[Rating],
    losers: &[Rating],
    cfg: &RatingConfig,
) -> Result<TeamUpdate, DomainError> {
    if winners.is_empty() || losers.is_empty() {
        return Err(DomainError::precondition("Both teams need at least one player"));
    }
    let (mu_w, _) = team_sums(winners);
    let (mu_l, _) = team_sums(losers);
    let c = spread(winners, losers, cfg);
    let c2 = c * c;
    let t = (mu_w - mu_l) / c;
    let v = v_win(t);
    let w = w_win(t);
    for (name, x) in [("c", c), ("t", t), ("v", v), ("w", w)] {
        if !x.is_finite() {
            return Err(DomainError::numerical(format!("{name} is not finite ({x})")));
        }
    }

    let tau2 = cfg.tau * cfg.tau;
    let step = |r: &Rating, sign: f64| -> Rating {
        let var = r.variance();
        let mu = r.mu + sign * (var / c) * v;
        let new_var = (var * (1.0 - w * var / c2)).max(cfg.sigma_sq_floor) + tau2;
        Rating::new(mu, new_var.sqrt())
    };

    let update = TeamUpdate {
        winners: winners.iter().map(|r| step(r, 1.0)).collect(),
        losers: losers.iter().map(|r| step(r, -1.0)).collect(),
    };
    if let Some(bad) = update
        .winners
        .iter()
        .chain(update.losers.iter())
        .find(|r| !r.mu.is_finite() || !r.sigma.is_finite())
    {
        return Err(DomainError::numerical(format!(
            "posterior rating is not finite ({bad:?})"
        )));
    }
    Ok(update)
}
