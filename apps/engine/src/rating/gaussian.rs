//! Standard normal helpers for the skill model.

use std::f64::consts::{PI, SQRT_2};

/// Standard normal density φ(x).
pub fn pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal distribution Φ(x).
pub fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Complementary error function, Chebyshev fit with |error| < 1.2e-7.
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let r = t * poly.exp();
    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}

/// Mean additive correction `φ(t)/Φ(t)` for a win with margin `t`.
pub fn v_win(t: f64) -> f64 {
    let denom = cdf(t);
    // Deep in the tail Φ underflows; φ/Φ tends to -t there.
    if denom < 2.222_758_749e-162 {
        return -t;
    }
    pdf(t) / denom
}

/// Variance multiplicative correction `v(v + t)`.
pub fn w_win(t: f64) -> f64 {
    let v = v_win(t);
    v * (v + t)
}
