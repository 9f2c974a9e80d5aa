//! `RuleConfig` from `LANDLORD_*` variables.

use super::{parse_flag, parse_var, ConfigError};
use crate::domain::rules::{FirstBidder, FourWithTwoPolicy, RuleConfig, PLAYERS};

pub fn from_env() -> Result<RuleConfig, ConfigError> {
    from_lookup(&|name| std::env::var(name).ok())
}

pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<RuleConfig, ConfigError> {
    let d = RuleConfig::default();
    let rules = RuleConfig {
        max_multiplier: parse_var(lookup, "LANDLORD_MAX_MULTIPLIER", d.max_multiplier)?,
        first_bidder: first_bidder(lookup, d.first_bidder)?,
        outbid: parse_flag(lookup, "LANDLORD_OUTBID", d.outbid)?,
        doubling: parse_flag(lookup, "LANDLORD_DOUBLING", d.doubling)?,
        farmer_coop: parse_flag(lookup, "LANDLORD_FARMER_COOP", d.farmer_coop)?,
        four_with_two: four_with_two(lookup, d.four_with_two)?,
        bombs_double: parse_flag(lookup, "LANDLORD_BOMBS_DOUBLE", d.bombs_double)?,
        max_redeals: parse_var(lookup, "LANDLORD_MAX_REDEALS", d.max_redeals)?,
    };
    validate(&rules)?;
    Ok(rules)
}

pub fn validate(rules: &RuleConfig) -> Result<(), ConfigError> {
    if rules.max_multiplier == 0 {
        return Err(ConfigError::invalid("max_multiplier must be at least 1"));
    }
    if let FirstBidder::Seat(seat) = rules.first_bidder {
        if seat as usize >= PLAYERS {
            return Err(ConfigError::invalid(format!(
                "first_bidder seat {seat} out of range"
            )));
        }
    }
    Ok(())
}

fn first_bidder(
    lookup: &dyn Fn(&str) -> Option<String>,
    default: FirstBidder,
) -> Result<FirstBidder, ConfigError> {
    const VAR: &str = "LANDLORD_FIRST_BIDDER";
    let Some(raw) = lookup(VAR) else {
        return Ok(default);
    };
    if raw.trim().eq_ignore_ascii_case("random") {
        return Ok(FirstBidder::Random);
    }
    raw.trim()
        .parse::<u8>()
        .map(FirstBidder::Seat)
        .map_err(|_| ConfigError::InvalidVar {
            var: VAR.into(),
            value: raw.clone(),
            reason: "expected a seat number or 'random'".into(),
        })
}

fn four_with_two(
    lookup: &dyn Fn(&str) -> Option<String>,
    default: FourWithTwoPolicy,
) -> Result<FourWithTwoPolicy, ConfigError> {
    const VAR: &str = "LANDLORD_FOUR_WITH_TWO";
    match lookup(VAR).as_deref().map(str::trim) {
        None => Ok(default),
        Some("both") => Ok(FourWithTwoPolicy::Both),
        Some("2singles") => Ok(FourWithTwoPolicy::TwoSingles),
        Some("2pairs") => Ok(FourWithTwoPolicy::TwoPairs),
        Some(other) => Err(ConfigError::InvalidVar {
            var: VAR.into(),
            value: other.into(),
            reason: "expected both, 2singles or 2pairs".into(),
        }),
    }
}
