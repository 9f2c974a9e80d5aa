//! Per-match metrics line and running totals.

use landlord_engine::rating::RatingChange;
use landlord_engine::MatchReport;
use serde::Serialize;

/// One JSONL record.
#[derive(Debug, Clone, Serialize)]
pub struct MatchMetrics {
    pub game: u32,
    pub match_id: String,
    pub match_seed: u64,
    pub timestamp: String,
    pub seats: [String; 3],
    pub landlord: Option<u8>,
    pub winner: Option<u8>,
    pub landlord_won: Option<bool>,
    pub multiplier: Option<u32>,
    pub deltas: Option<[i64; 3]>,
    pub redeals: u8,
    pub auto_resolved: u32,
    pub rejections: u32,
    pub events: usize,
    pub duration_ms: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rating_changes: Vec<RatingChange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rating_skipped: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_error: Option<String>,
}

pub fn build_match_metrics(game: u32, report: &MatchReport, duration_ms: f64) -> MatchMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));
    let result = report.result.as_ref();
    let (rating_changes, rating_skipped) = report
        .rating
        .as_ref()
        .map(|o| (o.changes.clone(), o.skipped.clone()))
        .unwrap_or_default();

    MatchMetrics {
        game,
        match_id: report.match_id.to_string(),
        match_seed: report.match_seed,
        timestamp,
        seats: report.seats.clone(),
        landlord: result.map(|r| r.landlord),
        winner: result.map(|r| r.winner),
        landlord_won: result.map(|r| r.landlord_won),
        multiplier: result.map(|r| r.multiplier),
        deltas: result.map(|r| r.deltas),
        redeals: report.redeals,
        auto_resolved: report.auto_resolved,
        rejections: report.rejections,
        events: report.event_count,
        duration_ms,
        rating_changes,
        rating_skipped,
        rating_error: report.rating_error.clone(),
    }
}

/// Aggregates across a simulation run.
#[derive(Debug, Default)]
pub struct Tally {
    pub matches: u32,
    pub landlord_wins: u32,
    pub multiplier_sum: u64,
    pub redeals: u32,
    pub totals: [i64; 3],
    pub wins: [u32; 3],
    pub landlord_count: [u32; 3],
}

impl Tally {
    pub fn record(&mut self, report: &MatchReport) {
        let Some(result) = &report.result else {
            return;
        };
        self.matches += 1;
        self.redeals += u32::from(report.redeals);
        self.multiplier_sum += u64::from(result.multiplier);
        if result.landlord_won {
            self.landlord_wins += 1;
        }
        self.landlord_count[usize::from(result.landlord)] += 1;
        for (seat, delta) in result.deltas.iter().enumerate() {
            self.totals[seat] += delta;
            if *delta > 0 {
                self.wins[seat] += 1;
            }
        }
    }

    pub fn landlord_win_rate(&self) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        f64::from(self.landlord_wins) / f64::from(self.matches)
    }

    pub fn avg_multiplier(&self) -> f64 {
        if self.matches == 0 {
            return 0.0;
        }
        self.multiplier_sum as f64 / f64::from(self.matches)
    }
}
