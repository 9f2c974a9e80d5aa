//! Match simulator CLI - plays AI-vs-AI landlord matches, keeps ratings and
//! writes one JSON line per match.

mod metrics;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use landlord_engine::ai::{by_name, create_ai};
use landlord_engine::domain::{derive_seat_seed, RuleConfig};
use landlord_engine::rating::{
    JsonFileRatingStore, LeaderboardRow, MemoryRatingStore, RatingService, RatingStore,
};
use landlord_engine::{
    telemetry, AiSeat, EngineConfig, MatchReport, MatchRunner, PlayerIdentity, SeatController,
};
use metrics::{build_match_metrics, Tally};
use output::OutputWriter;
use rand::Rng;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "match-simulator")]
#[command(about = "Plays AI landlord matches and maintains ratings")]
struct Args {
    /// Number of matches to play
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// AI type for all seats
    #[arg(long, conflicts_with_all = ["seat0", "seat1", "seat2"])]
    seats: Option<AiType>,

    /// AI type for seat 0
    #[arg(long, default_value = "heuristic")]
    seat0: AiType,

    /// AI type for seat 1
    #[arg(long, default_value = "heuristic")]
    seat1: AiType,

    /// AI type for seat 2
    #[arg(long, default_value = "random")]
    seat2: AiType,

    /// Base seed; match `n` uses `seed + n`
    #[arg(long)]
    seed: Option<u64>,

    /// Rating file (JSON). Ratings stay in memory when omitted.
    #[arg(long)]
    ratings: Option<PathBuf>,

    /// JSONL file receiving one line per match
    #[arg(long)]
    output: Option<PathBuf>,

    /// Engine configuration (JSON). Defaults come from `LANDLORD_*` variables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Every seat bids once; later accepts raise the stake
    #[arg(long)]
    outbid: bool,

    /// Enable the double sub-phase after the reveal
    #[arg(long)]
    doubling: bool,

    /// Bombs and rockets double the score
    #[arg(long)]
    bombs_double: bool,

    /// Only the farmer who went out is paid
    #[arg(long)]
    no_farmer_coop: bool,

    /// Emit JSON logs at info level (overridable with RUST_LOG)
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AiType {
    Heuristic,
    Random,
}

impl AiType {
    fn name(self) -> &'static str {
        match self {
            AiType::Heuristic => "heuristic",
            AiType::Random => "random",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default; only warnings and errors
    match (args.verbose, args.json_logs) {
        (false, true) => telemetry::init_tracing(),
        (true, json) => telemetry::init_tracing_with("debug", json),
        (false, false) => telemetry::init_tracing_with("warn", false),
    }

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::from_env()?,
    };
    apply_rule_flags(&mut config.rules, &args);
    config.validate()?;

    let seat_types = match args.seats {
        Some(all) => [all; 3],
        None => [args.seat0, args.seat1, args.seat2],
    };
    info!(seats = ?seat_types, games = args.games, "Starting match simulator");

    let store: Arc<dyn RatingStore> = match &args.ratings {
        Some(path) => Arc::new(JsonFileRatingStore::new(path.clone())),
        None => Arc::new(MemoryRatingStore::new()),
    };
    let service = Arc::new(RatingService::new(store, config.rating.clone()));
    let runner =
        MatchRunner::new(config.rules.clone(), config.runner.clone()).with_ratings(service.clone());

    let mut writer = match &args.output {
        Some(path) => Some(OutputWriter::create(path)?),
        None => None,
    };

    let start = Instant::now();
    let mut tally = Tally::default();
    let mut errors = 0u32;

    for game in 1..=args.games {
        let match_seed = match args.seed {
            Some(s) => s.wrapping_add(u64::from(game)),
            None => rand::rng().random(),
        };
        let seats = build_seats(seat_types, match_seed)?;

        let game_start = Instant::now();
        match runner.run(&seats, Some(match_seed)).await {
            Ok(report) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                tally.record(&report);
                if let Some(err) = &report.rating_error {
                    warn!(game, error = %err, "Match not rated");
                }
                if let Some(w) = writer.as_mut() {
                    let metrics = build_match_metrics(game, &report, duration_ms);
                    if let Err(e) = w.write_match(&metrics) {
                        warn!(game, error = %e, "Failed to write match line");
                    }
                }
                log_match(game, &report);
            }
            Err(e) => {
                errors += 1;
                warn!(game, error = %e, "Match failed");
            }
        }
    }

    if let Some(w) = writer {
        w.finish()?;
    }

    let leaderboard = service.leaderboard().await?;
    print_summary(&tally, errors, start.elapsed(), args.games);
    print_leaderboard(&leaderboard);
    Ok(())
}

fn apply_rule_flags(rules: &mut RuleConfig, args: &Args) {
    rules.outbid |= args.outbid;
    rules.doubling |= args.doubling;
    rules.bombs_double |= args.bombs_double;
    if args.no_farmer_coop {
        rules.farmer_coop = false;
    }
}

fn build_seats(
    types: [AiType; 3],
    match_seed: u64,
) -> Result<[Arc<dyn SeatController>; 3], Box<dyn std::error::Error>> {
    let mut seats: Vec<Arc<dyn SeatController>> = Vec::with_capacity(3);
    for (seat, ai_type) in (0u8..).zip(types) {
        let name = ai_type.name();
        let factory = by_name(name).ok_or_else(|| format!("Unknown AI type: {name}"))?;
        let player = create_ai(name, Some(derive_seat_seed(match_seed, seat)))
            .ok_or_else(|| format!("Unknown AI type: {name}"))?;
        let identity = PlayerIdentity::new("builtin", factory.name, factory.version);
        seats.push(Arc::new(AiSeat::new(identity, player)));
    }
    seats
        .try_into()
        .map_err(|_| "expected exactly three seats".into())
}

fn log_match(game: u32, report: &MatchReport) {
    if let Some(result) = &report.result {
        info!(
            game,
            match_id = %report.match_id,
            landlord = result.landlord,
            landlord_won = result.landlord_won,
            multiplier = result.multiplier,
            redeals = report.redeals,
            "Match completed"
        );
    }
}

fn print_summary(tally: &Tally, errors: u32, elapsed: std::time::Duration, total: u32) {
    println!("\n=== Simulation Summary ===");
    println!("Matches completed: {}/{}", tally.matches, total);
    if errors > 0 {
        println!("Errors: {errors}");
    }
    println!("Total time: {elapsed:?}");
    if tally.matches == 0 {
        return;
    }
    println!("Average time per match: {:?}", elapsed / tally.matches);
    println!(
        "Landlord win rate: {:.1}%  avg multiplier: {:.2}  redeals: {}",
        tally.landlord_win_rate() * 100.0,
        tally.avg_multiplier(),
        tally.redeals
    );

    println!("\n=== Results by Seat ===");
    for seat in 0..3 {
        println!(
            "Seat {}: total={:+}, landlord {} times, wins={}",
            seat, tally.totals[seat], tally.landlord_count[seat], tally.wins[seat]
        );
    }
}

fn print_leaderboard(rows: &[LeaderboardRow]) {
    println!("\n=== Leaderboard (by conservative rating) ===");
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:>2}. {:<32} CR={:>7.2}  mu={:>6.2}  sigma={:>5.2}  ladder={:+.2} ({} matches)",
            rank + 1,
            row.identity,
            row.conservative,
            row.overall.mu,
            row.overall.sigma,
            row.ladder_delta,
            row.matches
        );
    }
}
