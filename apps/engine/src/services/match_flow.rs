//! Drives one round for three seats: deal, bid (re-dealing when everyone
//! declines), double, play, score and rate.
//!
//! Each decision is bounded by the seat timeout. A seat that times out,
//! errors, or exceeds its rejection allowance gets the auto-resolve action
//! for the phase. Cancellation stops before the next mutation and returns
//! the last consistent state.

use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::seat::{DecisionRequest, SeatController};
use crate::config::MatchConfig;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::settle;
use crate::domain::{
    apply_command, auto_command, deal, derive_dealing_seed, Command, EngineEvent, GameState, Phase,
    RoundResult, RuleConfig, Seat, SeatView, Transition,
};
use crate::errors::domain::DomainError;
use crate::rating::{PlayerIdentity, RatingOutcome, RatingService};

/// Summary of one finished (or aborted) match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub match_id: Uuid,
    pub match_seed: u64,
    /// Identity keys by seat.
    pub seats: [String; PLAYERS],
    pub redeals: u8,
    /// `None` when the match was aborted before settling.
    pub result: Option<RoundResult>,
    pub rating: Option<RatingOutcome>,
    /// Why rating did not happen, when it was attempted and failed.
    pub rating_error: Option<String>,
    pub aborted: bool,
    /// Decisions the runner made on a seat's behalf.
    pub auto_resolved: u32,
    /// Submissions rejected as illegal.
    pub rejections: u32,
    pub event_count: usize,
    pub final_state: GameState,
}

/// Runs matches under one rule set and seat policy.
pub struct MatchRunner {
    rules: RuleConfig,
    config: MatchConfig,
    ratings: Option<Arc<RatingService>>,
    events: Option<mpsc::UnboundedSender<EngineEvent>>,
    cancel: CancellationToken,
}

/// Per-match bookkeeping.
struct MatchRun {
    match_id: Uuid,
    events: Option<mpsc::UnboundedSender<EngineEvent>>,
    event_count: usize,
    auto_resolved: u32,
    rejections: u32,
}

impl MatchRun {
    fn emit(&mut self, event: EngineEvent) {
        self.event_count += 1;
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                debug!(match_id = %self.match_id, "Event receiver dropped");
                self.events = None;
            }
        }
    }

    fn apply(&mut self, state: &GameState, command: Command) -> Result<GameState, DomainError> {
        let Transition { state, events } = apply_command(state, command)?;
        for event in events {
            self.emit(event);
        }
        Ok(state)
    }
}

impl MatchRunner {
    pub fn new(rules: RuleConfig, config: MatchConfig) -> Self {
        Self {
            rules,
            config,
            ratings: None,
            events: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Rate settled rounds through `service`.
    pub fn with_ratings(mut self, service: Arc<RatingService>) -> Self {
        self.ratings = Some(service);
        self
    }

    /// Forward every event to `tx`.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<EngineEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Play one match. A `None` seed draws one from the OS-seeded thread RNG.
    ///
    /// Errors: `PolicyExhausted` when every deal is declined more than
    /// `max_redeals` times; `Precondition` for a broken deal. Rating failures
    /// are reported in the `MatchReport` rather than returned.
    pub async fn run(
        &self,
        seats: &[Arc<dyn SeatController>; PLAYERS],
        match_seed: Option<u64>,
    ) -> Result<MatchReport, DomainError> {
        let match_seed = match_seed.unwrap_or_else(|| rand::rng().random());
        let identities: [PlayerIdentity; PLAYERS] =
            std::array::from_fn(|i| seats[i].identity().clone());
        let keys: [String; PLAYERS] = std::array::from_fn(|i| identities[i].key());

        let mut run = MatchRun {
            match_id: Uuid::new_v4(),
            events: self.events.clone(),
            event_count: 0,
            auto_resolved: 0,
            rejections: 0,
        };
        info!(match_id = %run.match_id, match_seed, seats = ?keys, "Match starting");

        let mut state = GameState::new(self.rules.clone());
        let mut deals: u16 = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Ok(self.aborted(run, match_seed, keys, deals, state));
            }
            match state.phase {
                Phase::Dealing => {
                    if deals > u16::from(self.rules.max_redeals) {
                        warn!(
                            match_id = %run.match_id,
                            deals,
                            max_redeals = self.rules.max_redeals,
                            "Every deal declined; giving up"
                        );
                        return Err(DomainError::PolicyExhausted(format!(
                            "all seats declined {deals} deals (max_redeals {})",
                            self.rules.max_redeals
                        )));
                    }
                    let attempt = u8::try_from(deals).map_err(|_| {
                        DomainError::PolicyExhausted(format!("deal attempt {deals} out of range"))
                    })?;
                    let dealt = deal(Some(derive_dealing_seed(match_seed, attempt)))?;
                    debug!(match_id = %run.match_id, attempt, deal_seed = dealt.seed, "Dealing");
                    state = run.apply(&state, Command::Deal { deal: dealt.into() })?;
                    deals += 1;
                }
                Phase::Settled => break,
                Phase::Bidding | Phase::Doubling | Phase::Playing => {
                    let seat = state.turn.ok_or_else(|| {
                        DomainError::validation_other("Invariant violated: turn must be set")
                    })?;
                    let controller = seats[usize::from(seat)].as_ref();
                    match self.resolve_turn(&mut run, &state, seat, controller).await? {
                        Some(next) => state = next,
                        None => return Ok(self.aborted(run, match_seed, keys, deals, state)),
                    }
                }
            }
        }

        let result = settle(&state)?;
        info!(
            match_id = %run.match_id,
            landlord = result.landlord,
            winner = result.winner,
            multiplier = result.multiplier,
            "Match settled"
        );

        let (rating, rating_error) = self.rate(&mut run, &identities, &result).await;

        Ok(MatchReport {
            match_id: run.match_id,
            match_seed,
            seats: keys,
            redeals: redeals_of(deals),
            result: Some(result),
            rating,
            rating_error,
            aborted: false,
            auto_resolved: run.auto_resolved,
            rejections: run.rejections,
            event_count: run.event_count,
            final_state: state,
        })
    }

    /// Ask `controller` until it submits a legal action, times out, fails,
    /// or runs out of retries. `None` means the match was cancelled.
    async fn resolve_turn(
        &self,
        run: &mut MatchRun,
        state: &GameState,
        seat: Seat,
        controller: &dyn SeatController,
    ) -> Result<Option<GameState>, DomainError> {
        let mut rejections: u32 = 0;
        let mut last_rejection: Option<String> = None;

        loop {
            let request = DecisionRequest {
                match_id: run.match_id,
                view: SeatView::for_seat(state, seat)?,
                attempt: rejections,
                last_rejection: last_rejection.take(),
            };

            let answer = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Ok(None),
                answer = tokio::time::timeout(self.config.seat_timeout(), controller.decide(request)) => answer,
            };

            let decision = match answer {
                Ok(Ok(decision)) => decision,
                Ok(Err(e)) => {
                    warn!(match_id = %run.match_id, seat, error = %e, "Seat failed to decide; auto-resolving");
                    return self.auto_resolve(run, state, seat).map(Some);
                }
                Err(_) => {
                    warn!(
                        match_id = %run.match_id,
                        seat,
                        timeout_ms = self.config.seat_timeout_ms,
                        "Seat timed out; auto-resolving"
                    );
                    return self.auto_resolve(run, state, seat).map(Some);
                }
            };

            match run.apply(state, decision.into_command(seat)) {
                Ok(next) => return Ok(Some(next)),
                Err(e) if e.is_recoverable() => {
                    rejections += 1;
                    run.rejections += 1;
                    debug!(match_id = %run.match_id, seat, attempt = rejections, error = %e, "Submission rejected");
                    if rejections > self.config.max_retries {
                        warn!(
                            match_id = %run.match_id,
                            seat,
                            max_retries = self.config.max_retries,
                            "Seat exhausted retries; auto-resolving"
                        );
                        return self.auto_resolve(run, state, seat).map(Some);
                    }
                    last_rejection = Some(e.to_string());
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn auto_resolve(
        &self,
        run: &mut MatchRun,
        state: &GameState,
        seat: Seat,
    ) -> Result<GameState, DomainError> {
        let command = auto_command(state, seat)?;
        debug!(match_id = %run.match_id, seat, ?command, "Auto-resolved");
        run.auto_resolved += 1;
        run.apply(state, command)
    }

    async fn rate(
        &self,
        run: &mut MatchRun,
        identities: &[PlayerIdentity; PLAYERS],
        result: &RoundResult,
    ) -> (Option<RatingOutcome>, Option<String>) {
        let Some(service) = &self.ratings else {
            return (None, None);
        };
        match service.rate_round(identities, result).await {
            Ok(outcome) => {
                for change in &outcome.changes {
                    run.emit(EngineEvent::RatingUpdated {
                        seat: change.seat,
                        identity: change.identity.clone(),
                        role: change.role,
                        mu_before: change.before.mu,
                        sigma_before: change.before.sigma,
                        mu_after: change.after.mu,
                        sigma_after: change.after.sigma,
                    });
                }
                for (identity, reason) in &outcome.skipped {
                    run.emit(EngineEvent::RatingSkipped {
                        identity: identity.clone(),
                        reason: reason.clone(),
                    });
                }
                (Some(outcome), None)
            }
            Err(e @ DomainError::Numerical(_)) => {
                warn!(match_id = %run.match_id, error = %e, "Rating update skipped");
                let mut keys: Vec<String> = identities.iter().map(PlayerIdentity::key).collect();
                keys.sort();
                keys.dedup();
                for identity in keys {
                    run.emit(EngineEvent::RatingSkipped {
                        identity,
                        reason: e.to_string(),
                    });
                }
                (None, Some(e.to_string()))
            }
            Err(e) => {
                error!(match_id = %run.match_id, error = %e, "Rating persistence failed");
                (None, Some(e.to_string()))
            }
        }
    }

    fn aborted(
        &self,
        run: MatchRun,
        match_seed: u64,
        seats: [String; PLAYERS],
        deals: u16,
        state: GameState,
    ) -> MatchReport {
        info!(match_id = %run.match_id, phase = ?state.phase, "Match aborted");
        MatchReport {
            match_id: run.match_id,
            match_seed,
            seats,
            redeals: redeals_of(deals),
            result: None,
            rating: None,
            rating_error: None,
            aborted: true,
            auto_resolved: run.auto_resolved,
            rejections: run.rejections,
            event_count: run.event_count,
            final_state: state,
        }
    }
}

fn redeals_of(deals: u16) -> u8 {
    u8::try_from(deals.saturating_sub(1)).unwrap_or(u8::MAX)
}
