//! Applies settled rounds to the rating store.
//!
//! Concurrent matches may share identities. Each read-modify-write holds a
//! per-identity async mutex; a round takes the locks of all its identities
//! in sorted key order so two rounds can never wait on each other in a cycle.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use super::identity::PlayerIdentity;
use super::model::{Rating, RatingRecord};
use super::store::RatingStore;
use super::trueskill::{update_two_teams, win_probability};
use crate::config::RatingConfig;
use crate::domain::events::RatingRole;
use crate::domain::rules::PLAYERS;
use crate::domain::scoring::RoundResult;
use crate::domain::state::{other_seats, Seat};
use crate::errors::domain::DomainError;

/// One rating track that moved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingChange {
    pub seat: Seat,
    pub identity: String,
    pub role: RatingRole,
    pub before: Rating,
    pub after: Rating,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatingOutcome {
    pub changes: Vec<RatingChange>,
    /// Identities left unrated this round, with the reason.
    pub skipped: Vec<(String, String)>,
}

/// Leaderboard line for one identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub identity: String,
    pub overall: Rating,
    pub conservative: f64,
    pub landlord: Option<Rating>,
    pub farmer: Option<Rating>,
    pub ladder_delta: f64,
    pub matches: u32,
}

pub struct RatingService {
    store: Arc<dyn RatingStore>,
    cfg: RatingConfig,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RatingService {
    pub fn new(store: Arc<dyn RatingStore>, cfg: RatingConfig) -> Self {
        Self {
            store,
            cfg,
            locks: DashMap::new(),
        }
    }

    pub fn config(&self) -> &RatingConfig {
        &self.cfg
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    /// Acquire every key's lock in ascending key order.
    async fn lock_all(&self, keys: &[String]) -> Vec<OwnedMutexGuard<()>> {
        let mut sorted: Vec<&String> = keys.iter().collect();
        sorted.sort();
        sorted.dedup();
        let mut guards = Vec::with_capacity(sorted.len());
        for key in sorted {
            guards.push(self.lock_for(key).lock_owned().await);
        }
        guards
    }

    async fn load_record(&self, key: &str) -> Result<RatingRecord, DomainError> {
        let mut rec = self.store.load(key).await?.unwrap_or_default();
        rec.ladder = std::mem::take(&mut rec.ladder).sanitized();
        Ok(rec)
    }

    /// Update overall and role tracks plus ladder entries for a settled
    /// round. Nothing is saved when the arithmetic turns non-finite.
    pub async fn rate_round(
        &self,
        seats: &[PlayerIdentity; PLAYERS],
        result: &RoundResult,
    ) -> Result<RatingOutcome, DomainError> {
        let keys: Vec<String> = seats.iter().map(PlayerIdentity::key).collect();
        let landlord = result.landlord;
        let farmers = other_seats(landlord);

        let mut outcome = RatingOutcome::default();
        let landlord_key = &keys[landlord as usize];
        let conflicted: HashSet<&String> = farmers
            .iter()
            .map(|&f| &keys[f as usize])
            .filter(|k| *k == landlord_key)
            .collect();
        for key in &conflicted {
            warn!(identity = %key, "Identity on both teams; not rated this round");
            outcome
                .skipped
                .push(((*key).clone(), "identity sits on both teams".into()));
        }

        let guards = self.lock_all(&keys).await;
        let rated = self.rate_locked(&keys, &conflicted, result, outcome).await;
        drop(guards);
        self.prune_locks(&keys);
        rated
    }

    /// Drop lock entries nobody else holds or waits on.
    fn prune_locks(&self, keys: &[String]) {
        for key in keys {
            self.locks.remove_if(key, |_, lock| Arc::strong_count(lock) == 1);
        }
    }

    /// Body of [`Self::rate_round`]; the caller holds every identity lock.
    /// All records are written in one batch after every update succeeds.
    async fn rate_locked(
        &self,
        keys: &[String],
        conflicted: &HashSet<&String>,
        result: &RoundResult,
        mut outcome: RatingOutcome,
    ) -> Result<RatingOutcome, DomainError> {
        let landlord = result.landlord;
        let farmers = other_seats(landlord);

        let mut records: HashMap<String, RatingRecord> = HashMap::new();
        for key in keys {
            if !records.contains_key(key) {
                records.insert(key.clone(), self.load_record(key).await?);
            }
        }

        let overall_pre: Vec<Rating> = keys
            .iter()
            .map(|k| records[k].overall_or_baseline(&self.cfg))
            .collect();
        let role_pre: Vec<Rating> = keys
            .iter()
            .enumerate()
            .map(|(s, k)| records[k].role_or_fallback(s == landlord as usize, &self.cfg))
            .collect();

        let overall_post = self.two_team_posteriors(&overall_pre, landlord, result.landlord_won)?;
        let role_post = self.two_team_posteriors(&role_pre, landlord, result.landlord_won)?;

        let landlord_win_p = win_probability(
            &[overall_pre[landlord as usize]],
            &farmers.map(|f| overall_pre[f as usize]),
            &self.cfg,
        );

        let mut pending: Vec<(String, RatingRecord)> = Vec::with_capacity(PLAYERS);
        let mut written: HashSet<String> = HashSet::new();
        for seat in 0..PLAYERS {
            let key = &keys[seat];
            if conflicted.contains(key) || !written.insert(key.clone()) {
                continue;
            }
            let is_landlord = seat == landlord as usize;
            let won = is_landlord == result.landlord_won;
            let expected = if is_landlord {
                landlord_win_p
            } else {
                1.0 - landlord_win_p
            };

            let Some(rec) = records.get_mut(key) else {
                continue;
            };
            rec.overall = Some(overall_post[seat]);
            rec.set_role(is_landlord, role_post[seat]);
            rec.ladder.record(won, expected, result.deltas[seat]);
            pending.push((key.clone(), rec.clone()));

            let seat_id = seat as Seat;
            outcome.changes.push(RatingChange {
                seat: seat_id,
                identity: key.clone(),
                role: RatingRole::Overall,
                before: overall_pre[seat],
                after: overall_post[seat],
            });
            outcome.changes.push(RatingChange {
                seat: seat_id,
                identity: key.clone(),
                role: if is_landlord {
                    RatingRole::Landlord
                } else {
                    RatingRole::Farmer
                },
                before: role_pre[seat],
                after: role_post[seat],
            });
            debug!(
                identity = %key,
                mu_before = overall_pre[seat].mu,
                mu_after = overall_post[seat].mu,
                "Rating updated"
            );
        }

        self.store.save_many(&pending).await?;
        info!(
            landlord_won = result.landlord_won,
            updated = written.len(),
            skipped = outcome.skipped.len(),
            "Round rated"
        );
        Ok(outcome)
    }

    /// Seat-indexed posteriors for landlord-vs-farmers.
    fn two_team_posteriors(
        &self,
        pre: &[Rating],
        landlord: Seat,
        landlord_won: bool,
    ) -> Result<Vec<Rating>, DomainError> {
        let farmers = other_seats(landlord);
        let lord_team = [pre[landlord as usize]];
        let farmer_team = farmers.map(|f| pre[f as usize]);

        let (lord_post, farmer_post) = if landlord_won {
            let up = update_two_teams(&lord_team, &farmer_team, &self.cfg)?;
            (up.winners, up.losers)
        } else {
            let up = update_two_teams(&farmer_team, &lord_team, &self.cfg)?;
            (up.losers, up.winners)
        };

        let mut post = pre.to_vec();
        post[landlord as usize] = lord_post[0];
        for (i, f) in farmers.iter().enumerate() {
            post[*f as usize] = farmer_post[i];
        }
        Ok(post)
    }

    /// Rating of `identity` on `role`, with the usual fallbacks.
    pub async fn rating_for(
        &self,
        identity: &PlayerIdentity,
        role: RatingRole,
    ) -> Result<Rating, DomainError> {
        let rec = self.load_record(&identity.key()).await?;
        Ok(match role {
            RatingRole::Overall => rec.overall_or_baseline(&self.cfg),
            RatingRole::Landlord => rec.role_or_fallback(true, &self.cfg),
            RatingRole::Farmer => rec.role_or_fallback(false, &self.cfg),
        })
    }

    /// All stored identities, best conservative rating first.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardRow>, DomainError> {
        let mut rows: Vec<LeaderboardRow> = self
            .store
            .all()
            .await?
            .into_iter()
            .map(|(identity, rec)| {
                let overall = rec.overall_or_baseline(&self.cfg);
                let ladder = rec.ladder.clone().sanitized();
                LeaderboardRow {
                    identity,
                    conservative: overall.conservative(),
                    overall,
                    landlord: rec.landlord.filter(Rating::is_valid),
                    farmer: rec.farmer.filter(Rating::is_valid),
                    ladder_delta: ladder.delta_rating(&self.cfg),
                    matches: ladder.matches,
                }
            })
            .collect();
        rows.sort_by(|a, b| {
            b.conservative
                .total_cmp(&a.conservative)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        Ok(rows)
    }
}
