//! Data provider boundary.
//!
//! The scoring core never fetches data itself; callers hand it providers
//! behind async traits so the same pipeline runs against live feeds, a
//! database replay, or the in-memory fixtures used in tests. The
//! `CandidateAssembler` sits on top of the providers and turns raw game
//! logs into scoring-ready `Candidate` records.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PropEdgeError;
use crate::league::{self, TeamDefenseStats, LEAGUE_AVG_PACE};
use crate::models::{Candidate, InjuryContext, MarketKey, MatchupFactors, StatType};

/// Minutes CV below which a player's playing time counts as stable.
const MINUTES_STABLE_CV: f64 = 0.25;

/// Relative shift in recent minutes that flags a role change.
const ROLE_CHANGE_THRESHOLD: f64 = 0.15;

/// Games in the recent-form window.
const RECENT_WINDOW: usize = 10;

/// One game from a player's log, most-recent-first in all provider output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLogEntry {
    pub date: DateTime<Utc>,
    pub stat_value: f64,
    pub minutes: f64,
}

#[async_trait]
pub trait GameLogProvider: Send + Sync {
    /// Full available log for one player and stat, most recent first.
    async fn game_log(&self, player: &str, stat: StatType) -> Result<Vec<GameLogEntry>>;
}

#[async_trait]
pub trait InjuryContextProvider: Send + Sync {
    /// Injury signals relevant to this player in this game, if any.
    async fn injury_context(&self, player: &str, game_id: &str)
        -> Result<Option<InjuryContext>>;
}

/// Team defense lookups are static data; no async needed.
pub trait TeamDefenseProvider: Send + Sync {
    fn team_defense(&self, team_code: &str) -> Option<&'static TeamDefenseStats>;
}

/// Default defense provider backed by the built-in league table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTeamDefenseProvider;

impl TeamDefenseProvider for StaticTeamDefenseProvider {
    fn team_defense(&self, team_code: &str) -> Option<&'static TeamDefenseStats> {
        league::get_team_defense(team_code)
    }
}

// ============================================================================
// In-Memory Providers (fixtures and backtests)
// ============================================================================

#[derive(Default)]
pub struct InMemoryGameLogProvider {
    logs: RwLock<FxHashMap<(String, StatType), Vec<GameLogEntry>>>,
}

impl InMemoryGameLogProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, player: impl Into<String>, stat: StatType, log: Vec<GameLogEntry>) {
        self.logs.write().insert((player.into(), stat), log);
    }
}

#[async_trait]
impl GameLogProvider for InMemoryGameLogProvider {
    async fn game_log(&self, player: &str, stat: StatType) -> Result<Vec<GameLogEntry>> {
        Ok(self
            .logs
            .read()
            .get(&(player.to_string(), stat))
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct InMemoryInjuryProvider {
    contexts: RwLock<FxHashMap<String, InjuryContext>>,
}

impl InMemoryInjuryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, player: impl Into<String>, context: InjuryContext) {
        self.contexts.write().insert(player.into(), context);
    }
}

#[async_trait]
impl InjuryContextProvider for InMemoryInjuryProvider {
    async fn injury_context(
        &self,
        player: &str,
        _game_id: &str,
    ) -> Result<Option<InjuryContext>> {
        Ok(self.contexts.read().get(player).cloned())
    }
}

// ============================================================================
// Candidate Assembler
// ============================================================================

/// Market terms for one prop offer, supplied by the caller.
#[derive(Debug, Clone)]
pub struct PropOffer {
    pub player: String,
    pub stat: StatType,
    pub game_id: String,
    pub team: String,
    pub opponent: String,
    pub line: f64,
    pub odds: f64,
}

/// Builds scoring-ready candidates from raw provider data.
pub struct CandidateAssembler {
    game_logs: Arc<dyn GameLogProvider>,
    injuries: Arc<dyn InjuryContextProvider>,
}

impl CandidateAssembler {
    pub fn new(
        game_logs: Arc<dyn GameLogProvider>,
        injuries: Arc<dyn InjuryContextProvider>,
    ) -> Self {
        Self { game_logs, injuries }
    }

    /// Assemble one candidate. An empty game log is the one unrecoverable
    /// input: there is nothing to score from.
    pub async fn assemble(&self, offer: &PropOffer) -> Result<Candidate, PropEdgeError> {
        if offer.player.trim().is_empty() {
            return Err(PropEdgeError::MissingField("player".to_string()));
        }
        if offer.odds <= 1.0 {
            return Err(PropEdgeError::InvalidCandidate {
                market: format!("{}:{}:{}", offer.game_id, offer.player, offer.stat.as_str()),
                reason: format!("decimal odds must exceed 1.0, got {:.3}", offer.odds),
            });
        }

        let log = self.game_logs.game_log(&offer.player, offer.stat).await?;
        if log.is_empty() {
            return Err(PropEdgeError::InsufficientData {
                player: offer.player.clone(),
                stat: offer.stat.as_str().to_string(),
                detail: "empty game log".to_string(),
            });
        }

        let n = log.len();
        let values: Vec<f64> = log.iter().map(|g| g.stat_value).collect();
        let minutes: Vec<f64> = log.iter().map(|g| g.minutes).collect();

        let stat_mean = mean(&values);
        let stat_std_dev = std_dev(&values, stat_mean);

        let hits = values.iter().filter(|&&v| v > offer.line).count();
        let historical_hit_rate = hits as f64 / n as f64;

        // Recent form: hit rate over the latest window, falling back to the
        // full-sample rate when the log is shorter than the window
        let projected_probability = if n >= RECENT_WINDOW {
            let recent_hits = values[..RECENT_WINDOW]
                .iter()
                .filter(|&&v| v > offer.line)
                .count();
            recent_hits as f64 / RECENT_WINDOW as f64
        } else {
            historical_hit_rate
        };

        let minutes_mean = mean(&minutes);
        let minutes_cv = if minutes_mean > 0.0 {
            std_dev(&minutes, minutes_mean) / minutes_mean
        } else {
            0.0
        };
        let minutes_stable = minutes_cv < MINUTES_STABLE_CV;

        let role_change_detected = detect_role_change(&minutes);

        // Raw matchup context from the league table, so candidates scored
        // without the matchup stage still get the calibrator's inline
        // adjustment
        let opponent_stats = league::team_defense_or_default(&offer.opponent);
        let matchup_factors = Some(MatchupFactors {
            pace_multiplier: opponent_stats.pace / LEAGUE_AVG_PACE,
            defense_adjustment: opponent_stats.allowed(offer.stat)
                / offer.stat.league_average_allowed(),
            opponent_defensive_rank: league::defensive_rank(&offer.opponent),
        });

        let injury_context = self
            .injuries
            .injury_context(&offer.player, &offer.game_id)
            .await?;

        debug!(
            player = %offer.player,
            stat = offer.stat.as_str(),
            games = n,
            hit_rate = historical_hit_rate,
            "assembled candidate"
        );

        Ok(Candidate {
            market: MarketKey::new(offer.player.clone(), offer.stat, offer.game_id.clone()),
            team: offer.team.clone(),
            opponent: offer.opponent.clone(),
            line: offer.line,
            odds: offer.odds,
            sample_size: n as u32,
            historical_hit_rate,
            projected_probability,
            stat_mean,
            stat_std_dev,
            minutes_stable,
            role_change_detected,
            recent_games: values.into_iter().take(20).collect(),
            matchup_factors,
            injury_context,
        })
    }
}

/// A role change is a shift of the last five games' average minutes more
/// than 15% away from the prior baseline. Needs at least ten games to call.
fn detect_role_change(minutes: &[f64]) -> bool {
    if minutes.len() < 10 {
        return false;
    }
    let recent = mean(&minutes[..5]);
    let prior = mean(&minutes[5..]);
    if prior <= 0.0 {
        return false;
    }
    ((recent - prior) / prior).abs() > ROLE_CHANGE_THRESHOLD
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
