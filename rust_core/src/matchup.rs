//! Matchup adjustment for player props.
//!
//! Converts opponent/pace/blowout context into a bounded probability
//! adjustment. The model is:
//! - Pace: a faster combined pace means more possessions and more chances
//!   at a counting stat.
//! - Defense: an opponent that concedes more of the stat than league
//!   average inflates the over.
//! - Blowout risk: a large defensive-rating mismatch raises the chance of
//!   garbage time cutting starter minutes. Two discrete thresholds (>10,
//!   >5) are used rather than a continuous curve; the step behavior at the
//!   boundaries is intentional.
//!
//! The team-level factor triple is cached per (subject, opponent, stat) for
//! the session; player volatility is applied on top per call.

use crate::league::{team_defense_or_default, LEAGUE_AVG_PACE};
use crate::models::{MatchupAdjustment, StatType};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Bounds for the individual multipliers.
const MULTIPLIER_MIN: f64 = 0.85;
const MULTIPLIER_MAX: f64 = 1.15;

/// Bound for the final probability adjustment.
const PROBABILITY_ADJ_CAP: f64 = 0.15;

/// Player volatility stats, when the calibrator has them available.
#[derive(Debug, Clone, Copy)]
pub struct PlayerVolatility {
    pub stat_mean: f64,
    pub stat_std_dev: f64,
}

impl PlayerVolatility {
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.stat_mean <= 0.0 {
            0.0
        } else {
            self.stat_std_dev / self.stat_mean
        }
    }
}

/// Team-level factors, independent of the player. Cacheable.
#[derive(Debug, Clone, Copy)]
struct TeamFactors {
    pace_multiplier: f64,
    defense_multiplier: f64,
    blowout_risk_multiplier: f64,
}

/// Matchup adjuster with a session-scoped team-factor cache.
///
/// Explicitly constructed and injected; construction is free and the cache
/// starts empty, so a fresh adjuster per batch is also fine.
pub struct MatchupAdjuster {
    cache: RwLock<FxHashMap<(String, String, StatType), TeamFactors>>,
}

impl MatchupAdjuster {
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    /// Compute the matchup adjustment for a subject team's player against an
    /// opponent, for one stat market.
    pub fn adjust(
        &self,
        subject_team: &str,
        opponent_team: &str,
        stat: StatType,
        volatility: Option<PlayerVolatility>,
    ) -> MatchupAdjustment {
        let factors = self.team_factors(subject_team, opponent_team, stat);

        let total_multiplier = factors.pace_multiplier
            * factors.defense_multiplier
            * factors.blowout_risk_multiplier;

        // Volatility tweak: high-variance players get a small haircut,
        // low-variance players a small bump.
        let volatility_adjustment = match volatility.map(|v| v.coefficient_of_variation()) {
            Some(cv) if cv > 0.40 => -0.03,
            Some(cv) if cv < 0.20 => 0.02,
            _ => 0.0,
        };

        let probability_adjustment = ((total_multiplier - 1.0) * 0.5 + volatility_adjustment)
            .clamp(-PROBABILITY_ADJ_CAP, PROBABILITY_ADJ_CAP);

        let favorable_matchup =
            total_multiplier > 1.05 && factors.blowout_risk_multiplier > 0.95;

        let mut notes = Vec::new();
        if factors.pace_multiplier > 1.02 {
            notes.push(format!(
                "fast pace matchup (x{:.3})",
                factors.pace_multiplier
            ));
        } else if factors.pace_multiplier < 0.98 {
            notes.push(format!(
                "slow pace matchup (x{:.3})",
                factors.pace_multiplier
            ));
        }
        if factors.defense_multiplier > 1.02 {
            notes.push(format!(
                "{} concedes above-average {} (x{:.3})",
                opponent_team,
                stat.as_str(),
                factors.defense_multiplier
            ));
        } else if factors.defense_multiplier < 0.98 {
            notes.push(format!(
                "{} defends {} well (x{:.3})",
                opponent_team,
                stat.as_str(),
                factors.defense_multiplier
            ));
        }
        if factors.blowout_risk_multiplier < 1.0 {
            notes.push(format!(
                "blowout risk from rating mismatch (x{:.2})",
                factors.blowout_risk_multiplier
            ));
        }
        if volatility_adjustment != 0.0 {
            notes.push(format!("volatility adjustment {:+.2}", volatility_adjustment));
        }

        MatchupAdjustment {
            pace_multiplier: factors.pace_multiplier,
            defense_multiplier: factors.defense_multiplier,
            blowout_risk_multiplier: factors.blowout_risk_multiplier,
            total_multiplier,
            probability_adjustment,
            favorable_matchup,
            notes,
        }
    }

    /// Look up or compute the cacheable team-level factor triple.
    fn team_factors(&self, subject: &str, opponent: &str, stat: StatType) -> TeamFactors {
        let key = (
            subject.to_uppercase(),
            opponent.to_uppercase(),
            stat,
        );

        if let Some(cached) = self.cache.read().get(&key) {
            return *cached;
        }

        let subject_stats = team_defense_or_default(subject);
        let opponent_stats = team_defense_or_default(opponent);

        let avg_pace = (subject_stats.pace + opponent_stats.pace) / 2.0;
        let pace_multiplier =
            (avg_pace / LEAGUE_AVG_PACE).clamp(MULTIPLIER_MIN, MULTIPLIER_MAX);

        let defense_multiplier = (opponent_stats.allowed(stat)
            / stat.league_average_allowed())
        .clamp(MULTIPLIER_MIN, MULTIPLIER_MAX);

        // Discrete thresholds by design; see module docs.
        let rating_gap =
            (subject_stats.defensive_rating - opponent_stats.defensive_rating).abs();
        let blowout_risk_multiplier = if rating_gap > 10.0 {
            0.92
        } else if rating_gap > 5.0 {
            0.96
        } else {
            1.0
        };

        let factors = TeamFactors {
            pace_multiplier,
            defense_multiplier,
            blowout_risk_multiplier,
        };
        self.cache.write().insert(key, factors);
        factors
    }
}

impl Default for MatchupAdjuster {
    fn default() -> Self {
        Self::new()
    }
}
