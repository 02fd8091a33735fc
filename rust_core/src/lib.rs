//! PropEdge Core - player-prop scoring and tiering pipeline.
//!
//! This crate provides:
//! - Matchup adjustment (pace / defense / blowout risk) with bounded output
//! - Bayesian confidence & risk calibration with a sample-size hard cap
//! - Enhancement & tiering (fair odds, EV, correlation, S-D quality tiers)
//! - A strict/lenient QA gate that re-derives every published identity
//! - Async provider traits plus a candidate assembler over raw game logs
//! - Batch scoring with rayon parallelism and deterministic ordering

pub mod config;
pub mod confidence;
pub mod enhance;
pub mod error;
pub mod league;
pub mod matchup;
pub mod models;
pub mod providers;
pub mod validation;

pub use config::ScoringConfig;
pub use confidence::ConfidenceCalibrator;
pub use enhance::EnhancementEngine;
pub use error::PropEdgeError;
pub use matchup::{MatchupAdjuster, PlayerVolatility};
pub use models::{
    Candidate, ConfidenceResult, EnhancedBet, MarketKey, MatchupAdjustment, QualityTier,
    Recommendation, RejectionRecord, RiskLevel, SlateResult, StatType,
};
pub use validation::{BetValidator, ValidationMode};

use chrono::Utc;
use log::info;
use rayon::prelude::*;
use uuid::Uuid;

/// End-to-end scoring pipeline: matchup -> calibration -> enhancement -> QA.
///
/// Stages are owned, not shared, so callers configure once and score many
/// slates. Per-candidate work is parallel; the correlation pass, sort and QA
/// gate are sequential so a slate's output is reproducible.
pub struct PropScoringPipeline {
    matchup: MatchupAdjuster,
    calibrator: ConfidenceCalibrator,
    engine: EnhancementEngine,
    validator: BetValidator,
}

impl PropScoringPipeline {
    pub fn new(config: ScoringConfig, mode: ValidationMode) -> Self {
        Self {
            matchup: MatchupAdjuster::new(),
            calibrator: ConfidenceCalibrator::new(),
            engine: EnhancementEngine::new(config.clone()),
            validator: BetValidator::new(mode, config),
        }
    }

    /// Production defaults: calibrated thresholds, strict QA.
    pub fn production() -> Self {
        Self::new(ScoringConfig::default(), ValidationMode::Strict)
    }

    /// Backtest defaults: same thresholds, lenient QA for replayed data.
    pub fn backtest() -> Self {
        Self::new(ScoringConfig::default(), ValidationMode::Lenient)
    }

    /// Score one slate of candidates.
    ///
    /// Individual candidates can only be rejected, never abort the batch;
    /// the lone hard error is the QA gate finding non-finite published
    /// numbers, which no market input can produce.
    pub fn score_slate(
        &self,
        candidates: Vec<Candidate>,
    ) -> Result<SlateResult, PropEdgeError> {
        let total = candidates.len();

        // Scatter: matchup + calibration per candidate
        let scored: Vec<(Candidate, ConfidenceResult)> = candidates
            .into_par_iter()
            .map(|candidate| {
                let volatility = PlayerVolatility {
                    stat_mean: candidate.stat_mean,
                    stat_std_dev: candidate.stat_std_dev,
                };
                let adjustment = self.matchup.adjust(
                    &candidate.team,
                    &candidate.opponent,
                    candidate.market.stat,
                    Some(volatility),
                );
                let confidence = self.calibrator.calibrate(&candidate, Some(&adjustment));
                (candidate, confidence)
            })
            .collect();

        // Gather: enhancement (correlation, tiers, sort) then the QA gate
        let (bets, mut rejections) = self.engine.enhance_batch(scored);
        let (valid, qa_rejections) = self.validator.filter_valid(bets)?;
        rejections.extend(qa_rejections);

        info!(
            "scored slate: {} candidates -> {} bets, {} rejections",
            total,
            valid.len(),
            rejections.len()
        );

        Ok(SlateResult {
            slate_id: Uuid::new_v4(),
            scored_at: Utc::now(),
            bets: valid,
            rejections,
        })
    }
}

impl Default for PropScoringPipeline {
    fn default() -> Self {
        Self::production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::InjuryContext;

    fn make_candidate(player: &str, game_id: &str) -> Candidate {
        Candidate {
            market: MarketKey::new(player, StatType::Points, game_id),
            team: "BOS".to_string(),
            opponent: "WAS".to_string(),
            line: 22.5,
            odds: 2.00,
            sample_size: 60,
            historical_hit_rate: 0.64,
            projected_probability: 0.64,
            stat_mean: 24.0,
            stat_std_dev: 3.5,
            minutes_stable: true,
            role_change_detected: false,
            recent_games: vec![26.0, 23.0, 25.0, 24.0, 27.0],
            matchup_factors: None,
            injury_context: None,
        }
    }

    #[test]
    fn test_end_to_end_slate() {
        let pipeline = PropScoringPipeline::production();
        let slate = pipeline
            .score_slate(vec![
                make_candidate("J. Tatum", "BOS@WAS"),
                make_candidate("J. Brown", "BOS@WAS"),
            ])
            .unwrap();

        assert_eq!(slate.bets.len() + slate.rejections.len(), 2);
        for bet in &slate.bets {
            // Published identities must survive the strict gate
            assert!((bet.fair_odds * bet.calibrated_probability - 1.0).abs() < 0.01);
            assert!(
                bet.confidence.final_confidence
                    <= bet.confidence.sample_size_cap * 100.0 + 1e-9
            );
        }
        // Output order is tier-first
        for pair in slate.bets.windows(2) {
            assert!(pair[0].quality_tier.rank() <= pair[1].quality_tier.rank());
        }
    }

    #[test]
    fn test_degenerate_candidate_rejected_not_fatal() {
        let pipeline = PropScoringPipeline::production();
        let mut bad = make_candidate("Bad Odds", "G1");
        bad.odds = 1.0;

        let slate = pipeline
            .score_slate(vec![make_candidate("Fine", "G2"), bad])
            .unwrap();
        assert_eq!(slate.bets.len(), 1);
        assert_eq!(slate.rejections.len(), 1);
        assert_eq!(slate.rejections[0].market.player, "Bad Odds");
    }

    #[test]
    fn test_qa_rejecting_every_bet_is_not_fatal() {
        // A 95%-hit-rate player calibrates above the strict 0.82 probability
        // ceiling; that is routine market data, so a single-candidate slate
        // returns empty bets plus the diagnostic, never an error
        let pipeline = PropScoringPipeline::production();
        let mut hot = make_candidate("Hot Hand", "G1");
        hot.sample_size = 100;
        hot.historical_hit_rate = 0.95;
        hot.projected_probability = 0.95;

        let slate = pipeline.score_slate(vec![hot]).unwrap();
        assert!(slate.bets.is_empty());
        assert_eq!(slate.rejections.len(), 1);
        assert_eq!(slate.rejections[0].market.player, "Hot Hand");
        assert!(slate.rejections[0]
            .reasons
            .iter()
            .any(|r| r.contains("plausibility ceiling")));
    }

    #[test]
    fn test_empty_slate() {
        let pipeline = PropScoringPipeline::production();
        let slate = pipeline.score_slate(vec![]).unwrap();
        assert!(slate.bets.is_empty());
        assert!(slate.rejections.is_empty());
    }

    #[test]
    fn test_high_risk_candidate_flows_to_skip() {
        let pipeline = PropScoringPipeline::production();
        let mut shaky = make_candidate("Shaky", "G1");
        shaky.sample_size = 12;
        shaky.stat_std_dev = 12.0; // cv 0.50
        shaky.minutes_stable = false;
        shaky.role_change_detected = true;

        let slate = pipeline.score_slate(vec![shaky]).unwrap();
        if let Some(bet) = slate.bets.first() {
            assert_eq!(bet.confidence.risk_level, RiskLevel::Extreme);
            assert_eq!(bet.confidence.bet_recommendation, Recommendation::Skip);
            assert!(!bet.confidence.multi_safe);
        }
    }

    #[test]
    fn test_injury_context_moves_probability() {
        let pipeline = PropScoringPipeline::production();
        let plain = make_candidate("Same Player", "G1");
        let mut boosted = make_candidate("Same Player", "G2");
        boosted.injury_context = Some(InjuryContext {
            key_player_out: true,
            usage_increase_expected: true,
            assist_opportunities_impact: 0.0,
        });

        let plain_slate = pipeline.score_slate(vec![plain]).unwrap();
        let boosted_slate = pipeline.score_slate(vec![boosted]).unwrap();
        let p_plain = plain_slate.bets[0].calibrated_probability;
        let p_boosted = boosted_slate.bets[0].calibrated_probability;
        assert!(p_boosted > p_plain);
    }
}
