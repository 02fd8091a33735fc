//! Final QA gate over enhanced bets.
//!
//! Re-derives the market-math identities from each bet's own published
//! fields and rejects anything that drifted: a bet whose stored EV, edge or
//! fair odds no longer agree with its probability is a symptom of a bug
//! upstream, not a bad bet. Individual mismatches go to the rejection list
//! and the batch continues; the only hard error is a bet carrying
//! non-finite published numbers, which no input data can produce.

use crate::config::ScoringConfig;
use crate::error::PropEdgeError;
use crate::models::{EnhancedBet, QualityTier, RejectionRecord};
use log::warn;

/// How strictly the gate re-checks published numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Production gate: tight tolerance, conservative probability ceiling.
    Strict,
    /// Backtest / research gate: wide tolerance for replayed historical data.
    Lenient,
}

impl ValidationMode {
    /// Relative tolerance for re-derived identities.
    fn tolerance(&self) -> f64 {
        match self {
            ValidationMode::Strict => 0.01,
            ValidationMode::Lenient => 0.10,
        }
    }

    /// Published probabilities above this are implausible for player props.
    fn probability_ceiling(&self) -> f64 {
        match self {
            ValidationMode::Strict => 0.82,
            ValidationMode::Lenient => 0.95,
        }
    }

    /// Allowed excess of confidence over probability * 100.
    fn confidence_buffer(&self) -> f64 {
        match self {
            ValidationMode::Strict => 5.0,
            ValidationMode::Lenient => 25.0,
        }
    }
}

pub struct BetValidator {
    mode: ValidationMode,
    config: ScoringConfig,
}

impl BetValidator {
    pub fn new(mode: ValidationMode, config: ScoringConfig) -> Self {
        Self { mode, config }
    }

    pub fn strict() -> Self {
        Self::new(ValidationMode::Strict, ScoringConfig::default())
    }

    pub fn lenient() -> Self {
        Self::new(ValidationMode::Lenient, ScoringConfig::default())
    }

    /// Re-derive every published identity for one bet. Returns the ordered
    /// list of violations; empty means the bet passes.
    pub fn violations(&self, bet: &EnhancedBet) -> Vec<String> {
        let mut violations = Vec::new();
        let tol = self.mode.tolerance();
        let p = bet.calibrated_probability;

        // NaN compares false against every tolerance below, so non-finite
        // numbers must be caught explicitly or they would sail through
        if let Some(defect) = structural_defect(bet) {
            violations.push(defect);
            return violations;
        }

        // Fair odds identity: fair * p == 1
        let identity_drift = (bet.fair_odds * p - 1.0).abs();
        if identity_drift > tol {
            violations.push(format!(
                "fair-odds identity drift {:.4} exceeds {:.2} tolerance",
                identity_drift, tol
            ));
        }

        // EV re-derivation
        let expected_ev = p * bet.odds - 1.0;
        if relative_drift(bet.expected_value, expected_ev) > tol {
            violations.push(format!(
                "published EV {:.4} disagrees with re-derived {:.4}",
                bet.expected_value, expected_ev
            ));
        }

        // Edge re-derivation
        let expected_edge = (p - 1.0 / bet.odds) * 100.0;
        if relative_drift(bet.edge_pct, expected_edge) > tol {
            violations.push(format!(
                "published edge {:.2}% disagrees with re-derived {:.2}%",
                bet.edge_pct, expected_edge
            ));
        }

        // Plausibility ceiling
        let ceiling = self.mode.probability_ceiling();
        if p > ceiling {
            violations.push(format!(
                "probability {:.3} above the {:.2} plausibility ceiling",
                p, ceiling
            ));
        }

        // Confidence must track probability. Matchup/injury adjustments move
        // confidence at x10 per probability unit, not x100, so the limit is
        // rebuilt from the pre-adjustment probability plus the same x10 shift.
        let adjustment = bet.confidence.matchup_adjustment + bet.confidence.injury_adjustment;
        let base_probability = (p - adjustment).clamp(0.0, 1.0);
        let confidence_limit =
            base_probability * 100.0 + adjustment * 10.0 + self.mode.confidence_buffer();
        if bet.confidence.final_confidence > confidence_limit {
            violations.push(format!(
                "confidence {:.1} exceeds probability-implied limit {:.1}",
                bet.confidence.final_confidence, confidence_limit
            ));
        }

        // S-tier bets must still satisfy the full admission conjunction
        if bet.quality_tier == QualityTier::S {
            violations.extend(self.s_tier_violations(bet));
        }

        violations
    }

    fn s_tier_violations(&self, bet: &EnhancedBet) -> Vec<String> {
        let cfg = &self.config;
        let mut violations = Vec::new();
        if bet.expected_value < cfg.s_tier_min_ev {
            violations.push(format!(
                "S tier with EV {:.3} below {:.2} floor",
                bet.expected_value, cfg.s_tier_min_ev
            ));
        }
        if bet.calibrated_probability < cfg.s_tier_min_probability {
            violations.push(format!(
                "S tier with probability {:.3} below {:.2} floor",
                bet.calibrated_probability, cfg.s_tier_min_probability
            ));
        }
        if bet.confidence.final_confidence < cfg.s_tier_min_confidence {
            violations.push(format!(
                "S tier with confidence {:.1} below {:.0} floor",
                bet.confidence.final_confidence, cfg.s_tier_min_confidence
            ));
        }
        if bet.minutes_volatility_score >= cfg.s_tier_max_volatility_score {
            violations.push(format!(
                "S tier with volatility score {:.1} at or above {:.1} ceiling",
                bet.minutes_volatility_score, cfg.s_tier_max_volatility_score
            ));
        }
        if bet.correlation_multiplier < 1.0 {
            violations.push("S tier carrying a correlation penalty".to_string());
        }
        violations
    }

    /// Convenience form of [`violations`](Self::violations).
    pub fn validate(&self, bet: &EnhancedBet) -> (bool, Vec<String>) {
        let violations = self.violations(bet);
        (violations.is_empty(), violations)
    }

    /// Gate a whole batch. Every failure, including a batch losing all of
    /// its bets, is routine: rejections are logged and returned alongside
    /// the survivors. The lone hard error is a structural defect (non-finite
    /// published numbers), which only a code bug can produce.
    pub fn filter_valid(
        &self,
        bets: Vec<EnhancedBet>,
    ) -> Result<(Vec<EnhancedBet>, Vec<RejectionRecord>), PropEdgeError> {
        let total = bets.len();
        let mut valid = Vec::with_capacity(total);
        let mut rejections = Vec::new();
        let mut structural = 0;

        for bet in bets {
            if structural_defect(&bet).is_some() {
                structural += 1;
            }
            let violations = self.violations(&bet);
            if violations.is_empty() {
                valid.push(bet);
            } else {
                warn!(
                    "validation rejected {}: {}",
                    bet.market.label(),
                    violations.join("; ")
                );
                rejections.push(RejectionRecord {
                    market: bet.market,
                    reasons: violations,
                });
            }
        }

        if structural > 0 {
            return Err(PropEdgeError::SystemicValidationFailure {
                failed: structural,
                total,
            });
        }
        Ok((valid, rejections))
    }
}

/// Non-finite published numbers cannot come from any market input; they mean
/// a derivation bug upstream.
fn structural_defect(bet: &EnhancedBet) -> Option<String> {
    let fields = [
        ("calibrated_probability", bet.calibrated_probability),
        ("fair_odds", bet.fair_odds),
        ("expected_value", bet.expected_value),
        ("edge_pct", bet.edge_pct),
        ("final_confidence", bet.confidence.final_confidence),
        ("final_score", bet.final_score),
    ];
    fields
        .iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, value)| format!("non-finite {}: {}", name, value))
}

fn relative_drift(published: f64, derived: f64) -> f64 {
    let scale = derived.abs().max(1e-9);
    (published - derived).abs() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ConfidenceResult, ConsistencyRank, MarketKey, Recommendation, RiskLevel, StatType,
    };

    fn make_bet(p: f64, odds: f64) -> EnhancedBet {
        let confidence = ConfidenceResult {
            final_confidence: p * 100.0,
            adjusted_probability: p,
            risk_level: RiskLevel::Low,
            base_confidence: p * 100.0,
            sample_size_cap: 0.95,
            volatility_penalty: 0.0,
            matchup_adjustment: 0.0,
            injury_adjustment: 0.0,
            role_change_penalty: 0.0,
            bayesian_hit_rate: p,
            bayesian_probability: p,
            sufficient_sample: true,
            minutes_stable: true,
            role_stable: true,
            favorable_matchup: false,
            bet_recommendation: Recommendation::Consider,
            multi_safe: true,
            notes: vec![],
        };
        EnhancedBet {
            market: MarketKey::new("T. Player", StatType::Points, "G1"),
            line: 20.5,
            odds,
            sample_size: 60,
            confidence,
            calibrated_probability: p,
            quality_tier: QualityTier::B,
            sample_size_penalty: 0.0,
            correlation_penalty: 0.0,
            line_difficulty_penalty: 0.0,
            correlation_multiplier: 1.0,
            consistency_rank: ConsistencyRank::Solid,
            consistency_score: 70.0,
            fair_odds: 1.0 / p,
            odds_mispricing: odds - 1.0 / p,
            expected_value: p * odds - 1.0,
            edge_pct: (p - 1.0 / odds) * 100.0,
            ev_to_prob_ratio: (p * odds - 1.0) / p,
            projection_margin: 1.5,
            minutes_volatility_score: 1.5,
            final_score: 50.0,
            passes_efficiency_check: true,
            passes_ev_ratio: true,
            warnings: vec![],
        }
    }

    #[test]
    fn test_consistent_bet_passes_strict() {
        let validator = BetValidator::strict();
        assert!(validator.violations(&make_bet(0.62, 2.05)).is_empty());
    }

    #[test]
    fn test_fair_odds_drift_caught_strict_not_lenient() {
        let mut bet = make_bet(0.62, 2.05);
        bet.fair_odds = 1.0 / 0.62 * 1.05; // 5% drift

        let strict = BetValidator::strict().violations(&bet);
        assert!(strict.iter().any(|v| v.contains("fair-odds")));

        let lenient = BetValidator::lenient().violations(&bet);
        assert!(lenient.is_empty());
    }

    #[test]
    fn test_ev_and_edge_redivation() {
        let mut bet = make_bet(0.62, 2.05);
        bet.expected_value = 0.50; // true value is 0.271
        bet.edge_pct = 25.0; // true value is 13.2
        let violations = BetValidator::strict().violations(&bet);
        assert!(violations.iter().any(|v| v.contains("published EV")));
        assert!(violations.iter().any(|v| v.contains("published edge")));
    }

    #[test]
    fn test_probability_ceiling_per_mode() {
        let bet = make_bet(0.88, 1.20);
        let strict = BetValidator::strict().violations(&bet);
        assert!(strict.iter().any(|v| v.contains("plausibility ceiling")));

        // 0.88 is under the lenient 0.95 ceiling
        let lenient = BetValidator::lenient().violations(&bet);
        assert!(!lenient.iter().any(|v| v.contains("plausibility ceiling")));
    }

    #[test]
    fn test_confidence_probability_coupling() {
        let mut bet = make_bet(0.60, 2.05);
        bet.confidence.final_confidence = 70.0; // limit is 60 + 5 strict
        let strict = BetValidator::strict().violations(&bet);
        assert!(strict.iter().any(|v| v.contains("probability-implied")));

        // Lenient buffer is 25: 70 <= 85, fine
        let lenient = BetValidator::lenient().violations(&bet);
        assert!(lenient.is_empty());
    }

    #[test]
    fn test_s_tier_full_recheck() {
        let mut bet = make_bet(0.68, 2.00); // ev 0.36
        bet.quality_tier = QualityTier::S;
        bet.confidence.final_confidence = 72.0; // below the 75 S floor
        let violations = BetValidator::strict().violations(&bet);
        assert!(violations.iter().any(|v| v.contains("S tier")));

        bet.quality_tier = QualityTier::A;
        // A tier gets no S recheck
        let violations = BetValidator::strict().violations(&bet);
        assert!(!violations.iter().any(|v| v.contains("S tier")));
    }

    #[test]
    fn test_filter_valid_partitions() {
        let good = make_bet(0.62, 2.05);
        let mut bad = make_bet(0.62, 2.05);
        bad.expected_value = 1.5;

        let (valid, rejections) = BetValidator::strict()
            .filter_valid(vec![good, bad])
            .unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(rejections.len(), 1);
        assert!(!rejections[0].reasons.is_empty());
    }

    #[test]
    fn test_all_rejected_batch_is_still_ok() {
        // Routine QA rejections never abort a batch, even when nothing
        // survives: a 95%-hit-rate player tripping the strict probability
        // ceiling is ordinary market data, not a code defect
        let a = make_bet(0.88, 1.20);
        let b = make_bet(0.90, 1.15);

        let (valid, rejections) = BetValidator::strict().filter_valid(vec![a, b]).unwrap();
        assert!(valid.is_empty());
        assert_eq!(rejections.len(), 2);
        for rejection in &rejections {
            assert!(rejection
                .reasons
                .iter()
                .any(|r| r.contains("plausibility ceiling")));
        }
    }

    #[test]
    fn test_non_finite_identities_are_systemic() {
        let mut a = make_bet(0.62, 2.05);
        a.fair_odds = f64::NAN;
        let mut b = make_bet(0.58, 2.20);
        b.expected_value = f64::INFINITY;
        let good = make_bet(0.60, 2.00);

        let result = BetValidator::strict().filter_valid(vec![a, b, good]);
        assert!(matches!(
            result,
            Err(PropEdgeError::SystemicValidationFailure { failed: 2, total: 3 })
        ));
    }

    #[test]
    fn test_nan_cannot_slip_past_tolerances() {
        // NaN compares false against thresholds; the explicit finiteness
        // check must catch it
        let mut bet = make_bet(0.62, 2.05);
        bet.calibrated_probability = f64::NAN;
        let violations = BetValidator::lenient().violations(&bet);
        assert!(violations.iter().any(|v| v.contains("non-finite")));
    }

    #[test]
    fn test_negative_adjustment_bet_passes_strict() {
        // Base probability 0.62 pulled to 0.54 by a -0.08 matchup term;
        // confidence moves x10 per probability unit, so the published
        // confidence legitimately sits above p*100 + 5
        let mut bet = make_bet(0.54, 2.05);
        bet.confidence.matchup_adjustment = -0.08;
        bet.confidence.final_confidence = 62.0;
        bet.confidence.base_confidence = 62.8;
        let violations = BetValidator::strict().violations(&bet);
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_empty_batch_is_fine() {
        let (valid, rejections) = BetValidator::strict().filter_valid(vec![]).unwrap();
        assert!(valid.is_empty());
        assert!(rejections.is_empty());
    }
}
