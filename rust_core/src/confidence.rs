//! Confidence & risk calibration for candidate props.
//!
//! Turns a raw model probability plus sample-size / volatility / matchup /
//! injury signals into a bounded, risk-adjusted probability and a 0-100
//! confidence score. The steps run in a fixed order; each consumes the
//! previous step's output, and the sample-size hard cap is always applied
//! last so no accumulation of bonuses can exceed it.
//!
//! Inputs are treated as already-sanitized (see `Candidate` docs); there is
//! no recoverable-error path here.

use crate::models::{
    Candidate, ConfidenceResult, MatchupAdjustment, Recommendation, RiskLevel, StatType,
};
use log::debug;

/// Prior probability both observed rates are shrunk toward.
const LEAGUE_PRIOR: f64 = 0.50;

/// Clamp for the matchup term inside the calibrator (tighter than the
/// matchup stage's own +/-0.15 bound).
const MATCHUP_ADJ_CAP: f64 = 0.10;

/// Clamp for the combined injury adjustment.
const INJURY_ADJ_CAP: f64 = 0.08;

/// Flat multiplicative confidence cut when a role change is detected.
const ROLE_CHANGE_PENALTY: f64 = 0.15;

/// Stateless calibration service. Construct once and share freely; batch
/// scoring stays trivially parallelizable because there is no hidden state.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceCalibrator;

impl ConfidenceCalibrator {
    pub fn new() -> Self {
        Self
    }

    /// Run the full calibration for one candidate.
    pub fn calibrate(
        &self,
        candidate: &Candidate,
        matchup: Option<&MatchupAdjustment>,
    ) -> ConfidenceResult {
        let n = candidate.sample_size;
        let mut notes = Vec::new();

        // Step 1: sample-size cap
        let sample_size_cap = sample_size_cap(n);
        let sufficient_sample = n >= 30;
        if !sufficient_sample {
            notes.push(format!("small sample (n={}), confidence capped at {:.0}", n, sample_size_cap * 100.0));
        }

        // Step 2: Bayesian shrinkage toward the league prior
        let bayesian_hit_rate = bayesian_shrink(candidate.historical_hit_rate, n);
        let bayesian_probability = bayesian_shrink(candidate.projected_probability, n);

        // Step 3: volatility penalty
        let cv = candidate.coefficient_of_variation();
        let mut volatility_penalty = volatility_penalty_from_cv(cv);
        if !candidate.minutes_stable {
            volatility_penalty += 0.05;
            notes.push("unstable minutes (+0.05 volatility penalty)".to_string());
        }
        if cv >= 0.40 {
            notes.push(format!("high stat volatility (cv={:.2})", cv));
        }

        // Step 4: matchup adjustment
        let (matchup_adjustment, favorable_matchup) = match matchup {
            Some(adj) => {
                let clamped = adj
                    .probability_adjustment
                    .clamp(-MATCHUP_ADJ_CAP, MATCHUP_ADJ_CAP);
                (clamped, adj.favorable_matchup)
            }
            None => (inline_matchup_adjustment(candidate), false),
        };
        if matchup_adjustment.abs() > 0.01 {
            notes.push(format!("matchup adjustment {:+.3}", matchup_adjustment));
        }

        // Step 5: role-change penalty
        let role_change_penalty = if candidate.role_change_detected {
            notes.push("recent role change detected (15% confidence cut)".to_string());
            ROLE_CHANGE_PENALTY
        } else {
            0.0
        };

        // Step 6: injury adjustment
        let injury_adjustment = injury_adjustment(candidate);
        if injury_adjustment.abs() > 0.005 {
            notes.push(format!("injury context adjustment {:+.3}", injury_adjustment));
        }

        // Step 7: sample-size-weighted blend of the two shrunk rates
        let blend_weight = (n as f64 / 30.0).min(1.0);
        let base_probability =
            blend_weight * bayesian_hit_rate + (1.0 - blend_weight) * bayesian_probability;

        // Step 8: probability -> confidence curve
        let base_confidence = confidence_from_probability(base_probability);

        // Step 9: penalties multiplicative, adjustments additive (x10 maps a
        // probability delta onto the confidence scale)
        let adjusted_confidence = base_confidence
            * (1.0 - volatility_penalty)
            * (1.0 - role_change_penalty)
            + (matchup_adjustment + injury_adjustment) * 10.0;

        // Step 10: hard cap, applied last
        let final_confidence = adjusted_confidence.clamp(0.0, sample_size_cap * 100.0);

        // Step 11: adjusted probability
        let adjusted_probability =
            (base_probability + matchup_adjustment + injury_adjustment).clamp(0.0, 1.0);

        // Step 12: risk level from independent factor count
        let mut risk_factors = 0u8;
        if !sufficient_sample {
            risk_factors += 1;
        }
        if cv > 0.40 {
            risk_factors += 1;
        }
        if !candidate.minutes_stable {
            risk_factors += 1;
        }
        if candidate.role_change_detected {
            risk_factors += 1;
        }
        let risk_level = RiskLevel::from_factor_count(risk_factors);

        // Step 13: recommendation + multi-safe
        let (bet_recommendation, multi_safe) = recommend(final_confidence, risk_level);

        debug!(
            "calibrated {}: conf={:.1} prob={:.3} risk={:?} rec={:?}",
            candidate.market.label(),
            final_confidence,
            adjusted_probability,
            risk_level,
            bet_recommendation
        );

        ConfidenceResult {
            final_confidence,
            adjusted_probability,
            risk_level,
            base_confidence,
            sample_size_cap,
            volatility_penalty,
            matchup_adjustment,
            injury_adjustment,
            role_change_penalty,
            bayesian_hit_rate,
            bayesian_probability,
            sufficient_sample,
            minutes_stable: candidate.minutes_stable,
            role_stable: !candidate.role_change_detected,
            favorable_matchup,
            bet_recommendation,
            multi_safe,
            notes,
        }
    }
}

/// Maximum confidence (as a fraction) supported by a sample of size n.
pub fn sample_size_cap(n: u32) -> f64 {
    if n < 15 {
        0.75
    } else if n < 30 {
        0.85
    } else if n < 50 {
        0.90
    } else if n < 80 {
        0.93
    } else {
        0.95
    }
}

/// Shrink an observed rate toward the league prior, weighted inversely by
/// sample size.
pub fn bayesian_shrink(observed: f64, n: u32) -> f64 {
    let weight = if n < 10 {
        20.0
    } else if n < 20 {
        10.0
    } else if n < 40 {
        5.0
    } else {
        2.0
    };
    (observed * n as f64 + LEAGUE_PRIOR * weight) / (n as f64 + weight)
}

/// Volatility penalty from the coefficient of variation (minutes-stability
/// surcharge is applied by the caller).
fn volatility_penalty_from_cv(cv: f64) -> f64 {
    if cv < 0.20 {
        0.0
    } else if cv < 0.40 {
        (cv - 0.20) / 0.20 * 0.15
    } else {
        0.15 + ((cv - 0.40) * 0.5).min(0.15)
    }
}

/// Inline matchup adjustment from raw factors when no MatchupAdjustment was
/// computed: pace/defense product plus an opponent-rank bonus for facing a
/// top/bottom-10 defense.
fn inline_matchup_adjustment(candidate: &Candidate) -> f64 {
    let Some(factors) = &candidate.matchup_factors else {
        return 0.0;
    };
    let rank_bonus = if factors.opponent_defensive_rank >= 21 {
        0.03
    } else if factors.opponent_defensive_rank <= 10 {
        -0.03
    } else {
        0.0
    };
    ((factors.pace_multiplier * factors.defense_adjustment - 1.0) * 0.5 + rank_bonus)
        .clamp(-MATCHUP_ADJ_CAP, MATCHUP_ADJ_CAP)
}

/// Injury adjustment: usage-increase and assist-opportunity components,
/// each independently capped before the summed clamp.
fn injury_adjustment(candidate: &Candidate) -> f64 {
    let Some(ctx) = &candidate.injury_context else {
        return 0.0;
    };
    // Usage bump sits exactly at its own +/-0.05 cap
    let usage_component = if ctx.key_player_out && ctx.usage_increase_expected {
        0.05
    } else {
        0.0
    };

    // Assist-opportunity shifts only move assist markets
    let assist_component = if candidate.market.stat == StatType::Assists {
        (ctx.assist_opportunities_impact * 0.10).clamp(-0.03, 0.03)
    } else {
        0.0
    };

    (usage_component + assist_component).clamp(-INJURY_ADJ_CAP, INJURY_ADJ_CAP)
}

/// Probability -> confidence mapping: linear below the coin flip, a
/// logarithmic diminishing-returns curve above it, capped at 95.
fn confidence_from_probability(probability: f64) -> f64 {
    if probability < 0.5 {
        probability * 100.0
    } else {
        let excess = probability - 0.5;
        (50.0 + 40.0 * (1.0 + 2.0 * excess).ln() / 2.0_f64.ln()).min(95.0)
    }
}

/// Recommendation label plus multi-safe flag.
fn recommend(confidence: f64, risk: RiskLevel) -> (Recommendation, bool) {
    if risk == RiskLevel::Extreme {
        // Never multi-safe regardless of confidence
        return (Recommendation::Skip, false);
    }
    let multi_safe = risk.rank() <= RiskLevel::Medium.rank();
    let rec = if confidence >= 80.0 && risk == RiskLevel::Low {
        Recommendation::Bet
    } else if confidence >= 75.0 && multi_safe {
        Recommendation::Bet
    } else if confidence >= 70.0 {
        Recommendation::Consider
    } else if confidence >= 60.0 {
        Recommendation::Watch
    } else {
        Recommendation::Skip
    };
    (rec, multi_safe)
}
