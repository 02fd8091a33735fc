//! Central tunables for the scoring pipeline.
//!
//! Every threshold that gates tier admission or the efficiency/EV-ratio
//! checks lives here as a named field rather than an inline constant, so it
//! can be audited and overridden in one place. Defaults match the calibrated
//! production values; env overrides follow the service convention.

use std::env;

/// Tier-admission and filter thresholds for the enhancement engine.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Efficiency check: a bet fails only when edge AND probability are both
    /// below these floors simultaneously.
    pub min_edge_pct: f64,
    pub min_probability: f64,

    /// Minimum EV-to-probability ratio for passes_ev_ratio.
    pub min_ev_ratio: f64,

    // S-tier admission (all conditions must hold)
    pub s_tier_min_ev: f64,
    pub s_tier_min_probability: f64,
    pub s_tier_min_confidence: f64,
    pub s_tier_max_volatility_score: f64,

    // A-tier admission (relaxed S)
    pub a_tier_min_ev: f64,
    pub a_tier_min_probability: f64,
    pub a_tier_min_confidence: f64,
    pub a_tier_max_correlation_penalty: f64,

    // B-tier admission
    pub b_tier_min_ev: f64,
    pub b_tier_min_probability: f64,

    // C-tier admission (parlay-only downstream)
    pub c_tier_min_probability: f64,

    // Final-score composite weights
    pub prob_weight: f64,
    pub edge_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_edge_pct: 2.0,
            min_probability: 0.55,
            min_ev_ratio: 0.08,

            s_tier_min_ev: 0.12,
            s_tier_min_probability: 0.65,
            s_tier_min_confidence: 75.0,
            s_tier_max_volatility_score: 6.0,

            a_tier_min_ev: 0.08,
            a_tier_min_probability: 0.58,
            a_tier_min_confidence: 65.0,
            a_tier_max_correlation_penalty: 0.05,

            b_tier_min_ev: 0.04,
            b_tier_min_probability: 0.52,

            c_tier_min_probability: 0.45,

            prob_weight: 0.70,
            edge_weight: 3.0,
        }
    }
}

impl ScoringConfig {
    /// Build from defaults with env-var overrides.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.min_edge_pct = env_f64("MIN_EDGE_PCT", cfg.min_edge_pct);
        cfg.min_probability = env_f64("MIN_PROBABILITY", cfg.min_probability);
        cfg.min_ev_ratio = env_f64("MIN_EV_RATIO", cfg.min_ev_ratio);
        cfg.s_tier_min_ev = env_f64("S_TIER_MIN_EV", cfg.s_tier_min_ev);
        cfg.s_tier_min_probability = env_f64("S_TIER_MIN_PROB", cfg.s_tier_min_probability);
        cfg.s_tier_min_confidence = env_f64("S_TIER_MIN_CONFIDENCE", cfg.s_tier_min_confidence);
        cfg.s_tier_max_volatility_score =
            env_f64("S_TIER_MAX_VOLATILITY", cfg.s_tier_max_volatility_score);
        cfg
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
