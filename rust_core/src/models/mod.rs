// Shared models for the PropEdge scoring pipeline
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod stat_type;

pub use stat_type::StatType;

// ============================================================================
// Market Identity
// ============================================================================

/// Identity of a single prop market within a slate.
///
/// Used for correlation grouping (same game / same player) and for
/// addressing rejection diagnostics back to their source candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketKey {
    pub player: String,
    pub stat: StatType,
    pub game_id: String,
}

impl MarketKey {
    pub fn new(player: impl Into<String>, stat: StatType, game_id: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            stat,
            game_id: game_id.into(),
        }
    }

    /// Stable display form, also used as the deterministic tie-breaker
    /// in correlation scoring.
    pub fn label(&self) -> String {
        format!("{}:{}:{}", self.game_id, self.player, self.stat.as_str())
    }
}

// ============================================================================
// Optional Candidate Context
// ============================================================================

/// Pre-computed matchup context attached to a candidate when the matchup
/// stage is bypassed (the calibrator then derives the adjustment inline).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupFactors {
    pub pace_multiplier: f64,
    pub defense_adjustment: f64,
    /// 1 = stingiest defense in the league, 30 = most generous.
    pub opponent_defensive_rank: u8,
}

/// Injury context signals supplied by the injury provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryContext {
    pub key_player_out: bool,
    pub usage_increase_expected: bool,
    /// Signed shift in assist opportunities, roughly [-0.5, 0.5].
    pub assist_opportunities_impact: f64,
}

// ============================================================================
// Candidate (pipeline input)
// ============================================================================

/// One candidate prop bet. Immutable once constructed for a scoring pass.
///
/// All numeric fields are assumed pre-sanitized by the caller (sample size
/// non-negative, probabilities in [0,1], odds > 1.0); the calibrator has no
/// recoverable-error path for contract violations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub market: MarketKey,
    /// Team codes for the matchup stage.
    pub team: String,
    pub opponent: String,
    pub line: f64,
    /// Offered decimal odds (> 1.0).
    pub odds: f64,

    pub sample_size: u32,
    pub historical_hit_rate: f64,
    pub projected_probability: f64,
    pub stat_mean: f64,
    pub stat_std_dev: f64,
    pub minutes_stable: bool,
    pub role_change_detected: bool,

    /// Most-recent-first stat values; may be empty, in which case the
    /// line-difficulty stage falls back to `stat_mean`.
    #[serde(default)]
    pub recent_games: Vec<f64>,

    pub matchup_factors: Option<MatchupFactors>,
    pub injury_context: Option<InjuryContext>,
}

impl Candidate {
    /// Coefficient of variation of the underlying stat; 0 when mean <= 0.
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.stat_mean <= 0.0 {
            0.0
        } else {
            self.stat_std_dev / self.stat_mean
        }
    }

    /// Median of the recent game log, falling back to the historical mean
    /// when no log is available.
    pub fn recent_median(&self) -> f64 {
        if self.recent_games.is_empty() {
            return self.stat_mean;
        }
        let mut values = self.recent_games.clone();
        values.sort_by(f64::total_cmp);
        let mid = values.len() / 2;
        if values.len() % 2 == 1 {
            values[mid]
        } else {
            (values[mid - 1] + values[mid]) / 2.0
        }
    }
}

// ============================================================================
// Matchup Adjustment
// ============================================================================

/// Output of the matchup stage. Created fresh per candidate per pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchupAdjustment {
    pub pace_multiplier: f64,
    pub defense_multiplier: f64,
    pub blowout_risk_multiplier: f64,
    /// Product of the three multipliers.
    pub total_multiplier: f64,
    /// Bounded transform of the total multiplier, in [-0.15, +0.15].
    pub probability_adjustment: f64,
    pub favorable_matchup: bool,
    /// Ordered human-readable reasons for each non-neutral factor.
    pub notes: Vec<String>,
}

// ============================================================================
// Risk / Recommendation / Tier Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Extreme,
}

impl RiskLevel {
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
            RiskLevel::Extreme => 3,
        }
    }

    /// Classify from the number of independent risk factors present.
    pub fn from_factor_count(count: u8) -> Self {
        match count {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            2 => RiskLevel::High,
            _ => RiskLevel::Extreme,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Bet,
    Consider,
    Watch,
    Skip,
}

/// Five-level quality classification gating whether a bet is surfaced.
/// S is best; D is excluded from default display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityTier {
    S,
    A,
    B,
    C,
    D,
}

impl QualityTier {
    pub fn rank(&self) -> u8 {
        match self {
            QualityTier::S => 0,
            QualityTier::A => 1,
            QualityTier::B => 2,
            QualityTier::C => 3,
            QualityTier::D => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::S => "S",
            QualityTier::A => "A",
            QualityTier::B => "B",
            QualityTier::C => "C",
            QualityTier::D => "D",
        }
    }
}

/// Consistency label derived from the historical coefficient of variation,
/// using the same thresholds as the calibrator's volatility penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyRank {
    Elite,
    Solid,
    Volatile,
}

impl ConsistencyRank {
    pub fn from_cv(cv: f64) -> Self {
        if cv < 0.20 {
            ConsistencyRank::Elite
        } else if cv < 0.40 {
            ConsistencyRank::Solid
        } else {
            ConsistencyRank::Volatile
        }
    }
}

// ============================================================================
// Confidence Result
// ============================================================================

/// Output of the confidence & risk calibrator.
///
/// Invariant: `final_confidence <= sample_size_cap * 100` (the hard cap is
/// the last step applied).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceResult {
    pub final_confidence: f64,
    pub adjusted_probability: f64,
    pub risk_level: RiskLevel,

    // Retained component scores
    pub base_confidence: f64,
    pub sample_size_cap: f64,
    pub volatility_penalty: f64,
    pub matchup_adjustment: f64,
    pub injury_adjustment: f64,
    pub role_change_penalty: f64,
    pub bayesian_hit_rate: f64,
    pub bayesian_probability: f64,

    // Flags
    pub sufficient_sample: bool,
    pub minutes_stable: bool,
    pub role_stable: bool,
    pub favorable_matchup: bool,

    pub bet_recommendation: Recommendation,
    pub multi_safe: bool,
    pub notes: Vec<String>,
}

// ============================================================================
// Enhanced Bet (published record)
// ============================================================================

/// Fully enhanced, tier-labeled bet. Constructed once per candidate per
/// batch; never mutated after validation. Batch siblings are visible to each
/// other only read-only, for correlation scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancedBet {
    pub market: MarketKey,
    pub line: f64,
    pub odds: f64,
    pub sample_size: u32,

    pub confidence: ConfidenceResult,
    /// adjusted_probability carried through from the calibrator.
    pub calibrated_probability: f64,

    pub quality_tier: QualityTier,

    // Multiplicative penalty reductions, each in [0, 1]
    pub sample_size_penalty: f64,
    pub correlation_penalty: f64,
    pub line_difficulty_penalty: f64,
    /// 1.0 - correlation_penalty; S admission requires >= 1.0.
    pub correlation_multiplier: f64,

    pub consistency_rank: ConsistencyRank,
    pub consistency_score: f64,

    // Market identities
    pub fair_odds: f64,
    pub odds_mispricing: f64,
    pub expected_value: f64,
    pub edge_pct: f64,
    pub ev_to_prob_ratio: f64,
    pub projection_margin: f64,
    /// clamp(10*cv + 2 if minutes unstable, 0, 10); S admission ceiling.
    pub minutes_volatility_score: f64,

    pub final_score: f64,
    pub passes_efficiency_check: bool,
    pub passes_ev_ratio: bool,

    pub warnings: Vec<String>,
}

// ============================================================================
// Slate Output
// ============================================================================

/// Machine-readable rejection entry: the originating market identity plus
/// every failed invariant in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionRecord {
    pub market: MarketKey,
    pub reasons: Vec<String>,
}

/// Result of scoring one slate: the ranked, validated bets plus a parallel
/// diagnostics list. The pipeline always returns this, never aborts a whole
/// batch for one bad candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlateResult {
    pub slate_id: uuid::Uuid,
    pub scored_at: DateTime<Utc>,
    pub bets: Vec<EnhancedBet>,
    pub rejections: Vec<RejectionRecord>,
}
