use thiserror::Error;

/// Systemic errors surfaced by the pipeline and the candidate assembler.
///
/// Per-candidate problems (degenerate probability, invalid odds, QA
/// mismatches) are never errors: they land in the slate's rejection list
/// and the batch continues. This enum covers only the failures that must
/// propagate to the caller.
#[derive(Error, Debug)]
pub enum PropEdgeError {
    #[error("Insufficient data for {player} {stat}: {detail}")]
    InsufficientData {
        player: String,
        stat: String,
        detail: String,
    },

    #[error("Invalid candidate {market}: {reason}")]
    InvalidCandidate { market: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Validation found non-finite identities on {failed}/{total} bets; upstream derivation defect")]
    SystemicValidationFailure { failed: usize, total: usize },

    #[error("Provider error: {0}")]
    Provider(#[from] anyhow::Error),
}
