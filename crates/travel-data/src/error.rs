//! Error taxonomy for the recommendation pipeline.
//!
//! Every pipeline stage surfaces one of these typed failures; the
//! orchestrator is the single place that classifies them into the
//! structured response envelope. Each variant carries a stable code the
//! calling layer can dispatch on.

use thiserror::Error;

/// Failures the recommendation pipeline can surface to its caller.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// None of the three candidate pools returned any data for the query
    #[error("no candidates matched the query")]
    NoCandidates,

    /// Candidates existed but the filter chain eliminated the usable set
    #[error("no candidates survived filtering")]
    NoMatchingCandidates,

    /// Scoring produced zero destinations from a non-empty filtered pool
    #[error("selection produced no destinations")]
    NoDestinations,

    /// Malformed preferences or a build-time invariant violation
    #[error("validation failed: {0}")]
    ValidationFailure(String),

    /// An unrecognized optimization-goal key was requested
    #[error("unknown optimization goal: {0}")]
    StrategyNotFound(String),

    /// The candidate query or persistence sink itself failed
    ///
    /// The message is intentionally opaque; internal details stay inside
    /// the logs, not the response.
    #[error("upstream failure: {0}")]
    UpstreamFailure(String),
}

impl RecommendError {
    /// Stable code consumable by the calling layer.
    pub fn code(&self) -> &'static str {
        match self {
            RecommendError::NoCandidates => "NoCandidates",
            RecommendError::NoMatchingCandidates => "NoMatchingCandidates",
            RecommendError::NoDestinations => "NoDestinations",
            RecommendError::ValidationFailure(_) => "ValidationFailure",
            RecommendError::StrategyNotFound(_) => "StrategyNotFound",
            RecommendError::UpstreamFailure(_) => "UpstreamFailure",
        }
    }
}

/// Convenience type alias for Results in the pipeline.
pub type Result<T> = std::result::Result<T, RecommendError>;
