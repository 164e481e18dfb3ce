//! Error types for the analysis core.

use thiserror::Error;

/// Main error type for the analysis library.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A raw completion payload failed the field contract.
    ///
    /// The offending payload is carried verbatim so callers can log or
    /// inspect what the completion service actually returned.
    #[error("Validation failed: {reason}")]
    Validation {
        reason: String,
        raw: serde_json::Value,
    },

    /// The comparator was given an incomplete pair of analyses.
    #[error("Comparison requires two completed analyses: missing {0} version")]
    IncompleteInput(&'static str),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
