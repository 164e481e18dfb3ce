//! Error types for the codifier.

use lexcodify_analysis::AnalysisError;
use thiserror::Error;

/// Main error type for the codifier library.
#[derive(Debug, Error)]
pub enum CodifierError {
    /// Locator is neither an http(s) URL nor an existing PDF file.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// HTTP client could not be constructed or a request failed outside a
    /// download context.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to download a source document.
    #[error("Failed to download {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// PDF could not be read or yielded no text.
    #[error("Failed to extract text from {path}: {message}")]
    Pdf { path: String, message: String },

    /// Completion API key not configured.
    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),

    /// Completion call failed or returned non-conformant data.
    ///
    /// The raw response body, when available, is attached for diagnostics;
    /// the call is never retried here.
    #[error("Completion failed: {reason}")]
    Completion {
        reason: String,
        raw: Option<String>,
    },

    /// Validation or comparison error from the analysis core.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codifier operations.
pub type Result<T> = std::result::Result<T, CodifierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_source_display() {
        let err = CodifierError::InvalidSource("not-a-pdf.txt".to_string());
        assert_eq!(err.to_string(), "Invalid source: not-a-pdf.txt");
    }

    #[test]
    fn test_completion_error_keeps_raw_body() {
        let err = CodifierError::Completion {
            reason: "completion service returned 429".to_string(),
            raw: Some(r#"{"error":"rate limited"}"#.to_string()),
        };
        assert!(err.to_string().contains("429"));

        let CodifierError::Completion { raw, .. } = err else {
            panic!("expected completion error");
        };
        assert!(raw.unwrap().contains("rate limited"));
    }

    #[test]
    fn test_analysis_error_is_transparent() {
        let err: CodifierError = AnalysisError::IncompleteInput("base").into();
        assert!(err.to_string().contains("missing base version"));
    }
}
