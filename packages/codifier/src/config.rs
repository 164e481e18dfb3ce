//! Configuration constants and helpers for the codifier.

use std::fmt;
use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;

/// Default base URL for the structured-completion API.
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com";

/// Environment variable holding the completion API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the completion API base URL.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// Default model for whole-document section analysis.
pub const DEFAULT_ANALYSIS_MODEL: &str = "gpt-5";

/// Default model for amendment parsing.
pub const DEFAULT_AMENDMENT_MODEL: &str = "gpt-4o-mini";

/// Timeout for document downloads, in seconds.
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Timeout for completion calls, in seconds.
///
/// Large Acts produce long prompts; reasoning models take their time.
pub const COMPLETION_TIMEOUT_SECS: u64 = 120;

/// Sampling temperature for completion calls. Low, since the output is a
/// structured extraction rather than free text.
pub const COMPLETION_TEMPERATURE: f64 = 0.1;

/// Subdirectory of the system temp dir for downloaded documents.
pub const DOWNLOAD_DIR_NAME: &str = "lexcodify";

/// Reasoning effort hint for models that support it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    /// Get the wire string for this effort level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Characters that do not belong in a filename derived from a URL.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._%-]+").expect("valid regex"));

/// Derive a safe local filename for a downloaded document.
///
/// Takes the last path segment of the URL (query and fragment stripped),
/// replaces runs of unexpected characters, and appends `.pdf` when the
/// segment does not already carry the extension.
///
/// # Examples
/// ```
/// use lexcodify_codifier::config::download_filename;
///
/// assert_eq!(download_filename("https://example.gov/acts/finance.pdf"), "finance.pdf");
/// assert_eq!(download_filename("https://example.gov/acts/53%20of%202020"), "53%20of%202020.pdf");
/// assert_eq!(download_filename("https://example.gov/"), "document.pdf");
/// ```
#[must_use]
pub fn download_filename(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let segment = without_query.rsplit('/').next().unwrap_or("");

    let mut name = UNSAFE_FILENAME_CHARS.replace_all(segment, "_").to_string();
    let name_is_empty = name.trim_matches('_').is_empty();
    if name_is_empty {
        name = "document".to_string();
    }

    if !name.to_ascii_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    name
}
