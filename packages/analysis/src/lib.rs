//! Lexcodify analysis core.
//!
//! Typed records for analyzed legal documents and amendments, validation of
//! raw structured-completion payloads into those records, and a
//! deterministic section-level comparison of two Act versions.
//!
//! # Example
//!
//! ```
//! use lexcodify_analysis::{compare_versions, DocumentAnalysis, Section};
//!
//! let base = DocumentAnalysis {
//!     document_type: "Act".to_string(),
//!     is_act: true,
//!     section_count: 1,
//!     sections: vec![Section::new("1").with_title("Short title")],
//!     summary: None,
//! };
//! let mut revised = base.clone();
//! revised.sections.push(Section::new("2").with_title("Definitions"));
//! revised.section_count = 2;
//!
//! let comparison = compare_versions(Some(&base), Some(&revised)).unwrap();
//! assert_eq!(comparison.summary.additions, 1);
//! ```
//!
//! # Architecture
//!
//! - [`types`]: document analysis records (Section, DocumentAnalysis)
//! - [`amendment`]: amendment change records and derived statistics
//! - [`validate`]: raw completion payload to typed record conversion
//! - [`compare`]: section-keyed version comparison
//! - [`error`]: error types and Result alias

pub mod amendment;
pub mod compare;
pub mod error;
pub mod types;
pub mod validate;

// Re-export the operations callers reach for first
pub use compare::{compare_versions, ChangeKind, ChangeRecord, ComparisonSummary, VersionComparison};
pub use error::{AnalysisError, Result};
pub use validate::{validate_amendment_analysis, validate_document_analysis, Validated};

// Re-export commonly used record types
pub use amendment::{
    AmendmentAnalysis, AmendmentChange, AmendmentStatistics, ChangeType, LocationReference,
};
pub use types::{DocumentAnalysis, Section};
