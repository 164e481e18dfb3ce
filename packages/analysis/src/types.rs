//! Core record types for analyzed legal documents.
//!
//! These records are produced once by the extraction validator from raw
//! structured-completion output and are read-only thereafter.

use serde::{Deserialize, Serialize};

/// Document type label used when the analysis could not classify a document.
pub const DOCUMENT_TYPE_UNKNOWN: &str = "Unknown";

/// A numbered section of a legal document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section number (e.g., "1", "2A", "15"). Unique within a document;
    /// compared as an opaque, case-sensitive string.
    pub section_number: String,

    /// Section title or heading, if one was identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Short excerpt of the section text, used as a lightweight fingerprint
    /// for change detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_preview: Option<String>,
}

impl Section {
    /// Create a section with just a number.
    #[must_use]
    pub fn new(section_number: impl Into<String>) -> Self {
        Self {
            section_number: section_number.into(),
            title: None,
            content_preview: None,
        }
    }

    /// Set the section title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the content preview.
    #[must_use]
    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.content_preview = Some(preview.into());
        self
    }
}

/// Structured breakdown of a single analyzed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Document classification: "Act", "Amendment", "Regulation", "Other",
    /// or "Unknown" when the analysis could not decide.
    pub document_type: String,

    /// Whether the document was classified as a legal Act.
    pub is_act: bool,

    /// Section count as reported by the analysis. Not reconciled against
    /// `sections.len()`; see [`DocumentAnalysis::count_matches_sections`].
    pub section_count: usize,

    /// Sections in document order.
    pub sections: Vec<Section>,

    /// Brief summary of the document, if one was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl DocumentAnalysis {
    /// Whether the reported section count agrees with the parsed section
    /// list. The validator records a mismatch as a processing anomaly but
    /// preserves the reported number verbatim.
    #[must_use]
    pub fn count_matches_sections(&self) -> bool {
        self.section_count == self.sections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_builders() {
        let section = Section::new("2A")
            .with_title("Definitions")
            .with_preview("In this Act, unless the context otherwise requires");

        assert_eq!(section.section_number, "2A");
        assert_eq!(section.title.as_deref(), Some("Definitions"));
        assert!(section.content_preview.is_some());
    }

    #[test]
    fn test_count_matches_sections() {
        let analysis = DocumentAnalysis {
            document_type: "Act".to_string(),
            is_act: true,
            section_count: 2,
            sections: vec![Section::new("1"), Section::new("2")],
            summary: None,
        };
        assert!(analysis.count_matches_sections());

        let mismatched = DocumentAnalysis {
            section_count: 5,
            ..analysis
        };
        assert!(!mismatched.count_matches_sections());
    }

    #[test]
    fn test_section_serialization_skips_empty_optionals() {
        let json = serde_json::to_string(&Section::new("1")).unwrap();
        assert_eq!(json, r#"{"section_number":"1"}"#);
    }
}
