//! Amendment instruction records and their derived statistics.
//!
//! Statistics are never stored: [`AmendmentAnalysis::statistics`] recomputes
//! them from the change list on every call, so they cannot drift out of
//! sync with it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Confidence score above which a change counts as high confidence.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Kinds of discrete edits an amendment document can instruct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Replace old text with new text at a location.
    Substitution,
    /// Insert new text at a position.
    Insertion,
    /// Remove text or a whole subdivision.
    Deletion,
    /// Renumber a section or subdivision.
    Renumbering,
    /// Apply a substitution wherever a term occurs.
    MultipleOccurrence,
}

impl ChangeType {
    /// Get the wire string for this change type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Substitution => "substitution",
            Self::Insertion => "insertion",
            Self::Deletion => "deletion",
            Self::Renumbering => "renumbering",
            Self::MultipleOccurrence => "multiple_occurrence",
        }
    }

    /// Parse a wire string.
    ///
    /// Returns `None` for unrecognized labels; the validator applies the
    /// substitution fallback and records an anomaly.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "substitution" => Some(Self::Substitution),
            "insertion" => Some(Self::Insertion),
            "deletion" => Some(Self::Deletion),
            "renumbering" => Some(Self::Renumbering),
            "multiple_occurrence" => Some(Self::MultipleOccurrence),
            _ => None,
        }
    }
}

/// Pinpoint reference inside a legal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationReference {
    /// Section reference (e.g., "Section 15").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Subsection reference (e.g., "(2)").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,

    /// Clause reference (e.g., "(a)").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clause: Option<String>,

    /// Sub-clause reference (e.g., "(i)").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_clause: Option<String>,

    /// Specific line number, if one was identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
}

impl fmt::Display for LocationReference {
    // Concatenates the present parts in order, e.g. "Section 15(2)(a)(i)".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in [&self.section, &self.subsection, &self.clause, &self.sub_clause]
            .into_iter()
            .flatten()
        {
            f.write_str(part)?;
        }
        Ok(())
    }
}

/// Individual change instruction from an amendment document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmendmentChange {
    /// Unique identifier for this change within the analysis.
    pub change_id: String,

    /// Kind of edit this change instructs.
    pub change_type: ChangeType,

    /// Where in the base Act to apply the change.
    pub location: LocationReference,

    /// Text to be replaced or deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_text: Option<String>,

    /// New text to insert or substitute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,

    /// Positional instruction for insertions (e.g., "after clause (c)").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_position: Option<String>,

    /// Verbatim instruction text from the amendment document.
    pub amendment_instruction: String,

    /// Page of the amendment document the instruction appears on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amendment_page: Option<u32>,

    /// Parsing confidence in `[0, 1]`.
    pub confidence_score: f64,

    /// Whether the instruction was ambiguous enough to need manual review.
    pub requires_human_review: bool,

    /// Text immediately before the change location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_before: Option<String>,

    /// Text immediately after the change location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_after: Option<String>,
}

/// Derived statistics over an amendment's change list.
///
/// Only ever produced by [`AmendmentAnalysis::statistics`]; there is no way
/// to set these counters independently of the change list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmendmentStatistics {
    pub total_changes: usize,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
    /// Mean confidence over all changes; `0.0` for an empty list.
    pub avg_confidence: f64,
    /// Changes with confidence strictly above [`HIGH_CONFIDENCE_THRESHOLD`].
    pub high_confidence_changes: usize,
    pub requires_review: usize,
}

/// Complete analysis of an amendment document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmendmentAnalysis {
    /// Title of the amendment document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,

    /// Amendment number or year, if identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amendment_number: Option<String>,

    /// The Act being amended, if identified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_act: Option<String>,

    /// Individual change instructions, in document order.
    pub changes: Vec<AmendmentChange>,

    /// Anomalies recorded while validating the raw completion payload.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub processing_notes: Vec<String>,
}

impl AmendmentAnalysis {
    /// Recompute the derived statistics from the current change list.
    ///
    /// Pure function of `changes`: calling it twice in a row always yields
    /// identical results, and an empty list yields all-zero statistics.
    #[must_use]
    pub fn statistics(&self) -> AmendmentStatistics {
        let total_changes = self.changes.len();
        let of_type = |wanted: ChangeType| {
            self.changes
                .iter()
                .filter(|c| c.change_type == wanted)
                .count()
        };

        let avg_confidence = if self.changes.is_empty() {
            0.0
        } else {
            let sum: f64 = self.changes.iter().map(|c| c.confidence_score).sum();
            sum / total_changes as f64
        };

        AmendmentStatistics {
            total_changes,
            substitutions: of_type(ChangeType::Substitution),
            insertions: of_type(ChangeType::Insertion),
            deletions: of_type(ChangeType::Deletion),
            avg_confidence,
            high_confidence_changes: self
                .changes
                .iter()
                .filter(|c| c.confidence_score > HIGH_CONFIDENCE_THRESHOLD)
                .count(),
            requires_review: self
                .changes
                .iter()
                .filter(|c| c.requires_human_review)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn change(id: &str, change_type: ChangeType, confidence: f64, review: bool) -> AmendmentChange {
        AmendmentChange {
            change_id: id.to_string(),
            change_type,
            location: LocationReference::default(),
            old_text: None,
            new_text: None,
            insert_position: None,
            amendment_instruction: format!("instruction for {id}"),
            amendment_page: None,
            confidence_score: confidence,
            requires_human_review: review,
            context_before: None,
            context_after: None,
        }
    }

    #[test]
    fn test_change_type_round_trip() {
        for label in [
            "substitution",
            "insertion",
            "deletion",
            "renumbering",
            "multiple_occurrence",
        ] {
            let parsed = ChangeType::parse(label).unwrap();
            assert_eq!(parsed.as_str(), label);
        }
    }

    #[test]
    fn test_change_type_parse_unknown() {
        assert_eq!(ChangeType::parse("unknown_type"), None);
        assert_eq!(ChangeType::parse(""), None);
        // Case-sensitive, like the rest of the wire contract
        assert_eq!(ChangeType::parse("Substitution"), None);
    }

    #[test]
    fn test_location_display_full() {
        let location = LocationReference {
            section: Some("Section 15".to_string()),
            subsection: Some("(2)".to_string()),
            clause: Some("(a)".to_string()),
            sub_clause: Some("(i)".to_string()),
            line_number: Some(12),
        };
        assert_eq!(location.to_string(), "Section 15(2)(a)(i)");
    }

    #[test]
    fn test_location_display_partial() {
        let location = LocationReference {
            section: Some("Section 3".to_string()),
            clause: Some("(b)".to_string()),
            ..LocationReference::default()
        };
        assert_eq!(location.to_string(), "Section 3(b)");
        assert_eq!(LocationReference::default().to_string(), "");
    }

    #[test]
    fn test_statistics_example() {
        // Confidence scores [0.9, 0.5, 0.95], review flags [false, true, false]
        let analysis = AmendmentAnalysis {
            document_title: Some("Test Amendment".to_string()),
            amendment_number: None,
            target_act: None,
            changes: vec![
                change("change_1", ChangeType::Substitution, 0.9, false),
                change("change_2", ChangeType::Insertion, 0.5, true),
                change("change_3", ChangeType::Deletion, 0.95, false),
            ],
            processing_notes: Vec::new(),
        };

        let stats = analysis.statistics();
        assert_eq!(stats.total_changes, 3);
        assert_eq!(stats.substitutions, 1);
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.deletions, 1);
        assert!((stats.avg_confidence - 0.7833).abs() < 1e-4);
        assert_eq!(stats.high_confidence_changes, 2);
        assert_eq!(stats.requires_review, 1);
    }

    #[test]
    fn test_statistics_idempotent() {
        let analysis = AmendmentAnalysis {
            document_title: None,
            amendment_number: None,
            target_act: None,
            changes: vec![
                change("change_1", ChangeType::Substitution, 0.3, true),
                change("change_2", ChangeType::Renumbering, 0.81, false),
            ],
            processing_notes: Vec::new(),
        };

        assert_eq!(analysis.statistics(), analysis.statistics());
    }

    #[test]
    fn test_statistics_empty() {
        let analysis = AmendmentAnalysis {
            document_title: None,
            amendment_number: None,
            target_act: None,
            changes: Vec::new(),
            processing_notes: Vec::new(),
        };

        let stats = analysis.statistics();
        assert_eq!(stats.total_changes, 0);
        assert_eq!(stats.substitutions, 0);
        assert_eq!(stats.insertions, 0);
        assert_eq!(stats.deletions, 0);
        assert_eq!(stats.avg_confidence, 0.0);
        assert_eq!(stats.high_confidence_changes, 0);
        assert_eq!(stats.requires_review, 0);
    }

    #[test]
    fn test_high_confidence_is_strictly_above_threshold() {
        let analysis = AmendmentAnalysis {
            document_title: None,
            amendment_number: None,
            target_act: None,
            changes: vec![change("change_1", ChangeType::Substitution, 0.8, false)],
            processing_notes: Vec::new(),
        };

        // Exactly 0.8 is not high confidence
        assert_eq!(analysis.statistics().high_confidence_changes, 0);
    }
}
