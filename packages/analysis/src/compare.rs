//! Section-level comparison of two analyzed Act versions.
//!
//! A deterministic structural diff keyed by section number. Section numbers
//! are opaque, case-sensitive strings ("2A" and "2a" are distinct), and
//! content previews are compared by exact string equality, never by
//! similarity. Two sections whose underlying text differs but whose
//! previews happen to match are reported as unchanged; that false negative
//! is an accepted limitation of the preview fingerprint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::types::{DocumentAnalysis, Section};

/// Placeholder used in change descriptions when a section has no title.
pub const NO_TITLE_PLACEHOLDER: &str = "No title";

/// Kind of structural change between two document versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Addition,
    Deletion,
    Modification,
}

/// A single structural difference, keyed by section number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    #[serde(rename = "type")]
    pub change: ChangeKind,

    pub section_number: String,

    /// Human-readable description of the change.
    pub description: String,

    /// Section preview, for additions and deletions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Base-version preview, for modifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_content: Option<String>,

    /// Revised-version preview, for modifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_content: Option<String>,
}

/// Tally of the change groups in a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_changes: usize,
    pub additions: usize,
    pub deletions: usize,
    pub modifications: usize,
}

/// Structural diff between two versions of the same Act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionComparison {
    /// Additions, then deletions, then modifications; each group sorted by
    /// section number.
    pub changes: Vec<ChangeRecord>,
    pub summary: ComparisonSummary,
}

/// Compare two analyzed versions of an Act at the section level.
///
/// Additions are sections present only in `v1`, deletions sections present
/// only in `v0`, and modifications sections present in both whose content
/// previews differ by exact string inequality (a preview present on one
/// side and absent on the other counts as a difference).
///
/// Output order is fixed for reproducibility: additions, then deletions,
/// then modifications, each group sorted lexicographically by section
/// number. When a section number repeats within one document, the first
/// occurrence wins.
///
/// # Errors
/// Returns [`AnalysisError::IncompleteInput`] when either analysis is
/// missing; no partial comparison is produced.
pub fn compare_versions(
    v0: Option<&DocumentAnalysis>,
    v1: Option<&DocumentAnalysis>,
) -> Result<VersionComparison> {
    let v0 = v0.ok_or(AnalysisError::IncompleteInput("base"))?;
    let v1 = v1.ok_or(AnalysisError::IncompleteInput("revised"))?;

    let s0 = index_sections(v0);
    let s1 = index_sections(v1);

    let mut changes = Vec::new();

    for (number, section) in &s1 {
        if !s0.contains_key(number) {
            changes.push(ChangeRecord {
                change: ChangeKind::Addition,
                section_number: (*number).to_string(),
                description: format!("New section added: {}", title_or_placeholder(section)),
                content: section.content_preview.clone(),
                old_content: None,
                new_content: None,
            });
        }
    }

    for (number, section) in &s0 {
        if !s1.contains_key(number) {
            changes.push(ChangeRecord {
                change: ChangeKind::Deletion,
                section_number: (*number).to_string(),
                description: format!("Section removed: {}", title_or_placeholder(section)),
                content: section.content_preview.clone(),
                old_content: None,
                new_content: None,
            });
        }
    }

    for (number, old) in &s0 {
        if let Some(new) = s1.get(number) {
            if old.content_preview != new.content_preview {
                changes.push(ChangeRecord {
                    change: ChangeKind::Modification,
                    section_number: (*number).to_string(),
                    description: format!("Section modified: {}", title_or_placeholder(new)),
                    content: None,
                    old_content: old.content_preview.clone(),
                    new_content: new.content_preview.clone(),
                });
            }
        }
    }

    let summary = summarize(&changes);
    tracing::debug!(
        additions = summary.additions,
        deletions = summary.deletions,
        modifications = summary.modifications,
        "Compared document versions"
    );

    Ok(VersionComparison { changes, summary })
}

/// Index sections by number. BTreeMap keeps iteration sorted by section
/// number string; first occurrence wins on duplicates.
fn index_sections(analysis: &DocumentAnalysis) -> BTreeMap<&str, &Section> {
    let mut index = BTreeMap::new();
    for section in &analysis.sections {
        index
            .entry(section.section_number.as_str())
            .or_insert(section);
    }
    index
}

fn title_or_placeholder(section: &Section) -> &str {
    section.title.as_deref().unwrap_or(NO_TITLE_PLACEHOLDER)
}

fn summarize(changes: &[ChangeRecord]) -> ComparisonSummary {
    let mut summary = ComparisonSummary {
        total_changes: changes.len(),
        ..ComparisonSummary::default()
    };
    for record in changes {
        match record.change {
            ChangeKind::Addition => summary.additions += 1,
            ChangeKind::Deletion => summary.deletions += 1,
            ChangeKind::Modification => summary.modifications += 1,
        }
    }
    summary
}
