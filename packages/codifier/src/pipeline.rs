//! Document analysis and amendment parsing pipelines.
//!
//! Each pipeline is fetch text, build prompt, structured completion,
//! validate into a typed record. Validation anomalies are logged and, for
//! amendments, kept on the record as processing notes; they never abort a
//! pipeline. Failures surface as typed errors, never as a default record
//! disguised as success.

use lexcodify_analysis::{
    validate_amendment_analysis, validate_document_analysis, AmendmentAnalysis, DocumentAnalysis,
};

use crate::error::Result;
use crate::llm::StructuredCompletion;
use crate::pdf::{fetch_text, ExtractedDocument};
use crate::prompts;

/// Analyze legal-document text and identify its sections.
///
/// # Errors
/// Surfaces completion and validation failures; tolerated payload
/// inconsistencies are logged as warnings instead.
pub fn analyze_document(
    client: &dyn StructuredCompletion,
    text: &str,
) -> Result<DocumentAnalysis> {
    let request = prompts::document_analysis_request(text);
    let raw = client.complete(&request)?;

    let validated = validate_document_analysis(&raw)?;
    for anomaly in &validated.anomalies {
        tracing::warn!(anomaly = %anomaly, "Document analysis anomaly");
    }

    tracing::info!(
        document_type = %validated.record.document_type,
        sections = validated.record.sections.len(),
        "Document analyzed"
    );
    Ok(validated.record)
}

/// Parse amendment text into discrete change instructions.
///
/// # Errors
/// Surfaces completion and validation failures; tolerated payload
/// inconsistencies become processing notes on the returned record.
pub fn parse_amendment(
    client: &dyn StructuredCompletion,
    text: &str,
) -> Result<AmendmentAnalysis> {
    let request = prompts::amendment_request(text);
    let raw = client.complete(&request)?;

    let validated = validate_amendment_analysis(&raw)?;
    for anomaly in &validated.anomalies {
        tracing::warn!(anomaly = %anomaly, "Amendment parsing anomaly");
    }

    tracing::info!(changes = validated.record.changes.len(), "Amendment parsed");
    Ok(validated.record)
}

/// Fetch a document from a URL or local path and analyze it.
pub fn analyze_source(
    client: &dyn StructuredCompletion,
    locator: &str,
) -> Result<DocumentAnalysis> {
    let document = fetch_source(locator)?;
    analyze_document(client, &document.full_text())
}

/// Fetch an amendment document and parse its change instructions.
///
/// Page markers are kept in the prompt text so each change can be
/// attributed to an amendment page.
pub fn parse_amendment_source(
    client: &dyn StructuredCompletion,
    locator: &str,
) -> Result<AmendmentAnalysis> {
    let document = fetch_source(locator)?;
    parse_amendment(client, &document.paged_text())
}

fn fetch_source(locator: &str) -> Result<ExtractedDocument> {
    let document = fetch_text(locator)?;
    for warning in &document.warnings {
        tracing::warn!(warning = %warning, "Extraction warning");
    }
    tracing::info!(pages = document.pages.len(), "Extracted document text");
    Ok(document)
}
