//! Validation of raw structured-completion payloads into typed records.
//!
//! The completion service is an untrusted collaborator: every field is
//! pulled out explicitly with a documented default, and locally detected
//! inconsistencies are tolerated and recorded as anomalies rather than
//! failing the pipeline. Structural violations (non-object payloads,
//! missing required fields, out-of-range confidence scores) do fail, and
//! the error carries the raw payload for diagnostics. A validated record is
//! never partially constructed.

use serde_json::{Map, Value};

use crate::amendment::{AmendmentAnalysis, AmendmentChange, ChangeType, LocationReference};
use crate::error::{AnalysisError, Result};
use crate::types::{DocumentAnalysis, Section, DOCUMENT_TYPE_UNKNOWN};

/// A validated record together with the anomalies recorded while
/// validating it.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub record: T,
    /// Human-readable notes about tolerated payload inconsistencies.
    pub anomalies: Vec<String>,
}

/// Validate a raw document-analysis payload.
///
/// Defaults: missing `document_type` becomes `"Unknown"`, missing `is_act`
/// becomes `false`, missing `section_count` becomes the count of parsed
/// sections. A present `section_count` is preserved verbatim even when it
/// disagrees with the parsed list; the disagreement is recorded as an
/// anomaly. Section entries without a usable `section_number` are skipped
/// with an anomaly, preserving the uniqueness invariant.
///
/// # Errors
/// Fails with [`AnalysisError::Validation`] when the payload is not a JSON
/// object or `sections` is present but not an array.
pub fn validate_document_analysis(raw: &Value) -> Result<Validated<DocumentAnalysis>> {
    let object = as_object(raw)?;
    let mut anomalies = Vec::new();

    let mut sections = Vec::new();
    match object.get("sections") {
        None => {}
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                match section_from_value(entry) {
                    Some(section) => sections.push(section),
                    None => anomalies.push(format!(
                        "section entry {index} has no section_number and was skipped"
                    )),
                }
            }
        }
        Some(_) => return Err(invalid(raw, "sections is not an array")),
    }

    let section_count = match object.get("section_count").and_then(Value::as_u64) {
        Some(reported) => {
            let reported = reported as usize;
            if reported != sections.len() {
                anomalies.push(format!(
                    "reported section_count {reported} disagrees with {} parsed sections",
                    sections.len()
                ));
            }
            reported
        }
        None => sections.len(),
    };

    let record = DocumentAnalysis {
        document_type: string_field(object, "document_type")
            .unwrap_or_else(|| DOCUMENT_TYPE_UNKNOWN.to_string()),
        is_act: object.get("is_act").and_then(Value::as_bool).unwrap_or(false),
        section_count,
        sections,
        summary: string_field(object, "summary"),
    };

    Ok(Validated { record, anomalies })
}

/// Validate a raw amendment-analysis payload.
///
/// Tolerated with an anomaly: unrecognized or missing `change_type` (falls
/// back to substitution), missing `change_id` (assigned positionally).
/// Hard failures: a `confidence_score` outside `[0, 1]` (never clamped
/// silently), a missing `amendment_instruction`, or a structurally
/// malformed payload.
///
/// # Errors
/// Fails with [`AnalysisError::Validation`] carrying the raw payload.
pub fn validate_amendment_analysis(raw: &Value) -> Result<Validated<AmendmentAnalysis>> {
    let object = as_object(raw)?;
    let mut anomalies = Vec::new();

    let mut changes = Vec::new();
    match object.get("changes") {
        None => {}
        Some(Value::Array(entries)) => {
            for (index, entry) in entries.iter().enumerate() {
                changes.push(change_from_value(raw, entry, index, &mut anomalies)?);
            }
        }
        Some(_) => return Err(invalid(raw, "changes is not an array")),
    }

    let record = AmendmentAnalysis {
        document_title: string_field(object, "document_title"),
        amendment_number: string_field(object, "amendment_number"),
        target_act: string_field(object, "target_act"),
        changes,
        processing_notes: anomalies.clone(),
    };

    Ok(Validated { record, anomalies })
}

fn change_from_value(
    raw: &Value,
    entry: &Value,
    index: usize,
    anomalies: &mut Vec<String>,
) -> Result<AmendmentChange> {
    let object = entry
        .as_object()
        .ok_or_else(|| invalid(raw, format!("change entry {index} is not an object")))?;

    let change_id = match string_field(object, "change_id") {
        Some(id) => id,
        None => {
            let fallback = format!("change_{}", index + 1);
            anomalies.push(format!(
                "change entry {index} has no change_id; assigned {fallback}"
            ));
            fallback
        }
    };

    let change_type = match object.get("change_type").and_then(Value::as_str) {
        Some(label) => match ChangeType::parse(label) {
            Some(change_type) => change_type,
            None => {
                anomalies.push(format!(
                    "unrecognized change_type \"{label}\" on {change_id}; treated as substitution"
                ));
                ChangeType::Substitution
            }
        },
        None => {
            anomalies.push(format!(
                "missing change_type on {change_id}; treated as substitution"
            ));
            ChangeType::Substitution
        }
    };

    let confidence_score = match object.get("confidence_score") {
        Some(value) => {
            let score = value.as_f64().ok_or_else(|| {
                invalid(raw, format!("confidence_score on {change_id} is not a number"))
            })?;
            if !(0.0..=1.0).contains(&score) {
                return Err(invalid(
                    raw,
                    format!("confidence_score {score} on {change_id} is outside [0, 1]"),
                ));
            }
            score
        }
        None => 0.0,
    };

    let amendment_instruction = string_field(object, "amendment_instruction")
        .ok_or_else(|| invalid(raw, format!("change {change_id} has no amendment_instruction")))?;

    let location = object
        .get("location")
        .map(location_from_value)
        .unwrap_or_default();

    Ok(AmendmentChange {
        change_id,
        change_type,
        location,
        old_text: string_field(object, "old_text"),
        new_text: string_field(object, "new_text"),
        insert_position: string_field(object, "insert_position"),
        amendment_instruction,
        amendment_page: object
            .get("amendment_page")
            .and_then(Value::as_u64)
            .map(|page| page as u32),
        confidence_score,
        requires_human_review: object
            .get("requires_human_review")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        context_before: string_field(object, "context_before"),
        context_after: string_field(object, "context_after"),
    })
}

fn location_from_value(value: &Value) -> LocationReference {
    let Some(object) = value.as_object() else {
        return LocationReference::default();
    };
    LocationReference {
        section: string_field(object, "section"),
        subsection: string_field(object, "subsection"),
        clause: string_field(object, "clause"),
        sub_clause: string_field(object, "sub_clause"),
        line_number: object
            .get("line_number")
            .and_then(Value::as_u64)
            .map(|line| line as u32),
    }
}

/// Build a section from a raw entry, or `None` when the entry has no
/// usable section number.
fn section_from_value(value: &Value) -> Option<Section> {
    let object = value.as_object()?;
    let number = object
        .get("section_number")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|number| !number.is_empty())?;

    Some(Section {
        section_number: number.to_string(),
        title: string_field(object, "title"),
        content_preview: string_field(object, "content_preview"),
    })
}

fn as_object(raw: &Value) -> Result<&Map<String, Value>> {
    raw.as_object()
        .ok_or_else(|| invalid(raw, "payload is not a JSON object"))
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn invalid(raw: &Value, reason: impl Into<String>) -> AnalysisError {
    AnalysisError::Validation {
        reason: reason.into(),
        raw: raw.clone(),
    }
}
