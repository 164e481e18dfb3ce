//! End-to-end pipeline tests against a canned completion backend.
//!
//! The pipelines only depend on the `StructuredCompletion` trait, so these
//! tests substitute fixture payloads for the completion service and assert
//! on the typed records that come out.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use lexcodify_analysis::ChangeType;
use lexcodify_codifier::llm::{CompletionRequest, StructuredCompletion};
use lexcodify_codifier::pipeline::{analyze_document, parse_amendment};
use lexcodify_codifier::{CodifierError, Result};
use serde_json::Value;

/// Load a fixture payload.
fn load_fixture(name: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Invalid fixture {}: {}", path.display(), e))
}

/// Completion backend that returns a canned payload and records the last
/// request it saw.
struct CannedCompletion {
    response: Value,
    last_request: RefCell<Option<(String, String)>>,
}

impl CannedCompletion {
    fn new(response: Value) -> Self {
        Self {
            response,
            last_request: RefCell::new(None),
        }
    }
}

impl StructuredCompletion for CannedCompletion {
    fn complete(&self, request: &CompletionRequest) -> Result<Value> {
        *self.last_request.borrow_mut() =
            Some((request.schema.name.to_string(), request.prompt.clone()));
        Ok(self.response.clone())
    }
}

/// Completion backend that always fails.
struct FailingCompletion;

impl StructuredCompletion for FailingCompletion {
    fn complete(&self, _request: &CompletionRequest) -> Result<Value> {
        Err(CodifierError::Completion {
            reason: "completion service returned 503 Service Unavailable".to_string(),
            raw: Some(r#"{"error":"overloaded"}"#.to_string()),
        })
    }
}

#[test]
fn test_analyze_document_produces_typed_record() {
    let client = CannedCompletion::new(load_fixture("document_analysis.json"));

    let analysis = analyze_document(&client, "THE EXAMPLE LEVY ACT, 2020 ...").unwrap();

    assert_eq!(analysis.document_type, "Act");
    assert!(analysis.is_act);
    assert_eq!(analysis.section_count, 4);
    assert!(analysis.count_matches_sections());

    let numbers: Vec<&str> = analysis
        .sections
        .iter()
        .map(|s| s.section_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["1", "2", "2A", "3"]);

    // Untitled section stays untitled; nothing is invented
    assert_eq!(analysis.sections[2].title, None);
    assert!(analysis.summary.as_deref().unwrap_or_default().contains("transaction tax"));
}

#[test]
fn test_analyze_document_sends_text_and_schema() {
    let client = CannedCompletion::new(load_fixture("document_analysis.json"));

    analyze_document(&client, "UNIQUE DOCUMENT BODY").unwrap();

    let recorded = client.last_request.borrow();
    let (schema, prompt) = recorded.as_ref().expect("request was recorded");
    assert_eq!(schema, "legal_document_analysis");
    assert!(prompt.contains("UNIQUE DOCUMENT BODY"));
}

#[test]
fn test_parse_amendment_maps_changes() {
    let client = CannedCompletion::new(load_fixture("amendment.json"));

    let analysis = parse_amendment(&client, "--- PAGE 1 ---\nIn Section 3 ...").unwrap();

    assert_eq!(
        analysis.document_title.as_deref(),
        Some("The Example Levy (Amendment) Act, 2022")
    );
    assert_eq!(analysis.target_act.as_deref(), Some("The Example Levy Act, 2020"));
    assert_eq!(analysis.changes.len(), 3);

    let substitution = &analysis.changes[0];
    assert_eq!(substitution.change_type, ChangeType::Substitution);
    assert_eq!(substitution.location.to_string(), "Section 3(1)");
    assert_eq!(substitution.old_text.as_deref(), Some("five per cent"));
    assert_eq!(substitution.new_text.as_deref(), Some("seven per cent"));
    assert_eq!(substitution.amendment_page, Some(1));

    // The fixture's third change carries an unrecognized change_type
    // ("consequential") and must fall back to substitution with a note.
    let fallback = &analysis.changes[2];
    assert_eq!(fallback.change_type, ChangeType::Substitution);
    assert!(analysis
        .processing_notes
        .iter()
        .any(|note| note.contains("consequential")));
}

#[test]
fn test_parse_amendment_statistics() {
    let client = CannedCompletion::new(load_fixture("amendment.json"));

    let analysis = parse_amendment(&client, "amendment text").unwrap();
    let stats = analysis.statistics();

    // change_3 falls back to substitution, so substitutions = 2
    assert_eq!(stats.total_changes, 3);
    assert_eq!(stats.substitutions, 2);
    assert_eq!(stats.insertions, 1);
    assert_eq!(stats.deletions, 0);
    assert!((stats.avg_confidence - (0.97 + 0.9 + 0.45) / 3.0).abs() < 1e-9);
    assert_eq!(stats.high_confidence_changes, 2);
    assert_eq!(stats.requires_review, 1);
}

#[test]
fn test_failing_completion_surfaces_error() {
    let err = analyze_document(&FailingCompletion, "text").unwrap_err();

    let CodifierError::Completion { reason, raw } = err else {
        panic!("expected completion error, got: {err}");
    };
    assert!(reason.contains("503"));
    assert!(raw.unwrap().contains("overloaded"));
}

#[test]
fn test_malformed_payload_fails_validation_with_raw_attached() {
    // Structurally wrong payload: sections is not an array
    let client = CannedCompletion::new(serde_json::json!({ "sections": "oops" }));

    let err = analyze_document(&client, "text").unwrap_err();
    let CodifierError::Analysis(analysis_err) = err else {
        panic!("expected analysis error, got: {err}");
    };
    let lexcodify_analysis::AnalysisError::Validation { raw, .. } = analysis_err else {
        panic!("expected validation error");
    };
    assert_eq!(raw["sections"], "oops");
}
