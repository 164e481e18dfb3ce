//! Prompt text and response schemas for the analysis pipelines.
//!
//! Prompt content mirrors what the completion service is good at being
//! told: a narrow role, the patterns to look for, and the exact output
//! shape. The schemas constrain the response so the validator receives a
//! structurally predictable object.

use serde_json::json;

use crate::llm::{CompletionRequest, SchemaDescriptor};

const DOCUMENT_SYSTEM_PROMPT: &str = "\
You are a legal document analyzer. Analyze the document and extract structured information about its sections.

# Method:
- Identify the document type from the title and structure keywords
- Scan for section markers (Section, Sec., \u{00a7}, numbered patterns)
- Extract section numbers and titles systematically
- Focus only on numbered sections that form the main legal structure; do not include unnumbered subsections or clauses

# Output requirements:
1. Document type classification (Act, Amendment, Regulation, or Other)
2. Whether the document is a legal Act
3. Count of all numbered sections
4. Every section with its number, title, and a short content preview
5. A brief summary of the document";

const AMENDMENT_SYSTEM_PROMPT: &str = "\
You are a legal document analysis expert. Parse the amendment document and extract every individual change instruction with precise details.

# Amendment patterns to look for:
1. Substitutions: \"In Section X, substitute 'old text' with 'new text'\"
2. Insertions: \"After clause (a), insert the following: 'new text'\"
3. Deletions: \"Delete subsection (2) of Section Y\"
4. Multiple occurrences: \"Wherever 'old term' occurs, substitute 'new term'\"
5. Renumbering: \"Section 16 shall be renumbered as Section 17\"

# Output requirements:
- Extract EVERY individual change instruction
- Be precise with location references (section, subsection, clause, sub-clause)
- Capture the exact old and new text where applicable
- Quote the full original instruction text for each change
- Record the amendment page number when identifiable
- Assign a confidence score between 0.0 and 1.0 based on the clarity of the instruction
- Flag ambiguous instructions for human review";

/// Build the document-analysis completion request for the given text.
#[must_use]
pub fn document_analysis_request(text: &str) -> CompletionRequest {
    CompletionRequest {
        system: Some(DOCUMENT_SYSTEM_PROMPT.to_string()),
        prompt: format!(
            "Analyze this legal document and identify all sections:\n\n{text}\n\n\
             Extract and return structured information about the document type and all sections."
        ),
        schema: document_analysis_schema(),
    }
}

/// Build the amendment-parsing completion request for the given text.
#[must_use]
pub fn amendment_request(text: &str) -> CompletionRequest {
    CompletionRequest {
        system: Some(AMENDMENT_SYSTEM_PROMPT.to_string()),
        prompt: format!(
            "Parse this legal amendment document and extract all individual change instructions:\n\n\
             {text}\n\n\
             Extract every change instruction you can find. Be thorough and precise."
        ),
        schema: amendment_schema(),
    }
}

fn document_analysis_schema() -> SchemaDescriptor {
    SchemaDescriptor {
        name: "legal_document_analysis",
        schema: json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "document_type": {
                    "type": "string",
                    "description": "Act, Amendment, Regulation, or Other"
                },
                "is_act": { "type": "boolean" },
                "section_count": { "type": "integer" },
                "sections": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {
                            "section_number": { "type": "string" },
                            "title": { "type": ["string", "null"] },
                            "content_preview": {
                                "type": ["string", "null"],
                                "description": "First ~100 characters of the section content"
                            }
                        },
                        "required": ["section_number", "title", "content_preview"]
                    }
                },
                "summary": { "type": ["string", "null"] }
            },
            "required": ["document_type", "is_act", "section_count", "sections", "summary"]
        }),
    }
}

fn amendment_schema() -> SchemaDescriptor {
    SchemaDescriptor {
        name: "amendment_analysis",
        schema: json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "document_title": { "type": ["string", "null"] },
                "amendment_number": { "type": ["string", "null"] },
                "target_act": { "type": ["string", "null"] },
                "changes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": false,
                        "properties": {
                            "change_id": { "type": "string" },
                            "change_type": {
                                "type": "string",
                                "enum": [
                                    "substitution",
                                    "insertion",
                                    "deletion",
                                    "renumbering",
                                    "multiple_occurrence"
                                ]
                            },
                            "location": {
                                "type": "object",
                                "additionalProperties": false,
                                "properties": {
                                    "section": { "type": ["string", "null"] },
                                    "subsection": { "type": ["string", "null"] },
                                    "clause": { "type": ["string", "null"] },
                                    "sub_clause": { "type": ["string", "null"] }
                                },
                                "required": ["section", "subsection", "clause", "sub_clause"]
                            },
                            "old_text": { "type": ["string", "null"] },
                            "new_text": { "type": ["string", "null"] },
                            "insert_position": { "type": ["string", "null"] },
                            "amendment_instruction": { "type": "string" },
                            "amendment_page": { "type": ["integer", "null"] },
                            "confidence_score": { "type": "number" },
                            "requires_human_review": { "type": "boolean" }
                        },
                        "required": [
                            "change_id",
                            "change_type",
                            "location",
                            "old_text",
                            "new_text",
                            "insert_position",
                            "amendment_instruction",
                            "amendment_page",
                            "confidence_score",
                            "requires_human_review"
                        ]
                    }
                }
            },
            "required": ["document_title", "amendment_number", "target_act", "changes"]
        }),
    }
}
