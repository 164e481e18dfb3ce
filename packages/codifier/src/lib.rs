//! Lexcodify Codifier - Download and analyze legal-document PDFs.
//!
//! This crate orchestrates the document pipelines: fetch a PDF from a URL
//! or local path, extract its text page by page, submit it to a
//! structured-completion service, and validate the response into the typed
//! records of `lexcodify-analysis`.
//!
//! # Architecture
//!
//! The codifier is organized into several modules:
//!
//! - [`config`]: configuration constants and locator helpers
//! - [`error`]: error types and Result alias
//! - [`http`]: download client with the single TLS-verification fallback
//! - [`pdf`]: PDF download and page-text extraction
//! - [`llm`]: structured-completion contract and the OpenAI-backed client
//! - [`prompts`]: prompt text and response schemas
//! - [`pipeline`]: fetch, complete, validate orchestration
//! - [`cli`]: command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod llm;
pub mod pdf;
pub mod pipeline;
pub mod prompts;

// Re-export main operations
pub use pipeline::{analyze_document, analyze_source, parse_amendment, parse_amendment_source};

// Re-export commonly used items
pub use error::{CodifierError, Result};
pub use llm::{OpenAiClient, StructuredCompletion};
pub use pdf::fetch_text;
