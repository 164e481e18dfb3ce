//! Structured-completion client.
//!
//! The completion service is an external collaborator with a narrow
//! contract: submit a prompt plus a response schema, receive a
//! schema-conformant JSON object or an error carrying the raw payload.
//! [`StructuredCompletion`] is the seam the pipelines depend on, so tests
//! substitute a canned implementation; [`OpenAiClient`] is the production
//! backend.

use std::time::Duration;

use serde_json::{json, Value};

use crate::config::{
    ReasoningEffort, API_KEY_ENV, BASE_URL_ENV, COMPLETION_TEMPERATURE, COMPLETION_TIMEOUT_SECS,
    DEFAULT_COMPLETION_BASE_URL,
};
use crate::error::{CodifierError, Result};

/// Name and JSON-schema body constraining a completion response.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    pub name: &'static str,
    pub schema: Value,
}

/// A single structured-completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub schema: SchemaDescriptor,
}

/// A service that turns a prompt into a schema-conformant JSON object.
pub trait StructuredCompletion {
    /// Submit the request and return the parsed response object.
    ///
    /// # Errors
    /// Fails with [`CodifierError::Completion`] when the service is
    /// unreachable, rejects the request, or returns content that is not a
    /// JSON object. The raw body travels with the error; the call is never
    /// retried at this layer.
    fn complete(&self, request: &CompletionRequest) -> Result<Value>;
}

/// OpenAI-compatible chat-completions backend.
pub struct OpenAiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
    reasoning_effort: Option<ReasoningEffort>,
}

impl OpenAiClient {
    /// Build a client from environment configuration.
    ///
    /// Reads the API key from `OPENAI_API_KEY` and an optional base URL
    /// override from `OPENAI_BASE_URL`.
    ///
    /// # Errors
    /// Fails with [`CodifierError::MissingApiKey`] when no key is set.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(CodifierError::MissingApiKey(API_KEY_ENV))?;

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string());

        Self::new(base_url, api_key, model)
    }

    /// Build a client against an explicit endpoint.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(COMPLETION_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            reasoning_effort: None,
        })
    }

    /// Set the reasoning effort hint passed to models that support it.
    #[must_use]
    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    fn completion_error(reason: String, raw: Option<String>) -> CodifierError {
        CodifierError::Completion { reason, raw }
    }
}

impl StructuredCompletion for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<Value> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({ "role": "system", "content": system }));
        }
        messages.push(json!({ "role": "user", "content": request.prompt }));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": COMPLETION_TEMPERATURE,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema.name,
                    "strict": true,
                    "schema": request.schema.schema,
                }
            }
        });
        if let Some(effort) = self.reasoning_effort {
            body["reasoning_effort"] = json!(effort.as_str());
        }

        tracing::debug!(
            model = %self.model,
            schema = request.schema.name,
            "Submitting completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| Self::completion_error(format!("request to {url} failed: {e}"), None))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| Self::completion_error(format!("failed to read response body: {e}"), None))?;

        if !status.is_success() {
            return Err(Self::completion_error(
                format!("completion service returned {status}"),
                Some(text),
            ));
        }

        let envelope: Value = serde_json::from_str(&text).map_err(|e| {
            Self::completion_error(format!("response is not JSON: {e}"), Some(text.clone()))
        })?;

        let content = envelope
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Self::completion_error("response has no message content".to_string(), Some(text.clone()))
            })?;

        serde_json::from_str(content).map_err(|e| {
            Self::completion_error(
                format!("message content is not a JSON object: {e}"),
                Some(content.to_string()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = OpenAiClient::new("https://api.example.com/", "key", "model").unwrap();
        assert_eq!(client.base_url, "https://api.example.com");
    }

    #[test]
    fn test_with_reasoning_effort() {
        let client = OpenAiClient::new("https://api.example.com", "key", "model")
            .unwrap()
            .with_reasoning_effort(ReasoningEffort::High);
        assert_eq!(client.reasoning_effort, Some(ReasoningEffort::High));
    }
}
