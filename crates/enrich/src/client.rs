//! Chat-completion client.

use async_trait::async_trait;
use bid_core::Section;
use serde_json::{json, Value};

use crate::config::EnrichConfig;
use crate::error::{FieldFailure, Result};

/// One section's request: the instruction and the JSON schema the answer
/// must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRequest {
    pub section: Section,
    pub prompt: String,
    pub schema: Value,
}

/// A service that answers a [`FieldRequest`] with a JSON value.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &FieldRequest) -> Result<Value>;
}

/// Perplexity chat-completions client.
#[derive(Debug, Clone)]
pub struct PerplexityClient {
    http: reqwest::Client,
    config: EnrichConfig,
}

impl PerplexityClient {
    pub fn new(config: EnrichConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CompletionClient for PerplexityClient {
    async fn complete(&self, request: &FieldRequest) -> Result<Value> {
        let resp = self
            .http
            .post(self.config.endpoint())
            .bearer_auth(self.config.api_key())
            .json(&request_body(self.config.model(), request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FieldFailure::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: Value = resp.json().await?;
        extract_content(&body)
    }
}

/// Request body constraining the answer to `request.schema`.
pub fn request_body(model: &str, request: &FieldRequest) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "user", "content": request.prompt }
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": { "schema": request.schema }
        }
    })
}

/// Parse the JSON answer held in `choices[0].message.content`.
///
/// The content may be wrapped in a Markdown code fence.
pub fn extract_content(body: &Value) -> Result<Value> {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or(FieldFailure::MissingContent)?;
    Ok(serde_json::from_str(strip_code_fence(content))?)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().trim_end_matches("```").trim()
}
