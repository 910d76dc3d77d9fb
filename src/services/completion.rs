//! Outbound chat-completion calls (OpenAI-compatible API)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::AiConfig;

/// Longest error body kept in a [`CompletionError::Status`]
const MAX_ERROR_BODY: usize = 500;

/// Sampling and time limits for one call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_message: String,
    pub user_prompt: String,
    pub options: CompletionOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}

/// Anything that can answer a chat-completion request with message text
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// [`CompletionClient`] backed by `POST {endpoint}/chat/completions`
pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpCompletionClient {
    pub fn new(config: &AiConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Transport(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn request_body(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_message },
                { "role": "user", "content": request.user_prompt },
            ],
            "temperature": request.options.temperature,
            "max_tokens": request.options.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let timeout = request.options.timeout;

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&self.request_body(&request))
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
        extract_message_content(&value)
    }
}

fn transport_error(e: reqwest::Error, timeout: Duration) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout(timeout)
    } else {
        CompletionError::Transport(e.to_string())
    }
}

/// Pull `choices[0].message.content` out of a completion body
pub fn extract_message_content(body: &Value) -> Result<String, CompletionError> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|content| !content.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            CompletionError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}
