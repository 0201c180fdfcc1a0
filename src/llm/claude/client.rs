//! Claude client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::llm::core::{
    error::LlmError,
    provider::LlmProvider,
    types::{CompletionRequest, CompletionResponse},
};

use super::mapper::{from_claude_response, to_claude_request};
use super::types::{ClaudeErrorResponse, MessagesResponse};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API
pub struct ClaudeClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key sent in the x-api-key header
    api_key: String,
    /// Model identifier (e.g. "claude-sonnet-4-5")
    model: String,
    /// API base URL; overridable for tests
    base_url: String,
}

impl ClaudeClient {
    /// Create a new Claude client
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be
    /// built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::AuthenticationError(
                "ANTHROPIC_API_KEY is not set".to_string(),
            ));
        }

        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different base URL (mock servers in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    async fn send_request(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let claude_request = to_claude_request(request, &self.model);

        debug!(model = %self.model, messages = claude_request.messages.len(), "calling Messages API");

        let response = self
            .http_client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&claude_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(LlmError::RateLimitExceeded { retry_after });
            }

            // Prefer the structured error message when the body parses
            if let Ok(envelope) = serde_json::from_str::<ClaudeErrorResponse>(&body) {
                return Err(LlmError::ProviderError {
                    code: envelope.error.error_type,
                    message: envelope.error.message,
                });
            }

            return Err(LlmError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let body: MessagesResponse = response.json().await?;
        Ok(from_claude_response(body))
    }
}

#[async_trait]
impl LlmProvider for ClaudeClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.send_request(request).await
    }
}
