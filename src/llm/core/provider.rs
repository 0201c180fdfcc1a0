//! Provider trait for LLM implementations

use async_trait::async_trait;

use super::error::LlmError;
use super::types::{CompletionRequest, CompletionResponse};

/// Main interface that all LLM provider implementations must satisfy
///
/// One call, one completed response. Tool use is enabled by including a tool
/// catalog in the request and disabled by omitting it; the provider itself
/// never executes tools.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a completion request and wait for the full response.
    ///
    /// # Errors
    ///
    /// Returns `LlmError` on network, authentication, or provider failures.
    /// These are not retried here; the caller decides what a failed call means.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
