use crate::llm::core::error::LlmError;

/// Errors that can occur while driving the tool-calling loop
///
/// Tool execution failures are deliberately absent: they are captured as tool
/// results inside the conversation, never surfaced as errors.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Error from the LLM provider (network, auth, rate limit)
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The query was empty or whitespace-only
    #[error("Query must not be empty")]
    EmptyQuery,
}
