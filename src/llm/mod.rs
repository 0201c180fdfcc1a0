//! LLM abstraction layer
//!
//! A unified interface for a Claude-style tool-calling model: core types and
//! the provider trait, the Anthropic client, the tool execution framework, and
//! the sequential tool-calling orchestrator that ties them together.

pub mod claude;
pub mod core;
pub mod orchestrator;
pub mod tools;

// Re-export commonly used types
pub use core::{
    config::GenerationConfig,
    error::LlmError,
    provider::LlmProvider,
    types::{
        CompletionRequest, CompletionResponse, ContentBlock, Message, MessageRole, StopReason,
        ToolDeclaration, UsageMetadata,
    },
};

pub use claude::ClaudeClient;
pub use orchestrator::{
    Orchestrator, OrchestratorError, OrchestratorOutcome, Termination, MAX_TOOL_ROUNDS,
};
pub use tools::{declare_tool, ToolExecutor, ToolRegistry};
