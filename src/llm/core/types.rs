//! Core types for the LLM abstraction layer

use serde::{Deserialize, Serialize};

use super::config::GenerationConfig;

/// Request to generate a completion from an LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Conversation history
    pub messages: Vec<Message>,
    /// Available tools the model can call (None disables tool use entirely)
    pub tools: Option<Vec<ToolDeclaration>>,
    /// Generation parameters
    pub config: GenerationConfig,
    /// System prompt/instructions
    pub system: Option<String>,
}

/// A single message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content blocks in the message
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// Create a new user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Create a new assistant message with text content
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// Create a tool message carrying a batch of tool results
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: MessageRole::Tool,
            content: results,
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input
    User,
    /// Model output
    Assistant,
    /// Tool execution results
    Tool,
}

/// Content block within a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text { text: String },
    /// Tool invocation requested by the model
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// Result of executing a requested tool
    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
}

impl ContentBlock {
    /// Build a success tool result matching a request id
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Build a failure tool result matching a request id
    pub fn tool_error(tool_use_id: impl Into<String>, message: impl Into<String>) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: message.into(),
            is_error: true,
        }
    }
}

/// Declaration of a tool available to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDeclaration {
    /// Function name
    pub name: String,
    /// What the tool does
    pub description: String,
    /// JSON Schema for parameters
    pub input_schema: serde_json::Value,
}

/// A completed model response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Content blocks produced by the model
    pub content: Vec<ContentBlock>,
    /// Why generation stopped
    pub stop_reason: StopReason,
    /// Token usage for this call
    pub usage: UsageMetadata,
}

impl CompletionResponse {
    /// Combined text from all text blocks, newline-joined.
    ///
    /// A response may mix text and tool-use blocks; this extracts only the
    /// text portions.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        parts.join("\n")
    }

    /// Tool-use blocks in the order the model emitted them
    pub fn tool_uses(&self) -> Vec<&ContentBlock> {
        self.content
            .iter()
            .filter(|block| matches!(block, ContentBlock::ToolUse { .. }))
            .collect()
    }

    /// Whether the model finished without requesting tools.
    ///
    /// `MaxTokens` counts as completion: the model has said all it is going
    /// to say, even if truncated.
    pub fn is_natural_completion(&self) -> bool {
        matches!(self.stop_reason, StopReason::EndTurn | StopReason::MaxTokens)
    }
}

/// Reason why generation finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural completion
    EndTurn,
    /// Hit token limit
    MaxTokens,
    /// Hit stop sequence
    StopSequence,
    /// Waiting for tool execution
    ToolUse,
    /// Provider-specific reason
    Other(String),
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Prompt tokens consumed
    pub input_tokens: u32,
    /// Response tokens generated
    pub output_tokens: u32,
}

impl UsageMetadata {
    /// Create new usage metadata
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Accumulate usage from another call
    pub fn add(&mut self, other: &UsageMetadata) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user_constructor() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.content.len(), 1);
        match &msg.content[0] {
            ContentBlock::Text { text } => assert_eq!(text, "Hello"),
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_tool_result_constructors() {
        match ContentBlock::tool_result("tool-123", "result data") {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => {
                assert_eq!(tool_use_id, "tool-123");
                assert_eq!(content, "result data");
                assert!(!is_error);
            }
            _ => panic!("Expected tool result content"),
        }

        match ContentBlock::tool_error("tool-456", "course not found") {
            ContentBlock::ToolResult {
                content, is_error, ..
            } => {
                assert_eq!(content, "course not found");
                assert!(is_error);
            }
            _ => panic!("Expected tool result content"),
        }
    }

    #[test]
    fn test_response_text_joins_blocks() {
        let response = CompletionResponse {
            content: vec![
                ContentBlock::Text {
                    text: "First.".to_string(),
                },
                ContentBlock::ToolUse {
                    id: "tool-1".to_string(),
                    name: "search_course_content".to_string(),
                    input: serde_json::json!({"query": "x"}),
                },
                ContentBlock::Text {
                    text: "Second.".to_string(),
                },
            ],
            stop_reason: StopReason::ToolUse,
            usage: UsageMetadata::default(),
        };

        assert_eq!(response.text(), "First.\nSecond.");
        assert_eq!(response.tool_uses().len(), 1);
    }

    #[test]
    fn test_natural_completion_covers_max_tokens() {
        let mut response = CompletionResponse {
            content: vec![],
            stop_reason: StopReason::EndTurn,
            usage: UsageMetadata::default(),
        };
        assert!(response.is_natural_completion());

        response.stop_reason = StopReason::MaxTokens;
        assert!(response.is_natural_completion());

        response.stop_reason = StopReason::ToolUse;
        assert!(!response.is_natural_completion());
    }

    #[test]
    fn test_content_block_serialization() {
        let tool_block = ContentBlock::ToolUse {
            id: "tool-1".to_string(),
            name: "get_course_outline".to_string(),
            input: serde_json::json!({"course_name": "RAG"}),
        };
        let json = serde_json::to_string(&tool_block).unwrap();
        assert!(json.contains("\"type\":\"tool_use\""));

        let deserialized: ContentBlock = serde_json::from_str(&json).unwrap();
        match deserialized {
            ContentBlock::ToolUse { id, name, .. } => {
                assert_eq!(id, "tool-1");
                assert_eq!(name, "get_course_outline");
            }
            _ => panic!("Expected tool use block"),
        }
    }

    #[test]
    fn test_stop_reason_serialization() {
        let json = serde_json::to_string(&StopReason::EndTurn).unwrap();
        assert_eq!(json, "\"end_turn\"");

        let json = serde_json::to_string(&StopReason::ToolUse).unwrap();
        assert_eq!(json, "\"tool_use\"");
    }

    #[test]
    fn test_usage_metadata_add() {
        let mut usage = UsageMetadata::new(100, 50);
        usage.add(&UsageMetadata::new(20, 30));
        assert_eq!(usage.input_tokens, 120);
        assert_eq!(usage.output_tokens, 80);
    }
}
