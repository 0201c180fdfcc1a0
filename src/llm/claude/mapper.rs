//! Mapping between abstraction types and Claude-specific types

use crate::llm::core::types::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, MessageRole, StopReason,
    ToolDeclaration, UsageMetadata,
};

use super::types::{
    ClaudeContent, ClaudeContentBlock, ClaudeMessage, ClaudeTool, ClaudeToolChoice,
    MessagesRequest, MessagesResponse,
};

/// Convert our abstraction request to the Messages API request format
pub fn to_claude_request(request: CompletionRequest, model: &str) -> MessagesRequest {
    let has_tools = request.tools.is_some();
    MessagesRequest {
        model: model.to_string(),
        max_tokens: request.config.max_tokens,
        messages: request.messages.into_iter().map(to_claude_message).collect(),
        system: request.system,
        tools: request
            .tools
            .map(|tools| tools.into_iter().map(to_claude_tool).collect()),
        // "auto" tool choice: the model may answer with text or request tools
        tool_choice: has_tools.then_some(ClaudeToolChoice::Auto),
        temperature: request.config.temperature,
        top_p: request.config.top_p,
        stop_sequences: request.config.stop_sequences,
    }
}

/// Convert our Message to Claude's message format
fn to_claude_message(message: Message) -> ClaudeMessage {
    let role = match message.role {
        MessageRole::User => "user".to_string(),
        MessageRole::Assistant => "assistant".to_string(),
        // Tool results go in user messages for Claude
        MessageRole::Tool => "user".to_string(),
    };

    // A single text block serializes as plain string content
    if message.content.len() == 1 {
        if let ContentBlock::Text { text } = &message.content[0] {
            return ClaudeMessage {
                role,
                content: ClaudeContent::Text(text.clone()),
            };
        }
    }

    let blocks = message
        .content
        .into_iter()
        .map(to_claude_content_block)
        .collect();

    ClaudeMessage {
        role,
        content: ClaudeContent::Blocks(blocks),
    }
}

fn to_claude_content_block(block: ContentBlock) -> ClaudeContentBlock {
    match block {
        ContentBlock::Text { text } => ClaudeContentBlock::Text { text },
        ContentBlock::ToolUse { id, name, input } => ClaudeContentBlock::ToolUse { id, name, input },
        ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => ClaudeContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error: if is_error { Some(true) } else { None },
        },
    }
}

fn to_claude_tool(tool: ToolDeclaration) -> ClaudeTool {
    ClaudeTool {
        name: tool.name,
        description: tool.description,
        input_schema: tool.input_schema,
    }
}

/// Convert a Messages API response to our abstraction's response
pub fn from_claude_response(response: MessagesResponse) -> CompletionResponse {
    let content = response
        .content
        .into_iter()
        .map(from_claude_content_block)
        .collect();

    let stop_reason = match response.stop_reason.as_deref() {
        Some("end_turn") | None => StopReason::EndTurn,
        Some("max_tokens") => StopReason::MaxTokens,
        Some("stop_sequence") => StopReason::StopSequence,
        Some("tool_use") => StopReason::ToolUse,
        Some(other) => StopReason::Other(other.to_string()),
    };

    CompletionResponse {
        content,
        stop_reason,
        usage: UsageMetadata::new(response.usage.input_tokens, response.usage.output_tokens),
    }
}

fn from_claude_content_block(block: ClaudeContentBlock) -> ContentBlock {
    match block {
        ClaudeContentBlock::Text { text } => ContentBlock::Text { text },
        ClaudeContentBlock::ToolUse { id, name, input } => ContentBlock::ToolUse { id, name, input },
        ClaudeContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
        } => ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error: is_error.unwrap_or(false),
        },
    }
}
