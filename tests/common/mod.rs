//! Shared test doubles: a scripted LLM provider and canned responses
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use courseqa::llm::core::error::LlmError;
use courseqa::llm::core::provider::LlmProvider;
use courseqa::llm::core::types::{
    CompletionRequest, CompletionResponse, ContentBlock, StopReason, UsageMetadata,
};

/// Provider that replays scripted responses in order and records each request
pub struct ScriptedProvider {
    responses: Mutex<Vec<CompletionResponse>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle onto the request log, usable after the provider is boxed away
    pub fn request_log(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(LlmError::InvalidRequest(
                "scripted provider ran out of responses".to_string(),
            ));
        }
        Ok(responses.remove(0))
    }
}

/// A text-only response with a natural stop
pub fn text_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        content: vec![ContentBlock::Text {
            text: text.to_string(),
        }],
        stop_reason: StopReason::EndTurn,
        usage: UsageMetadata::new(25, 10),
    }
}

/// A response requesting the given tool invocations, in order
pub fn tool_use_response(requests: &[(&str, &str, serde_json::Value)]) -> CompletionResponse {
    CompletionResponse {
        content: requests
            .iter()
            .map(|(id, name, input)| ContentBlock::ToolUse {
                id: id.to_string(),
                name: name.to_string(),
                input: input.clone(),
            })
            .collect(),
        stop_reason: StopReason::ToolUse,
        usage: UsageMetadata::new(25, 10),
    }
}
