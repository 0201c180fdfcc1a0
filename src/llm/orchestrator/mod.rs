//! Sequential tool-calling orchestrator
//!
//! Drives up to [`MAX_TOOL_ROUNDS`] rounds of "ask the model, execute the
//! tools it requested, feed the results back". The loop ends when the model
//! answers without requesting tools, when a tool execution fails, or when the
//! round budget runs out; in the latter two cases one final synthesis call is
//! made with tools disabled and its text is returned unconditionally.
//!
//! The conversation built here is local to one query. Cross-turn history is
//! the session manager's job and arrives pre-rendered inside the system
//! instruction.

mod error;

pub use error::OrchestratorError;

use tracing::{debug, warn};

use crate::llm::core::{
    config::GenerationConfig,
    provider::LlmProvider,
    types::{
        CompletionRequest, CompletionResponse, ContentBlock, Message, MessageRole,
        ToolDeclaration, UsageMetadata,
    },
};
use crate::llm::tools::executor::ToolExecutor;

/// Maximum sequential tool-calling rounds per query
pub const MAX_TOOL_ROUNDS: usize = 2;

/// How the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The model answered without requesting tools
    NaturalCompletion,
    /// A tool execution failed; the loop stopped early
    ExecutionError,
    /// The round budget was used up
    RoundsExhausted,
}

/// Final answer plus the full conversation for auditing
#[derive(Debug)]
pub struct OrchestratorOutcome {
    /// The answer returned to the caller
    pub answer: String,
    /// Every message exchanged during the loop, in order
    pub transcript: Vec<Message>,
    /// Why the tool-calling loop stopped
    pub termination: Termination,
    /// Completed tool rounds (0 when the model answered directly)
    pub rounds: usize,
    /// Token usage summed over all model calls
    pub usage: UsageMetadata,
}

/// Orchestrator for one user query
///
/// Holds only read-only references to its collaborators; all mutable state
/// (the conversation, the round counter) lives inside [`Orchestrator::run`],
/// so separate queries can run concurrently over the same provider and
/// executor.
pub struct Orchestrator<'a> {
    provider: &'a dyn LlmProvider,
    executor: &'a dyn ToolExecutor,
    tools: Vec<ToolDeclaration>,
    system: Option<String>,
    config: GenerationConfig,
    max_rounds: usize,
}

impl<'a> Orchestrator<'a> {
    /// Create an orchestrator over a provider, an executor, and a tool catalog
    pub fn new(
        provider: &'a dyn LlmProvider,
        executor: &'a dyn ToolExecutor,
        tools: Vec<ToolDeclaration>,
        system: Option<String>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            provider,
            executor,
            tools,
            system,
            config,
            max_rounds: MAX_TOOL_ROUNDS,
        }
    }

    /// Override the round budget (used by tests)
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Run the full loop for one user query
    ///
    /// # Errors
    ///
    /// `OrchestratorError::EmptyQuery` for a blank query, and
    /// `OrchestratorError::Llm` when any model call fails. Tool failures do
    /// not error; they terminate the loop and degrade the answer instead.
    pub async fn run(
        &self,
        query: impl Into<String>,
    ) -> Result<OrchestratorOutcome, OrchestratorError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(OrchestratorError::EmptyQuery);
        }

        let mut messages = vec![Message::user(query)];
        let mut usage = UsageMetadata::default();

        // No tools registered: nothing to loop over, go straight to synthesis.
        if self.tools.is_empty() {
            let response = self.call_model(&messages, false).await?;
            usage.add(&response.usage);
            let answer = response.text();
            messages.push(Message::assistant(answer.clone()));
            return Ok(OrchestratorOutcome {
                answer,
                transcript: messages,
                termination: Termination::NaturalCompletion,
                rounds: 0,
                usage,
            });
        }

        let mut rounds = 0;
        let termination;

        loop {
            let response = self.call_model(&messages, true).await?;
            usage.add(&response.usage);

            let tool_uses: Vec<(String, String, serde_json::Value)> = response
                .tool_uses()
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::ToolUse { id, name, input } => {
                        Some((id.clone(), name.clone(), input.clone()))
                    }
                    _ => None,
                })
                .collect();

            if tool_uses.is_empty() {
                // Natural completion: the model's text is the final answer,
                // no synthesis call.
                debug!(rounds, "model completed without tool use");
                let answer = response.text();
                messages.push(Message {
                    role: MessageRole::Assistant,
                    content: response.content,
                });
                return Ok(OrchestratorOutcome {
                    answer,
                    transcript: messages,
                    termination: Termination::NaturalCompletion,
                    rounds,
                    usage,
                });
            }

            // Execute every requested tool in request order. A failure is
            // captured as an error result and the batch keeps going.
            let mut results = Vec::with_capacity(tool_uses.len());
            let mut had_failure = false;

            for (id, name, input) in &tool_uses {
                debug!(tool = %name, tool_use_id = %id, "executing tool");
                match self
                    .executor
                    .execute(id.clone(), name.clone(), input.clone())
                    .await
                {
                    Ok(result) => results.push(ContentBlock::tool_result(id, result)),
                    Err(message) => {
                        warn!(tool = %name, error = %message, "tool execution failed");
                        results
                            .push(ContentBlock::tool_error(id, format!(
                                "Tool execution error: {}",
                                message
                            )));
                        had_failure = true;
                    }
                }
            }

            messages.push(Message {
                role: MessageRole::Assistant,
                content: response.content,
            });
            messages.push(Message::tool_results(results));

            if had_failure {
                termination = Termination::ExecutionError;
                break;
            }

            rounds += 1;
            if rounds >= self.max_rounds {
                termination = Termination::RoundsExhausted;
                break;
            }
        }

        // One tools-disabled call to synthesize whatever the loop gathered.
        // Its text is final no matter what the model signals.
        debug!(?termination, rounds, "making synthesis call");
        let response = self.call_model(&messages, false).await?;
        usage.add(&response.usage);
        let answer = response.text();
        messages.push(Message::assistant(answer.clone()));

        Ok(OrchestratorOutcome {
            answer,
            transcript: messages,
            termination,
            rounds,
            usage,
        })
    }

    async fn call_model(
        &self,
        messages: &[Message],
        with_tools: bool,
    ) -> Result<CompletionResponse, OrchestratorError> {
        let request = CompletionRequest {
            messages: messages.to_vec(),
            tools: if with_tools {
                Some(self.tools.clone())
            } else {
                None
            },
            config: self.config.clone(),
            system: self.system.clone(),
        };
        Ok(self.provider.complete(request).await?)
    }
}
