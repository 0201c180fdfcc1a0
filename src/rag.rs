//! The query pipeline: sessions + orchestrator + search tools

use std::sync::Arc;

use tracing::info;

use crate::llm::core::config::GenerationConfig;
use crate::llm::core::provider::LlmProvider;
use crate::llm::orchestrator::{Orchestrator, OrchestratorError};
use crate::llm::tools::ToolRegistry;
use crate::search::index::{CourseAnalytics, CourseIndex};
use crate::search::tools::SourceTracker;
use crate::session::SessionManager;

/// Static system prompt; conversation history is appended per query
const SYSTEM_PROMPT: &str = "\
You are an AI assistant specialized in course materials and educational content with access to tools for course information.

Available Tools:
1. **search_course_content**: Search course materials for specific content or educational details
2. **get_course_outline**: Get course structure including title, link, and complete lesson list with links

Tool Usage Guidelines:
- Use **search_course_content** for questions about specific course content, concepts, or detailed material
- Use **get_course_outline** for questions about course structure, lesson lists, what topics a course covers, or course outlines
- **Up to 2 sequential tool rounds available** - Use multiple rounds when one tool's results inform the next search (e.g., get course outline first, then search based on lesson title)
- Synthesize all tool results into accurate, fact-based responses
- If a tool yields no results, state this clearly without offering alternatives

Response Protocol:
- **General knowledge questions**: Answer using existing knowledge without tools
- **Course-specific questions**: Use appropriate tool first, then answer
- **Multi-step queries**: Chain tool calls when needed (e.g., first get outline to find lesson title, then search for related content)
- **No meta-commentary**:
  - Provide direct answers only - no reasoning process, tool explanations, or question-type analysis
  - Do not mention \"based on the search results\" or \"based on the outline\"

All responses must be:
1. **Brief, Concise and focused** - Get to the point quickly
2. **Educational** - Maintain instructional value
3. **Clear** - Use accessible language
4. **Example-supported** - Include relevant examples when they aid understanding
Provide only the direct answer to what was asked.";

/// Answer plus the sources the tools touched while producing it
#[derive(Debug)]
pub struct QueryOutcome {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Top-level RAG system shared across request handlers
pub struct RagSystem {
    provider: Box<dyn LlmProvider>,
    registry: ToolRegistry,
    sessions: Arc<SessionManager>,
    index: Arc<CourseIndex>,
    sources: Arc<SourceTracker>,
    generation: GenerationConfig,
}

impl RagSystem {
    /// Assemble the pipeline from its collaborators
    pub fn new(
        provider: Box<dyn LlmProvider>,
        registry: ToolRegistry,
        sessions: Arc<SessionManager>,
        index: Arc<CourseIndex>,
        sources: Arc<SourceTracker>,
    ) -> Self {
        Self {
            provider,
            registry,
            sessions,
            index,
            sources,
            generation: GenerationConfig::default(),
        }
    }

    /// Answer one query within a session
    ///
    /// # Errors
    ///
    /// Propagates orchestrator errors (blank query, provider failure). Tool
    /// failures never reach here; they degrade the answer instead.
    pub async fn query(
        &self,
        query: &str,
        session_id: &str,
    ) -> Result<QueryOutcome, OrchestratorError> {
        let system = match self.sessions.history(session_id) {
            Some(history) => format!("{}\n\nPrevious conversation:\n{}", SYSTEM_PROMPT, history),
            None => SYSTEM_PROMPT.to_string(),
        };

        let orchestrator = Orchestrator::new(
            self.provider.as_ref(),
            &self.registry,
            self.registry.declarations(),
            Some(system),
            self.generation.clone(),
        );

        let outcome = orchestrator.run(query).await?;
        info!(
            session = %session_id,
            rounds = outcome.rounds,
            termination = ?outcome.termination,
            input_tokens = outcome.usage.input_tokens,
            output_tokens = outcome.usage.output_tokens,
            "answered query"
        );

        self.sessions.add_exchange(session_id, query, &outcome.answer);

        Ok(QueryOutcome {
            answer: outcome.answer,
            sources: self.sources.drain(),
        })
    }

    /// Catalog statistics for the analytics endpoint
    pub fn analytics(&self) -> CourseAnalytics {
        self.index.analytics()
    }

    /// Create a new session
    pub fn create_session(&self) -> String {
        self.sessions.create_session()
    }

    /// Drop a session's history
    pub fn clear_session(&self, session_id: &str) {
        self.sessions.clear_session(session_id);
    }
}
