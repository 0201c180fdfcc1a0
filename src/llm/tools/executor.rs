//! Tool executor trait

use async_trait::async_trait;

/// Trait for executing tool calls requested by the LLM
///
/// Implementations handle the actual execution of tools. Failure is returned
/// as a value (`Err(String)` with a human-readable message) rather than raised:
/// the orchestrator feeds failures back into the conversation as tool results.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool call
    ///
    /// # Arguments
    ///
    /// * `tool_use_id` - Unique identifier for this tool invocation
    /// * `name` - Name of the tool to execute
    /// * `arguments` - Tool arguments as a JSON value
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Successful execution result
    /// * `Err(String)` - Error message describing what went wrong
    async fn execute(
        &self,
        tool_use_id: String,
        name: String,
        arguments: serde_json::Value,
    ) -> Result<String, String>;
}
