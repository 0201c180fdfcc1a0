//! Tool registry: named functions plus the catalog declared to the model

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::executor::ToolExecutor;
use crate::llm::core::types::ToolDeclaration;

/// Type alias for boxed async tool functions
type AsyncToolFn =
    Box<dyn Fn(serde_json::Value) -> BoxFuture<'static, Result<String, String>> + Send + Sync>;

/// Registry for tool functions callable by the LLM
///
/// Each registration pairs an executable function with the `ToolDeclaration`
/// advertised to the model. Arguments arrive as JSON and are deserialized into
/// the function's typed argument struct; results are serialized back to JSON
/// text. Unknown names and argument mismatches come back as `Err(String)`,
/// which the orchestrator records as a failed tool result.
pub struct ToolRegistry {
    functions: HashMap<String, AsyncToolFn>,
    declarations: Vec<ToolDeclaration>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            declarations: Vec::new(),
        }
    }

    /// Register an async tool function with its declaration
    pub fn register_async<F, Args, R, Fut>(&mut self, declaration: ToolDeclaration, func: F)
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Args: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
        Fut: Future<Output = Result<R, String>> + Send + 'static,
    {
        let wrapper = move |args_json: serde_json::Value| {
            let args = match serde_json::from_value::<Args>(args_json) {
                Ok(args) => args,
                Err(e) => {
                    let err_msg = format!("Failed to deserialize arguments: {}", e);
                    return Box::pin(async move { Err(err_msg) }) as BoxFuture<'static, _>;
                }
            };

            let future = func(args);

            Box::pin(async move {
                match future.await {
                    Ok(result) => serde_json::to_string(&result)
                        .map_err(|e| format!("Failed to serialize result: {}", e)),
                    Err(e) => Err(e),
                }
            }) as BoxFuture<'static, _>
        };

        self.functions.insert(declaration.name.clone(), Box::new(wrapper));
        self.declarations.push(declaration);
    }

    /// Register a synchronous tool function with its declaration
    pub fn register_sync<F, Args, R>(&mut self, declaration: ToolDeclaration, func: F)
    where
        F: Fn(Args) -> Result<R, String> + Send + Sync + 'static,
        Args: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        let wrapper = move |args_json: serde_json::Value| {
            let args = match serde_json::from_value::<Args>(args_json) {
                Ok(args) => args,
                Err(e) => {
                    let err_msg = format!("Failed to deserialize arguments: {}", e);
                    return Box::pin(async move { Err(err_msg) }) as BoxFuture<'static, _>;
                }
            };

            let result = func(args);

            Box::pin(async move {
                match result {
                    Ok(result) => serde_json::to_string(&result)
                        .map_err(|e| format!("Failed to serialize result: {}", e)),
                    Err(e) => Err(e),
                }
            }) as BoxFuture<'static, _>
        };

        self.functions.insert(declaration.name.clone(), Box::new(wrapper));
        self.declarations.push(declaration);
    }

    /// Register a synchronous tool whose result is already display text
    ///
    /// Skips the JSON result serialization of `register_sync`; what the
    /// function returns is exactly what the model sees.
    pub fn register_sync_text<F, Args>(&mut self, declaration: ToolDeclaration, func: F)
    where
        F: Fn(Args) -> Result<String, String> + Send + Sync + 'static,
        Args: DeserializeOwned + Send + 'static,
    {
        let wrapper = move |args_json: serde_json::Value| {
            let args = match serde_json::from_value::<Args>(args_json) {
                Ok(args) => args,
                Err(e) => {
                    let err_msg = format!("Failed to deserialize arguments: {}", e);
                    return Box::pin(async move { Err(err_msg) }) as BoxFuture<'static, _>;
                }
            };

            let result = func(args);
            Box::pin(async move { result }) as BoxFuture<'static, _>
        };

        self.functions.insert(declaration.name.clone(), Box::new(wrapper));
        self.declarations.push(declaration);
    }

    /// The catalog to advertise to the model
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.declarations.clone()
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    async fn execute_function(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<String, String> {
        match self.functions.get(name) {
            Some(func) => func(arguments).await,
            None => Err(format!("Unknown tool: {}", name)),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute(
        &self,
        _tool_use_id: String,
        name: String,
        arguments: serde_json::Value,
    ) -> Result<String, String> {
        self.execute_function(&name, arguments).await
    }
}
