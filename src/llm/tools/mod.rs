//! Tool execution framework
//!
//! Infrastructure for executing tool calls from the LLM: the `ToolExecutor`
//! trait and the `ToolRegistry` that maps tool names to registered functions
//! and carries the declaration catalog advertised to the model.

pub mod declaration;
pub mod executor;
pub mod registry;

pub use declaration::declare_tool;
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
