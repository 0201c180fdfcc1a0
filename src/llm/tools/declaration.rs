//! Tool declaration helpers using JSON Schema generation

use schemars::{schema_for, JsonSchema};

use crate::llm::core::types::ToolDeclaration;

/// Create a tool declaration from a type that implements JsonSchema
///
/// The input schema is generated from the Rust argument type, so the schema
/// declared to the model and the type the registry deserializes into cannot
/// drift apart.
///
/// # Example
///
/// ```ignore
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct SearchArgs {
///     /// What to search for
///     query: String,
///     /// Course title to restrict the search to
///     course_name: Option<String>,
/// }
///
/// let decl = declare_tool::<SearchArgs>(
///     "search_course_content",
///     "Search course materials for specific content",
/// );
/// ```
pub fn declare_tool<T: JsonSchema>(
    name: impl Into<String>,
    description: impl Into<String>,
) -> ToolDeclaration {
    let schema = schema_for!(T);
    ToolDeclaration {
        name: name.into(),
        description: description.into(),
        input_schema: serde_json::to_value(&schema)
            .expect("Failed to serialize schema - this is a bug in schemars or the JsonSchema impl"),
    }
}
