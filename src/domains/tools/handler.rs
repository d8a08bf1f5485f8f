//! Tool contract: a named, schema-described unit of callable work.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject, Tool};

use super::error::ToolError;

/// Uniform interface for all tools exposed over MCP.
///
/// Expected failure modes (missing required argument, backend error,
/// not-found) must NOT surface as `Err`: implementations return `Ok`
/// with a single text content item beginning `"Error: "`. `Err` is
/// reserved for unexpected internal faults; the registry's callers log
/// those and convert them to an error content item, so a single tool
/// fault never crashes the process.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Stable identifier, used as the dispatch key.
    fn name(&self) -> &str;

    /// Human-readable summary, surfaced verbatim to the client.
    fn description(&self) -> &str;

    /// Structural description of accepted arguments, returned verbatim.
    /// Validation is the tool's own responsibility inside `execute`.
    fn input_schema(&self) -> Arc<JsonObject>;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: JsonObject) -> Result<Vec<Content>, ToolError>;

    /// The tool definition advertised via `tools/list`.
    fn definition(&self) -> Tool {
        Tool {
            name: self.name().to_string().into(),
            description: Some(self.description().to_string().into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
