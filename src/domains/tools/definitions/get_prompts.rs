//! Tool returning the cached prompt catalog with metadata.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domains::prompts::PromptService;
use crate::domains::tools::{ToolError, ToolHandler};

/// Parameters for the get_prompts tool. The tool takes no arguments.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetPromptsParams {}

/// Handler for the `get_prompts` tool.
pub struct GetPromptsTool {
    service: Arc<PromptService>,
}

impl GetPromptsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_prompts";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get all available prompts with their metadata and follow-ups";

    pub fn new(service: Arc<PromptService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for GetPromptsTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<GetPromptsParams>()
    }

    async fn execute(&self, _arguments: JsonObject) -> Result<Vec<Content>, ToolError> {
        let prompts = self.service.cached_prompts().await;
        if prompts.is_empty() {
            warn!("No prompts available - service may not be initialized");
        } else {
            debug!("Using cached prompts data for get_prompts tool");
        }

        let payload = serde_json::json!({
            "prompts": prompts,
            "total_count": prompts.len(),
        });
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| ToolError::internal(e.to_string()))?;

        Ok(vec![Content::text(text)])
    }
}
