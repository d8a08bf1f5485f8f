//! Tool fetching the full text content of one prompt by identifier.

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{Content, JsonObject};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::domains::prompts::PromptService;
use crate::domains::tools::{ToolError, ToolHandler};

/// Parameters for the get_prompt_text tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetPromptTextParams {
    /// ID of the prompt to retrieve text for.
    #[schemars(description = "ID of the prompt to retrieve text for")]
    pub prompt_id: String,
}

/// Handler for the `get_prompt_text` tool.
pub struct GetPromptTextTool {
    service: Arc<PromptService>,
}

impl GetPromptTextTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_prompt_text";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the prompt text content by prompt ID";

    pub fn new(service: Arc<PromptService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ToolHandler for GetPromptTextTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<GetPromptTextParams>()
    }

    async fn execute(&self, arguments: JsonObject) -> Result<Vec<Content>, ToolError> {
        let prompt_id = arguments
            .get("prompt_id")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if prompt_id.is_empty() {
            return Ok(vec![Content::text("Error: prompt_id is required")]);
        }

        let Some(content) = self.service.get_prompt_content(prompt_id).await else {
            return Ok(vec![Content::text(format!(
                "Error: Prompt with ID '{}' not found or content unavailable",
                prompt_id
            ))]);
        };

        let text = serde_json::to_string_pretty(&content)
            .map_err(|e| ToolError::internal(e.to_string()))?;
        Ok(vec![Content::text(text)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::ApiClient;
    use crate::core::config::{AuthConfig, Config};
    use rmcp::model::RawContent;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> Arc<PromptService> {
        let mut config = Config::default();
        config.set_base_url(&server.uri());
        let api = ApiClient::new(&config.backend, &AuthConfig::default()).unwrap();
        Arc::new(PromptService::new(Arc::new(api)))
    }

    fn text_of(content: &Content) -> &str {
        match &content.raw {
            RawContent::Text(text) => &text.text,
            other => panic!("Expected text content, got {:?}", other),
        }
    }

    fn args(prompt_id: &str) -> JsonObject {
        let mut arguments = JsonObject::new();
        arguments.insert(
            "prompt_id".to_string(),
            Value::String(prompt_id.to_string()),
        );
        arguments
    }

    #[tokio::test]
    async fn test_missing_prompt_id_is_an_error_item() {
        let server = MockServer::start().await;
        let tool = GetPromptTextTool::new(service_for(&server));

        let content = tool.execute(JsonObject::new()).await.unwrap();
        assert_eq!(content.len(), 1);
        assert_eq!(text_of(&content[0]), "Error: prompt_id is required");
    }

    #[tokio::test]
    async fn test_empty_prompt_id_is_an_error_item() {
        let server = MockServer::start().await;
        let tool = GetPromptTextTool::new(service_for(&server));

        let content = tool.execute(args("")).await.unwrap();
        assert_eq!(text_of(&content[0]), "Error: prompt_id is required");
    }

    #[tokio::test]
    async fn test_unknown_prompt_is_an_error_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/download-prompt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let tool = GetPromptTextTool::new(service_for(&server));
        let content = tool.execute(args("missing-id")).await.unwrap();
        assert_eq!(
            text_of(&content[0]),
            "Error: Prompt with ID 'missing-id' not found or content unavailable"
        );
    }

    #[tokio::test]
    async fn test_returns_content_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/download-prompt"))
            .and(query_param("prompt_id", "p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "identifier": "p1",
                "title": "Title",
                "content": "Body",
                "type": "chat",
                "follow_ups": ["next"]
            })))
            .mount(&server)
            .await;

        let tool = GetPromptTextTool::new(service_for(&server));
        let content = tool.execute(args("p1")).await.unwrap();

        let payload: Value = serde_json::from_str(text_of(&content[0])).unwrap();
        assert_eq!(payload["prompt_id"], "p1");
        assert_eq!(payload["title"], "Title");
        assert_eq!(payload["content"], "Body");
        assert_eq!(payload["type"], "chat");
        assert_eq!(payload["follow_ups"][0], "next");
    }
}
