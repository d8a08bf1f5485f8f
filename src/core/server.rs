//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry and the prompt service.
//!
//! ## Startup Ordering
//!
//! `run()` loads the prompt catalog BEFORE opening the stdio transport,
//! so a client can never observe an empty-but-not-yet-attempted catalog.
//! The load may degrade to zero prompts on a backend failure; serving
//! starts either way and the catalog is never reloaded afterwards.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use tracing::{error, info, instrument, warn};

use super::api::ApiClient;
use super::config::Config;
use super::error::Result;
use super::transport::StdioTransport;
use crate::domains::prompts::PromptService;
use crate::domains::tools::{GetPromptTextTool, GetPromptsTool, ToolRegistry};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// protocol messages to the tool registry and the prompt service.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service owning the prompt catalog and content cache.
    prompt_service: Arc<PromptService>,

    /// Registry owning the tool handlers.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Builds the shared API client, the prompt service, and registers
    /// all tools. Fails if the HTTP client cannot be constructed or a
    /// tool name is registered twice.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        let api = Arc::new(ApiClient::new(&config.backend, &config.auth)?);
        let prompt_service = Arc::new(PromptService::new(api));

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(GetPromptsTool::new(prompt_service.clone())))?;
        registry.register(Arc::new(GetPromptTextTool::new(prompt_service.clone())))?;

        Ok(Self {
            config,
            prompt_service,
            registry: Arc::new(registry),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// The prompt service backing this server.
    pub fn prompt_service(&self) -> &Arc<PromptService> {
        &self.prompt_service
    }

    /// The tool registry backing this server.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Dispatch a tool call and convert any fault into a tool-error result.
    ///
    /// Dispatch faults (unknown tool, bad arguments) and unexpected tool
    /// faults all become a single `"Error: ..."` content item; the RPC
    /// call itself still succeeds at the protocol level.
    pub async fn dispatch_tool(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        match self.registry.execute(name, arguments).await {
            Ok(content) => CallToolResult::success(content),
            Err(e) => {
                error!("Tool error: {}", e);
                CallToolResult::error(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }

    /// Resolve a `prompts/get` request to a result, never a fault.
    pub async fn resolve_prompt(&self, name: &str) -> GetPromptResult {
        if !self.prompt_service.is_loaded(name).await {
            return GetPromptResult {
                description: Some("Prompt not found".to_string()),
                messages: vec![PromptMessage::new_text(
                    PromptMessageRole::Assistant,
                    format!("Error: Prompt '{}' not found", name),
                )],
            };
        }

        match self.prompt_service.get_prompt_content(name).await {
            Some(content) => {
                let description = self.prompt_service.format_description(name).await;
                GetPromptResult {
                    description: Some(description),
                    messages: vec![PromptMessage::new_text(
                        PromptMessageRole::Assistant,
                        content.content,
                    )],
                }
            }
            None => GetPromptResult {
                description: Some("Prompt content not found".to_string()),
                messages: vec![PromptMessage::new_text(
                    PromptMessageRole::Assistant,
                    format!("Error: Content for prompt '{}' not found", name),
                )],
            },
        }
    }

    /// Load the catalog, then serve the stdio transport until shutdown.
    pub async fn run(self) -> Result<()> {
        info!("Loading prompt catalog before accepting connections");
        self.prompt_service.register_prompts().await;

        let prompt_count = self.prompt_service.count().await;
        if prompt_count > 0 {
            info!(
                "Server ready with {} prompt(s) and {} tool(s)",
                prompt_count,
                self.registry.len()
            );
        } else {
            warn!("Server starting with 0 prompts");
        }

        StdioTransport::run(self).await?;
        Ok(())
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Bridges a remote prompt library over MCP. Use get_prompts to discover \
                 prompts and get_prompt_text to fetch the content of one prompt."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.registry.definitions(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let arguments = request.arguments.unwrap_or_default();
        Ok(self.dispatch_tool(&request.name, arguments).await)
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        Ok(ListPromptsResult {
            prompts: self.prompt_service.prompt_summaries().await,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        Ok(self.resolve_prompt(&request.name).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_for(backend: &MockServer) -> McpServer {
        let mut config = Config::default();
        config.set_base_url(&backend.uri());
        McpServer::new(config).unwrap()
    }

    fn text_of(content: &Content) -> &str {
        match &content.raw {
            RawContent::Text(text) => &text.text,
            other => panic!("Expected text content, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_registers_both_tools() {
        let backend = MockServer::start().await;
        let server = server_for(&backend);

        assert_eq!(
            server.registry().names(),
            vec!["get_prompts", "get_prompt_text"]
        );
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool_is_error_result() {
        let backend = MockServer::start().await;
        let server = server_for(&backend);

        let result = server.dispatch_tool("does_not_exist", JsonObject::new()).await;
        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result.content[0]);
        assert!(text.starts_with("Error: "));
        assert!(text.contains("Tool not found"));
    }

    #[tokio::test]
    async fn test_resolve_prompt_unknown_name() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prompts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&backend)
            .await;

        let server = server_for(&backend);
        server.prompt_service().register_prompts().await;

        let result = server.resolve_prompt("ghost").await;
        assert_eq!(result.description.as_deref(), Some("Prompt not found"));
    }

    #[tokio::test]
    async fn test_resolve_prompt_returns_content_and_description() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prompts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "identifier": "p1",
                "title": "T",
                "help_prompt_description": "D",
                "categories": ["a"]
            }])))
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/download-prompt"))
            .and(query_param("prompt_id", "p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "identifier": "p1",
                "title": "T",
                "content": "The prompt body"
            })))
            .mount(&backend)
            .await;

        let server = server_for(&backend);
        server.prompt_service().register_prompts().await;

        let result = server.resolve_prompt("p1").await;
        assert_eq!(result.description.as_deref(), Some("T: D (Categories: a)"));
        assert_eq!(result.messages.len(), 1);
    }

    #[tokio::test]
    async fn test_resolve_prompt_content_fetch_failure() {
        let backend = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/prompts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "identifier": "p1",
                "title": "T",
                "help_prompt_description": "D"
            }])))
            .mount(&backend)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/download-prompt"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&backend)
            .await;

        let server = server_for(&backend);
        server.prompt_service().register_prompts().await;

        let result = server.resolve_prompt("p1").await;
        assert_eq!(
            result.description.as_deref(),
            Some("Prompt content not found")
        );
    }
}
