//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry owns one handler per tool name and dispatches calls by
//! name. Listing preserves registration order. Duplicate registration
//! fails fast rather than silently overwriting the earlier handler.

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::{Content, JsonObject, Tool};
use tracing::info;

use super::error::ToolError;
use super::handler::ToolHandler;

/// Registry of tool handlers keyed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a tool handler under its own name.
    pub fn register(&mut self, tool: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::duplicate(name));
        }

        info!("Registered tool: {}", name);
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Tool definitions in registration order.
    pub fn definitions(&self) -> Vec<Tool> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| tool.definition())
            .collect()
    }

    /// Registered tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name.
    ///
    /// Unregistered names fail with [`ToolError::NotFound`]; the protocol
    /// layer surfaces this as a tool-error result, not a protocol fault.
    pub async fn execute(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<Vec<Content>, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::not_found(name))?;
        tool.execute(arguments).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubTool {
        name: &'static str,
    }

    #[async_trait]
    impl ToolHandler for StubTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "stub tool"
        }

        fn input_schema(&self) -> Arc<JsonObject> {
            Arc::new(JsonObject::new())
        }

        async fn execute(&self, _arguments: JsonObject) -> Result<Vec<Content>, ToolError> {
            Ok(vec![Content::text("ok")])
        }
    }

    struct FaultyTool;

    #[async_trait]
    impl ToolHandler for FaultyTool {
        fn name(&self) -> &str {
            "faulty"
        }

        fn description(&self) -> &str {
            "always fails"
        }

        fn input_schema(&self) -> Arc<JsonObject> {
            Arc::new(JsonObject::new())
        }

        async fn execute(&self, _arguments: JsonObject) -> Result<Vec<Content>, ToolError> {
            Err(ToolError::internal("broken"))
        }
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(StubTool { name: "beta" })).unwrap();
        registry.register(Arc::new(StubTool { name: "alpha" })).unwrap();

        assert_eq!(registry.names(), vec!["beta", "alpha"]);
        let definitions = registry.definitions();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[0].name, "beta");
        assert_eq!(definitions[1].name, "alpha");
    }

    #[test]
    fn test_register_duplicate_fails_fast() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(StubTool { name: "alpha" })).unwrap();

        let result = registry.register(Arc::new(StubTool { name: "alpha" }));
        assert!(matches!(result, Err(ToolError::Duplicate(name)) if name == "alpha"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_unknown_is_not_found() {
        let registry = ToolRegistry::new();
        let result = registry.execute("unknown", JsonObject::new()).await;

        match result {
            Err(ToolError::NotFound(name)) => assert_eq!(name, "unknown"),
            other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_execute_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(StubTool { name: "alpha" })).unwrap();

        let content = registry.execute("alpha", JsonObject::new()).await.unwrap();
        assert_eq!(content.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_propagates_internal_faults() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FaultyTool)).unwrap();

        let result = registry.execute("faulty", JsonObject::new()).await;
        assert!(matches!(result, Err(ToolError::Internal(_))));
    }
}
