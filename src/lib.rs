//! MCP Prompt Bridge Server Library
//!
//! This crate bridges a local MCP (Model Context Protocol) stdio transport
//! to a remote HTTP prompt API. It exposes the backend's prompt catalog as
//! MCP prompts and provides tools for discovering and fetching prompt
//! content.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the shared API client, the
//!   main server handler, and the stdio transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: MCP tools dispatched through a dynamic registry
//!   - **prompts**: Prompt catalog and content caching against the backend
//!
//! # Example
//!
//! ```rust,no_run
//! use prompt_bridge_mcp_server::core::{Config, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{ApiClient, Config, Error, McpServer, Result};
