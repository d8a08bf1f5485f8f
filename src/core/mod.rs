//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the shared backend API client,
//! server lifecycle management, and the transport layer.

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use api::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::StdioTransport;
