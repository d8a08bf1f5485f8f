//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handler.rs` - The ToolHandler trait every tool implements
//! - `registry.rs` - Central tool registry and dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Implement the `ToolHandler` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `core/server.rs` via `ToolRegistry::register`

pub mod definitions;
mod error;
mod handler;
mod registry;

pub use definitions::{GetPromptTextTool, GetPromptsTool};
pub use error::ToolError;
pub use handler::ToolHandler;
pub use registry::ToolRegistry;
