//! Prompts domain module.
//!
//! This module handles all prompt-related functionality for the MCP server.
//! The catalog of prompt metadata lives on a remote backend; the service
//! caches it at startup and fetches individual prompt content lazily.
//!
//! ## Architecture
//!
//! - `models.rs` - Catalog record, cached metadata, and content types
//! - `service.rs` - Prompt service: catalog load, caching, formatting
//! - `error.rs` - Prompt-specific error types

mod error;
mod models;
mod service;

pub use error::PromptError;
pub use models::{PromptContent, PromptMetadata, PromptRecord};
pub use service::PromptService;
