//! Transport layer for the MCP server.
//!
//! The server speaks MCP over standard input/output; the JSON-RPC framing
//! and handshake are owned by the rmcp runtime. This module only wires the
//! server handler to that runtime.

mod error;
mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
