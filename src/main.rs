//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It initializes logging,
//! loads configuration, and starts the server on the stdio transport.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use prompt_bridge_mcp_server::core::{Config, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let mut config = Config::from_env();

    // Positional overrides kept for compatibility with existing launchers:
    // argv[1] = backend base URL, argv[2] = session cookie.
    let args: Vec<String> = std::env::args().collect();
    if let Some(url) = args.get(1) {
        config.set_base_url(url);
    }
    if let Some(cookie) = args.get(2) {
        config.auth.session_cookie = Some(cookie.clone());
    }

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Create the MCP server; the catalog is loaded inside run() before
    // the transport starts accepting connections.
    let server = McpServer::new(config)?;
    server.run().await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level. Output goes to stderr
/// because stdout carries the MCP protocol stream.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
