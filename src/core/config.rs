//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Backend prompt API configuration.
    pub backend: BackendConfig,

    /// Authentication configuration for the backend API.
    pub auth: AuthConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the backend prompt API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the prompt API, without a trailing slash.
    pub base_url: String,

    /// Request timeout in seconds for backend calls.
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Authentication configuration for the backend API.
///
/// Exactly one mode is active at a time, with precedence
/// API key > disable flag > none. The session cookie is kept for
/// backward compatibility and only used when no API key is set.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Bearer token sent as `Authorization: Bearer <key>`.
    pub api_key: Option<String>,

    /// Session cookie sent as `Cookie: session=<value>`.
    pub session_cookie: Option<String>,

    /// Whether the backend runs with authentication disabled.
    pub disable_auth: bool,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[REDACTED]"),
            )
            .field("disable_auth", &self.disable_auth)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            session_cookie: None,
            disable_auth: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "prompt-bridge-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            backend: BackendConfig {
                base_url: "http://localhost:8080".to_string(),
                timeout_secs: 60,
            },
            auth: AuthConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are prefixed with `MCP_`.
    /// For example: `MCP_API_URL`, `MCP_API_KEY`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(url) = std::env::var("MCP_API_URL") {
            config.set_base_url(&url);
        }

        if let Ok(timeout) = std::env::var("MCP_HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.backend.timeout_secs = secs;
            } else {
                warn!("Ignoring invalid MCP_HTTP_TIMEOUT_SECS value: {}", timeout);
            }
        }

        if let Ok(api_key) = std::env::var("MCP_API_KEY") {
            config.auth.api_key = Some(api_key);
        }

        if let Ok(cookie) = std::env::var("MCP_SESSION_COOKIE") {
            config.auth.session_cookie = Some(cookie);
        }

        config.auth.disable_auth = std::env::var("MCP_DISABLE_AUTH")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        info!("Backend API URL: {}", config.backend.base_url);

        config
    }

    /// Set the backend base URL, trimming any trailing slash.
    pub fn set_base_url(&mut self, url: &str) {
        self.backend.base_url = url.trim_end_matches('/').to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_api_url_from_env_trims_trailing_slash() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_API_URL", "https://prompts.example.com/");
        }
        let config = Config::from_env();
        assert_eq!(config.backend.base_url, "https://prompts.example.com");
        unsafe {
            std::env::remove_var("MCP_API_URL");
        }
    }

    #[test]
    fn test_auth_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_API_KEY", "test_key_12345");
            std::env::set_var("MCP_DISABLE_AUTH", "TRUE");
        }
        let config = Config::from_env();
        assert_eq!(config.auth.api_key.as_deref(), Some("test_key_12345"));
        assert!(config.auth.disable_auth);
        unsafe {
            std::env::remove_var("MCP_API_KEY");
            std::env::remove_var("MCP_DISABLE_AUTH");
        }
    }

    #[test]
    fn test_auth_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("MCP_API_KEY");
            std::env::remove_var("MCP_SESSION_COOKIE");
            std::env::remove_var("MCP_DISABLE_AUTH");
        }
        let config = Config::from_env();
        assert!(config.auth.api_key.is_none());
        assert!(config.auth.session_cookie.is_none());
        assert!(!config.auth.disable_auth);
    }

    #[test]
    fn test_secrets_redacted_in_debug() {
        let auth = AuthConfig {
            api_key: Some("super_secret_key".to_string()),
            session_cookie: Some("super_secret_cookie".to_string()),
            disable_auth: false,
        };
        let debug_str = format!("{:?}", auth);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(!debug_str.contains("super_secret_cookie"));
    }

    #[test]
    fn test_default_backend() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.backend.timeout(), Duration::from_secs(60));
    }
}
