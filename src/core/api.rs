//! Shared HTTP client for the backend prompt API.
//!
//! One [`ApiClient`] is constructed at startup and shared read-only between
//! the prompt service and the server. Credentials are attached as default
//! headers when the client is built and never change afterwards.

use reqwest::header;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::config::{AuthConfig, BackendConfig};

/// Errors from the backend API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status code.
    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout, or protocol-level failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The client could not be constructed from the configuration.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

/// HTTP client for the backend prompt API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client bound to the configured base URL.
    ///
    /// Authentication precedence: API key > disable flag > none. The
    /// session cookie is attached only when no API key is configured.
    pub fn new(backend: &BackendConfig, auth: &AuthConfig) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(api_key) = &auth.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| ApiError::Config("Invalid API key format".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
            info!("Using API key authentication");
        } else if auth.disable_auth {
            info!("Authentication disabled via MCP_DISABLE_AUTH=true");
        } else if let Some(cookie) = &auth.session_cookie {
            let value = header::HeaderValue::from_str(&format!("session={}", cookie))
                .map_err(|_| ApiError::Config("Invalid session cookie format".to_string()))?;
            headers.insert(header::COOKIE, value);
            info!("Using session cookie authentication");
        } else {
            warn!("No authentication provided. Ensure the backend runs with auth disabled");
        }

        let client = reqwest::Client::builder()
            .timeout(backend.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: backend.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL this client is bound to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a GET request and deserialize the JSON response body.
    ///
    /// Non-success status codes are surfaced as [`ApiError::Status`] with
    /// the response body attached for diagnostics.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "GET request");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
