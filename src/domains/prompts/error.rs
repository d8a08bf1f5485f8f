//! Prompt-specific error types.

use thiserror::Error;

use crate::core::api::ApiError;

/// Errors that can occur during prompt operations.
///
/// Backend faults never cross the service boundary during reads: the
/// service converts them to degraded or not-found results. They only
/// surface here from [`load_catalog`](super::PromptService::load_catalog).
#[derive(Debug, Error)]
pub enum PromptError {
    /// The backend API call failed.
    #[error("Backend error: {0}")]
    Backend(#[from] ApiError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PromptError {
    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
