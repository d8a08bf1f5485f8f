//! Data model for the prompt catalog and prompt content.
//!
//! [`PromptRecord`] is the wire shape of one catalog entry from the backend.
//! [`PromptMetadata`] is what the service caches per identifier, and
//! [`PromptContent`] is the normalized result of a content fetch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One catalog entry as returned by `GET /api/prompts`.
///
/// All fields default so a sparse backend record still deserializes;
/// records with an empty identifier are skipped during registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptRecord {
    pub identifier: String,
    pub title: String,
    pub categories: Vec<String>,
    pub help_prompt_description: String,
    pub help_user_input: String,
    pub help_sample_input: String,
    #[serde(rename = "type")]
    pub prompt_type: String,
    pub download_restricted: bool,
}

impl Default for PromptRecord {
    fn default() -> Self {
        Self {
            identifier: String::new(),
            title: String::new(),
            categories: Vec::new(),
            help_prompt_description: String::new(),
            help_user_input: String::new(),
            help_sample_input: String::new(),
            prompt_type: String::new(),
            download_restricted: false,
        }
    }
}

/// Cached metadata for one prompt, keyed by identifier in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptMetadata {
    pub title: String,
    pub categories: Vec<String>,
    pub help_prompt_description: String,
    pub help_user_input: String,
    pub help_sample_input: String,
    pub prompt_type: String,
}

impl PromptRecord {
    /// Strip the identifier and restriction flag for caching.
    pub fn into_metadata(self) -> PromptMetadata {
        PromptMetadata {
            title: self.title,
            categories: self.categories,
            help_prompt_description: self.help_prompt_description,
            help_user_input: self.help_user_input,
            help_sample_input: self.help_sample_input,
            prompt_type: self.prompt_type,
        }
    }

    /// Restore the full record shape from cached metadata.
    ///
    /// Cached prompts were filtered at load time, so the restriction
    /// flag is always false here.
    pub fn from_metadata(identifier: &str, metadata: &PromptMetadata) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: metadata.title.clone(),
            categories: metadata.categories.clone(),
            help_prompt_description: metadata.help_prompt_description.clone(),
            help_user_input: metadata.help_user_input.clone(),
            help_sample_input: metadata.help_sample_input.clone(),
            prompt_type: metadata.prompt_type.clone(),
            download_restricted: false,
        }
    }
}

/// Normalized result of `GET /api/download-prompt`, immutable once cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptContent {
    pub prompt_id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub prompt_type: String,
    pub follow_ups: Vec<String>,
}

impl PromptContent {
    /// Normalize a raw content response, filling absent fields with
    /// the documented defaults.
    pub fn from_value(prompt_id: &str, raw: &Value) -> Self {
        Self {
            prompt_id: raw
                .get("identifier")
                .and_then(Value::as_str)
                .unwrap_or(prompt_id)
                .to_string(),
            title: raw
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string(),
            content: raw
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or("No content available")
                .to_string(),
            prompt_type: raw
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("chat")
                .to_string(),
            follow_ups: raw
                .get("follow_ups")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
