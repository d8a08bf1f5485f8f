//! Prompt service implementation.
//!
//! The PromptService is the source of truth for the prompt catalog and a
//! cache for per-prompt content fetches. The catalog is loaded once at
//! startup; content is fetched lazily per identifier and kept for the
//! process lifetime. The cache is unbounded by design (an LRU keyed by
//! prompt id is the natural extension point if bounding is ever needed).

use std::collections::HashMap;
use std::sync::Arc;

use rmcp::model::Prompt;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::error::PromptError;
use super::models::{PromptContent, PromptMetadata, PromptRecord};
use crate::core::api::ApiClient;

/// Catalog state: loaded flag plus metadata per identifier.
///
/// Once `loaded` becomes true it never reverts; an empty loaded catalog
/// is the valid degraded state after a backend failure at startup.
#[derive(Default)]
struct Catalog {
    loaded: bool,
    prompts: HashMap<String, PromptMetadata>,
}

/// Service for catalog and content operations against the backend API.
pub struct PromptService {
    api: Arc<ApiClient>,
    catalog: RwLock<Catalog>,
    content_cache: RwLock<HashMap<String, PromptContent>>,
}

impl PromptService {
    /// Create a new PromptService bound to the shared API client.
    pub fn new(api: Arc<ApiClient>) -> Self {
        info!("Initializing PromptService");
        Self {
            api,
            catalog: RwLock::new(Catalog::default()),
            content_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the prompt catalog from the backend.
    ///
    /// Download-restricted records are filtered out here and never reach
    /// any cache. Backend faults are propagated to the caller.
    pub async fn load_catalog(&self) -> Result<Vec<PromptRecord>, PromptError> {
        info!("Loading prompt catalog from {}", self.api.base_url());
        let records: Vec<PromptRecord> = self.api.get_json("/api/prompts", &[]).await?;

        let total = records.len();
        let records: Vec<PromptRecord> = records
            .into_iter()
            .filter(|record| !record.download_restricted)
            .collect();
        if records.len() < total {
            debug!(
                "Filtered {} download-restricted prompt(s)",
                total - records.len()
            );
        }

        info!("Loaded {} prompt(s) from backend", records.len());
        Ok(records)
    }

    /// Load the catalog and store metadata per identifier.
    ///
    /// Always leaves the catalog in the loaded state. On a backend fault
    /// the error is logged and the service continues with zero prompts;
    /// every read method stays usable afterwards.
    pub async fn register_prompts(&self) {
        match self.load_catalog().await {
            Ok(records) => {
                let mut catalog = self.catalog.write().await;
                for record in records {
                    if record.identifier.is_empty() {
                        warn!("Skipping prompt with missing identifier");
                        continue;
                    }
                    catalog
                        .prompts
                        .insert(record.identifier.clone(), record.into_metadata());
                }
                catalog.loaded = true;
                info!("Registered {} prompt(s)", catalog.prompts.len());
            }
            Err(e) => {
                error!("Failed to register prompts: {}", e);
                let mut catalog = self.catalog.write().await;
                catalog.loaded = true;
                warn!("Continuing with 0 prompts due to loading failure");
            }
        }
    }

    /// Cached catalog restored to the full record shape.
    ///
    /// Empty until [`register_prompts`](Self::register_prompts) has run.
    pub async fn cached_prompts(&self) -> Vec<PromptRecord> {
        let catalog = self.catalog.read().await;
        if !catalog.loaded {
            return Vec::new();
        }

        catalog
            .prompts
            .iter()
            .map(|(identifier, metadata)| PromptRecord::from_metadata(identifier, metadata))
            .collect()
    }

    /// Get prompt content, fetching and caching on first access.
    ///
    /// The backend may answer with a single object or a one/many-element
    /// array; an empty body or array means not-found. Fetch faults are
    /// logged and converted to `None`, never propagated.
    pub async fn get_prompt_content(&self, prompt_id: &str) -> Option<PromptContent> {
        if let Some(content) = self.content_cache.read().await.get(prompt_id) {
            debug!("Using cached content for prompt: {}", prompt_id);
            return Some(content.clone());
        }

        debug!("Fetching content for prompt: {}", prompt_id);
        let body: Value = match self
            .api
            .get_json("/api/download-prompt", &[("prompt_id", prompt_id)])
            .await
        {
            Ok(body) => body,
            Err(e) => {
                error!("Error fetching prompt content for {}: {}", prompt_id, e);
                return None;
            }
        };

        let raw = match body {
            Value::Null => return None,
            Value::Array(items) => items.into_iter().next()?,
            Value::Object(map) if map.is_empty() => return None,
            other => other,
        };

        let content = PromptContent::from_value(prompt_id, &raw);

        let mut cache = self.content_cache.write().await;
        // First fetch wins if another handler raced us here.
        let entry = cache
            .entry(prompt_id.to_string())
            .or_insert(content)
            .clone();
        debug!("Cached content for prompt: {}", prompt_id);
        Some(entry)
    }

    /// Cached metadata for one identifier.
    pub async fn metadata(&self, prompt_id: &str) -> Option<PromptMetadata> {
        self.catalog.read().await.prompts.get(prompt_id).cloned()
    }

    /// Human-readable description: `"{title}: {description}"` with a
    /// `" (Categories: ...)"` suffix only when categories exist.
    pub async fn format_description(&self, prompt_id: &str) -> String {
        let catalog = self.catalog.read().await;
        match catalog.prompts.get(prompt_id) {
            Some(metadata) => describe(metadata),
            None => ": ".to_string(),
        }
    }

    /// `{name, description}` pairs for `prompts/list`.
    pub async fn prompt_summaries(&self) -> Vec<Prompt> {
        let catalog = self.catalog.read().await;
        if !catalog.loaded {
            return Vec::new();
        }

        catalog
            .prompts
            .iter()
            .map(|(identifier, metadata)| Prompt {
                name: identifier.clone(),
                title: None,
                description: Some(describe(metadata)),
                arguments: None,
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Whether this identifier is in the loaded catalog.
    pub async fn is_loaded(&self, prompt_id: &str) -> bool {
        self.catalog.read().await.prompts.contains_key(prompt_id)
    }

    /// Number of loaded prompts, 0 until the catalog load has run.
    pub async fn count(&self) -> usize {
        let catalog = self.catalog.read().await;
        if catalog.loaded {
            catalog.prompts.len()
        } else {
            0
        }
    }
}

fn describe(metadata: &PromptMetadata) -> String {
    let mut formatted = format!("{}: {}", metadata.title, metadata.help_prompt_description);
    if !metadata.categories.is_empty() {
        formatted.push_str(&format!(
            " (Categories: {})",
            metadata.categories.join(", ")
        ));
    }
    formatted
}
