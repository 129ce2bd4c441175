//! Cached knowledge of which models the server has pulled.

use std::collections::HashSet;

use tokio::sync::RwLock;
use tracing::debug;

use crate::api::TagsResponse;
use crate::config::OllamaConfig;
use crate::error::RegistryError;

const LATEST_TAG: &str = ":latest";

/// Set of installed model names.
///
/// The set is only as fresh as the last [`refresh`](Self::refresh) plus any
/// installs made through this process. Models removed on the server behind
/// our back are still reported as present.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: RwLock<HashSet<String>>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `names`.
    pub fn with_models<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: RwLock::new(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Replace the cached set with the server's current listing.
    ///
    /// Returns the number of models listed.
    pub async fn refresh(
        &self,
        http: &reqwest::Client,
        config: &OllamaConfig,
    ) -> Result<usize, RegistryError> {
        let response = http
            .get(config.url("/api/tags"))
            .timeout(config.probe_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RegistryError::Status(response.status()));
        }

        let body = response.text().await?;
        let tags: TagsResponse = serde_json::from_str(&body)?;
        let listed: HashSet<String> = tags.models.into_iter().map(|m| m.name).collect();
        let count = listed.len();

        debug!("Registry refreshed with {} models", count);
        *self.models.write().await = listed;

        Ok(count)
    }

    /// Check the cache for `name`. An untagged name matches its `:latest` tag.
    pub async fn is_installed(&self, name: &str) -> bool {
        let models = self.models.read().await;
        name_variants(name).iter().any(|n| models.contains(n))
    }

    /// Record that `name` is now present on the server.
    pub async fn mark_installed(&self, name: &str) {
        self.models.write().await.insert(canonical_name(name));
    }

    /// Sorted snapshot of the cached names.
    pub async fn installed(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.read().await.iter().cloned().collect();
        names.sort();
        names
    }
}

/// `llama2` -> `llama2:latest`; tagged names are left alone.
fn canonical_name(name: &str) -> String {
    if name.contains(':') {
        name.to_string()
    } else {
        format!("{}{}", name, LATEST_TAG)
    }
}

fn name_variants(name: &str) -> Vec<String> {
    let mut variants = vec![name.to_string(), canonical_name(name)];
    if let Some(base) = name.strip_suffix(LATEST_TAG) {
        variants.push(base.to_string());
    }
    variants
}
