//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::{DEFAULT_MODEL, DEFAULT_OLLAMA_BINARY, DEFAULT_OLLAMA_URL};

/// Configuration shared by every part of the client.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server base URL (default: http://localhost:11434)
    pub base_url: String,
    /// Model used when the caller does not name one
    pub default_model: String,
    /// Server binary used for `serve` and `pull`
    pub binary: PathBuf,
    /// Timeout for the liveness probe and model listing
    pub probe_timeout: Duration,
    /// Timeout for a single generate request
    pub generate_timeout: Duration,
    /// How many times to probe after starting the server
    pub launch_attempts: u32,
    /// Pause between launch probes
    pub launch_interval: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            binary: PathBuf::from(DEFAULT_OLLAMA_BINARY),
            probe_timeout: Duration::from_secs(2),
            // Large models can take a long time to answer the first prompt
            generate_timeout: Duration::from_secs(60),
            launch_attempts: 10,
            launch_interval: Duration::from_secs(1),
        }
    }
}

impl OllamaConfig {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("QUEST_OLLAMA_URL").unwrap_or(defaults.base_url);

        let default_model = std::env::var("QUEST_MODEL").unwrap_or(defaults.default_model);

        let binary = std::env::var("QUEST_OLLAMA_BIN")
            .map(PathBuf::from)
            .unwrap_or(defaults.binary);

        let generate_timeout = std::env::var("QUEST_GENERATE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.generate_timeout);

        Self {
            base_url,
            default_model,
            binary,
            generate_timeout,
            ..defaults
        }
    }

    /// Create a builder for configuration.
    pub fn builder() -> OllamaConfigBuilder {
        OllamaConfigBuilder::default()
    }

    /// Join an API path onto the base URL.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Builder for client configuration.
#[derive(Debug, Default)]
pub struct OllamaConfigBuilder {
    config: OllamaConfig,
}

impl OllamaConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    pub fn binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.config.binary = binary.into();
        self
    }

    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.config.probe_timeout = timeout;
        self
    }

    pub fn generate_timeout(mut self, timeout: Duration) -> Self {
        self.config.generate_timeout = timeout;
        self
    }

    pub fn launch_attempts(mut self, attempts: u32) -> Self {
        self.config.launch_attempts = attempts;
        self
    }

    pub fn launch_interval(mut self, interval: Duration) -> Self {
        self.config.launch_interval = interval;
        self
    }

    pub fn build(self) -> OllamaConfig {
        self.config
    }
}
