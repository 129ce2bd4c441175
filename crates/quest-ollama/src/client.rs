//! Generate client: the single entry point callers need.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::api::{GenerateRequest, GenerateResponse};
use crate::config::OllamaConfig;
use crate::error::GenerateError;
use crate::installer::ModelInstaller;
use crate::registry::ModelRegistry;
use crate::server::OllamaServer;

/// Anything that can turn a prompt into text.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for `prompt` with `model`.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerateError>;
}

/// Ollama client that starts the server and pulls models on demand.
pub struct OllamaClient {
    http: reqwest::Client,
    config: OllamaConfig,
    server: OllamaServer,
    registry: Arc<ModelRegistry>,
    installer: ModelInstaller,
}

impl OllamaClient {
    /// Create a client with an empty model registry.
    pub fn new(config: OllamaConfig) -> Self {
        Self::with_registry(config, Arc::new(ModelRegistry::new()))
    }

    /// Create a client sharing an existing registry.
    pub fn with_registry(config: OllamaConfig, registry: Arc<ModelRegistry>) -> Self {
        let http = reqwest::Client::new();
        Self {
            server: OllamaServer::new(http.clone(), config.clone()),
            installer: ModelInstaller::new(config.binary.clone(), Arc::clone(&registry)),
            http,
            config,
            registry,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    /// Get the configured default model.
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    /// Get the server handle.
    pub fn server(&self) -> &OllamaServer {
        &self.server
    }

    /// Get the model registry.
    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Re-read the installed models from the server.
    pub async fn refresh_models(&self) -> Result<usize, GenerateError> {
        Ok(self.registry.refresh(&self.http, &self.config).await?)
    }

    /// Pull `model` through the server binary.
    pub async fn install_model(&self, model: &str) -> Result<(), GenerateError> {
        self.installer
            .install(model)
            .await
            .map_err(|source| GenerateError::NotInstalled {
                model: model.to_string(),
                source,
            })
    }

    /// Start the server if needed, load the registry and pull the default
    /// model if it is missing.
    pub async fn setup(&self) -> Result<(), GenerateError> {
        self.server.ensure_running().await?;
        self.refresh_models().await?;

        let model = self.default_model();
        if !self.registry.is_installed(model).await {
            self.install_model(model).await?;
        }

        Ok(())
    }

    /// Generate a completion with the default model.
    pub async fn generate_default(&self, prompt: &str) -> Result<String, GenerateError> {
        self.generate(self.default_model(), prompt).await
    }

    /// Generate a completion for `prompt`.
    ///
    /// Starts the server and pulls `model` first when needed. The request
    /// itself is made once; an empty answer is treated as a server error.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerateError> {
        self.server.ensure_running().await?;
        self.ensure_model(model).await?;

        let request = GenerateRequest::new(model, prompt);
        debug!("Sending generate request to model {}", model);

        let response = self
            .http
            .post(self.config.url("/api/generate"))
            .json(&request)
            .timeout(self.config.generate_timeout)
            .send()
            .await
            .map_err(GenerateError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(GenerateError::Transport)?;

        let response: GenerateResponse = match serde_json::from_str(&body) {
            Ok(response) => response,
            Err(_) if !status.is_success() => {
                return Err(GenerateError::Server(format!("{}: {}", status, body.trim())));
            }
            Err(e) => return Err(GenerateError::Decode(e)),
        };

        if let Some(error) = response.error_message() {
            return Err(GenerateError::Server(error.to_string()));
        }

        if !status.is_success() {
            return Err(GenerateError::Server(status.to_string()));
        }

        if response.response.is_empty() {
            return Err(GenerateError::Server("empty response from model".to_string()));
        }

        debug!("Received {} bytes from model {}", response.response.len(), model);
        Ok(response.response)
    }

    async fn ensure_model(&self, model: &str) -> Result<(), GenerateError> {
        if self.registry.is_installed(model).await {
            return Ok(());
        }

        // The cache may simply be cold
        match self.refresh_models().await {
            Ok(_) if self.registry.is_installed(model).await => return Ok(()),
            Ok(_) => {}
            Err(e) => warn!("Could not list installed models: {}", e),
        }

        info!("Model {} not installed, pulling it", model);
        self.install_model(model).await
    }
}

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerateError> {
        OllamaClient::generate(self, model, prompt).await
    }
}
