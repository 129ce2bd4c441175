//! Error types for talking to the inference server.

use std::process::ExitStatus;

use thiserror::Error;

/// The server could not be confirmed live.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The server binary could not be started.
    #[error("failed to start Ollama: {0}")]
    Spawn(#[source] std::io::Error),

    /// The server was started but never answered the liveness probe.
    #[error("timeout waiting for Ollama to start after {attempts} attempts")]
    Timeout { attempts: u32 },
}

/// Listing installed models failed.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("model listing returned {0}")]
    Status(reqwest::StatusCode),

    /// The listing body was not the expected JSON.
    #[error("failed to decode model listing: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Pulling a model failed.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The pull subprocess could not be started.
    #[error("failed to run pull for model '{model}': {source}")]
    Spawn {
        model: String,
        #[source]
        source: std::io::Error,
    },

    /// The pull subprocess exited unsuccessfully.
    #[error("failed to install model '{model}': pull exited with {status}")]
    Exit { model: String, status: ExitStatus },
}

/// Errors surfaced by [`crate::OllamaClient::generate`].
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Server not running and could not be started.
    #[error("Ollama unavailable: {0}")]
    Unavailable(#[from] LaunchError),

    /// Installed models could not be listed.
    #[error("failed to initialize models: {0}")]
    Registry(#[from] RegistryError),

    /// Model was missing and pulling it failed.
    #[error("model '{model}' is not installed: {source}")]
    NotInstalled {
        model: String,
        #[source]
        source: InstallError,
    },

    /// Network failure while the request was in flight.
    #[error("Ollama API error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server reported an error, or produced no text.
    #[error("API error: {0}")]
    Server(String),
}
