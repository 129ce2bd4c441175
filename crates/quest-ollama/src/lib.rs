//! Client for a locally running Ollama inference server.
//!
//! The client owns everything needed to turn a prompt into text without the
//! caller caring whether the server is up or the model is pulled:
//!
//! ```text
//! ┌──────────────┐  not live   ┌──────────────┐  poll   ┌──────────────┐
//! │ OllamaClient │ ──────────> │ OllamaServer │ ──────> │  /api/tags   │
//! │  ::generate  │             │ (serve)      │         └──────────────┘
//! └──────┬───────┘             └──────────────┘
//!        │ model missing      ┌────────────────┐        ┌──────────────┐
//!        └──────────────────> │ ModelInstaller │ ─────> │ ModelRegistry│
//!                             │ (pull <model>) │        │  (RwLock)    │
//!                             └────────────────┘        └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use quest_ollama::{OllamaClient, OllamaConfig};
//!
//! let client = OllamaClient::new(OllamaConfig::from_env())?;
//! let text = client.generate("llama2", "Describe the cave entrance.").await?;
//! ```

mod api;
mod client;
mod config;
mod error;
mod installer;
mod registry;
mod server;

#[cfg(test)]
mod testing;

pub use api::{GenerateRequest, GenerateResponse, ModelTag, TagsResponse};
pub use client::{Generator, OllamaClient};
pub use config::{OllamaConfig, OllamaConfigBuilder};
pub use error::{GenerateError, InstallError, LaunchError, RegistryError};
pub use installer::ModelInstaller;
pub use registry::ModelRegistry;
pub use server::OllamaServer;

/// Default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model used for narration.
pub const DEFAULT_MODEL: &str = "llama2";

/// Default name of the server binary, resolved through `PATH`.
pub const DEFAULT_OLLAMA_BINARY: &str = "ollama";
