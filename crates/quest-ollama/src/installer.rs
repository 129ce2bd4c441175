//! Pulling models through the server binary.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use tokio::process::Command;
use tracing::info;

use crate::error::InstallError;
use crate::registry::ModelRegistry;

/// Runs `<binary> pull <model>` and records successful pulls.
pub struct ModelInstaller {
    binary: PathBuf,
    registry: Arc<ModelRegistry>,
}

impl ModelInstaller {
    /// Create an installer that updates `registry` on success.
    pub fn new(binary: impl Into<PathBuf>, registry: Arc<ModelRegistry>) -> Self {
        Self {
            binary: binary.into(),
            registry,
        }
    }

    /// Pull `model`, waiting for the subprocess to exit.
    ///
    /// Nothing is recorded unless the pull exits successfully.
    pub async fn install(&self, model: &str) -> Result<(), InstallError> {
        info!("Installing model {}...", model);

        let status = Command::new(&self.binary)
            .arg("pull")
            .arg(model)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| InstallError::Spawn {
                model: model.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(InstallError::Exit {
                model: model.to_string(),
                status,
            });
        }

        self.registry.mark_installed(model).await;
        info!("Model {} installed successfully", model);

        Ok(())
    }
}
