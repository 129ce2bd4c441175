//! Liveness probing and launching of the Ollama server process.

use std::process::Stdio;

use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::OllamaConfig;
use crate::error::LaunchError;

/// Handle on the inference server: probes it and starts it when needed.
///
/// A server started by this handle keeps running after the handle is dropped.
/// Call [`shutdown`](Self::shutdown) to stop it explicitly.
pub struct OllamaServer {
    http: reqwest::Client,
    config: OllamaConfig,
    process: Mutex<Option<Child>>,
}

impl OllamaServer {
    /// Create a server handle.
    pub fn new(http: reqwest::Client, config: OllamaConfig) -> Self {
        Self {
            http,
            config,
            process: Mutex::new(None),
        }
    }

    /// Get the base URL being probed.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Check whether the server answers the tags endpoint.
    ///
    /// Any transport error, timeout or non-success status counts as not live.
    pub async fn is_live(&self) -> bool {
        let result = self
            .http
            .get(self.config.url("/api/tags"))
            .timeout(self.config.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Liveness probe failed: {}", e);
                false
            }
        }
    }

    /// Make sure the server is live, starting `<binary> serve` if it is not.
    pub async fn ensure_running(&self) -> Result<(), LaunchError> {
        if self.is_live().await {
            return Ok(());
        }

        info!("Ollama is not running. Starting Ollama server...");
        self.spawn_if_needed().await?;

        let attempts = self.config.launch_attempts;
        for attempt in 1..=attempts {
            if self.is_live().await {
                info!("Ollama is ready at {}", self.config.base_url);
                return Ok(());
            }
            debug!("Ollama not ready yet (attempt {}/{})", attempt, attempts);
            sleep(self.config.launch_interval).await;
        }

        warn!("Ollama did not come up after {} attempts", attempts);
        Err(LaunchError::Timeout { attempts })
    }

    /// Whether a server process started by this handle is still running.
    pub async fn owns_running_process(&self) -> bool {
        let mut process = self.process.lock().await;
        still_running(&mut process)
    }

    /// Stop a server process started by this handle. No-op otherwise.
    pub async fn shutdown(&self) {
        let Some(mut child) = self.process.lock().await.take() else {
            return;
        };

        info!("Stopping Ollama (PID: {:?})", child.id());
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Ollama already exited with status: {:?}", status);
            }
            _ => {
                // Sends the kill and waits for the process to exit
                if let Err(e) = child.kill().await {
                    warn!("Failed to stop Ollama: {}", e);
                }
            }
        }
    }

    async fn spawn_if_needed(&self) -> Result<(), LaunchError> {
        let mut process = self.process.lock().await;

        // A previous launch may still be starting up
        if still_running(&mut process) {
            debug!("Ollama process already started, waiting for it");
            return Ok(());
        }

        let child = Command::new(&self.config.binary)
            .arg("serve")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(LaunchError::Spawn)?;

        debug!("Ollama process started with PID: {:?}", child.id());
        *process = Some(child);

        Ok(())
    }
}

/// Reap the child if it has exited; true while it is still running.
fn still_running(process: &mut Option<Child>) -> bool {
    let running = match process.as_mut().map(Child::try_wait) {
        Some(Ok(None)) => true,
        Some(Ok(Some(_))) | Some(Err(_)) | None => false,
    };
    if !running {
        *process = None;
    }
    running
}
