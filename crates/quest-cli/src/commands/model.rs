//! Server and model management commands.

use quest_ollama::{OllamaClient, OllamaConfig};

/// Show whether the server is up and the default model is present.
pub(crate) async fn status(config: OllamaConfig) -> miette::Result<()> {
    let client = OllamaClient::new(config);
    let live = client.server().is_live().await;

    println!("Server:  {}", client.config().base_url);
    println!("  Live: {}", live);

    if !live {
        println!();
        println!("Start it with:");
        println!("  {} serve", client.config().binary.display());
        return Ok(());
    }

    client
        .refresh_models()
        .await
        .map_err(|e| miette::miette!("Failed to list models: {}", e))?;

    let model = client.default_model();
    println!("Model:   {}", model);
    println!("  Installed: {}", client.registry().is_installed(model).await);

    Ok(())
}

/// List installed models.
pub(crate) async fn list(config: OllamaConfig) -> miette::Result<()> {
    let client = OllamaClient::new(config);
    client
        .refresh_models()
        .await
        .map_err(|e| miette::miette!("Failed to list models: {}", e))?;

    let models = client.registry().installed().await;
    if models.is_empty() {
        println!("No models installed.");
        println!();
        println!("To install the default model, run:");
        println!("  quest pull");
        return Ok(());
    }

    println!("Installed models:");
    for model in models {
        println!("  - {}", model);
    }

    Ok(())
}

/// Pull a model, starting the server first if needed.
pub(crate) async fn pull(config: OllamaConfig, name: Option<&str>) -> miette::Result<()> {
    let client = OllamaClient::new(config);
    let model = name.unwrap_or(client.default_model()).to_string();

    client
        .server()
        .ensure_running()
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    println!("Pulling model: {}", model);
    println!("This may take a while depending on your connection...");

    client
        .install_model(&model)
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    println!("Model '{}' installed.", model);
    Ok(())
}
