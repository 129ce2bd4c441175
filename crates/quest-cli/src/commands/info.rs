//! Info command - show the resolved configuration.

use quest_ollama::OllamaConfig;

pub(crate) fn run(config: &OllamaConfig) -> miette::Result<()> {
    println!("Quest");
    println!("=====");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Ollama:");
    println!("  Base URL:         {}", config.base_url);
    println!("  Binary:           {}", config.binary.display());
    println!("  Default model:    {}", config.default_model);
    println!("  Generate timeout: {}s", config.generate_timeout.as_secs());
    println!(
        "  Launch polling:   {} x {}ms",
        config.launch_attempts,
        config.launch_interval.as_millis()
    );
    println!();

    println!("Environment:");
    println!("  QUEST_OLLAMA_URL, QUEST_MODEL, QUEST_OLLAMA_BIN, QUEST_GENERATE_TIMEOUT");

    Ok(())
}
