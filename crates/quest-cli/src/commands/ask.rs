//! Ask command - one prompt, one answer.

use quest_narrator::game_master_prompt;
use quest_ollama::{OllamaClient, OllamaConfig};

pub(crate) async fn run(config: OllamaConfig, prompt: &str, raw: bool) -> miette::Result<()> {
    let client = OllamaClient::new(config);

    let prompt = if raw {
        prompt.to_string()
    } else {
        game_master_prompt(prompt)
    };

    let text = client
        .generate_default(&prompt)
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    println!("{}", text);
    Ok(())
}
