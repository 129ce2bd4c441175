//! Quest CLI - a text adventure narrated by a local Ollama model.

use clap::{Parser, Subcommand};
use quest_ollama::OllamaConfig;

mod commands;

/// Quest - a text adventure narrated by a local language model
#[derive(Parser)]
#[command(name = "quest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model to use instead of the configured default
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively: each line you type gets narrated
    Play {
        /// Stop the Ollama server on exit if this session started it
        #[arg(long)]
        stop_server: bool,
    },

    /// Send a single prompt and print the answer
    Ask {
        /// What the player says
        prompt: String,
        /// Send the prompt as-is, without the game-master framing
        #[arg(long)]
        raw: bool,
    },

    /// Check whether the server is up and the model is installed
    Status,

    /// List models installed on the server
    Models,

    /// Pull a model through the Ollama binary
    Pull {
        /// Model name (default: the configured model)
        name: Option<String>,
    },

    /// Show the resolved configuration
    Info,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "warn" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let mut config = OllamaConfig::from_env();
    if let Some(model) = cli.model {
        config.default_model = model;
    }

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| miette::miette!("Failed to start async runtime: {}", e))?;

    match cli.command {
        Commands::Play { stop_server } => {
            runtime.block_on(commands::play::run(config, stop_server))
        }
        Commands::Ask { prompt, raw } => {
            runtime.block_on(commands::ask::run(config, &prompt, raw))
        }
        Commands::Status => runtime.block_on(commands::model::status(config)),
        Commands::Models => runtime.block_on(commands::model::list(config)),
        Commands::Pull { name } => {
            runtime.block_on(commands::model::pull(config, name.as_deref()))
        }
        Commands::Info => commands::info::run(&config),
    }
}
