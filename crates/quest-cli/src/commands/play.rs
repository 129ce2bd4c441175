//! Play command - interactive narration loop.

use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::Arc;

use quest_narrator::{EventKind, Narrator, NarratorEvent, Submission, TurnId};
use quest_ollama::{OllamaClient, OllamaConfig};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

const QUIT: &str = "/quit";

pub(crate) async fn run(config: OllamaConfig, stop_server: bool) -> miette::Result<()> {
    let client = Arc::new(OllamaClient::new(config));
    let model = client.default_model().to_string();

    println!("Preparing the story with model '{}'...", model);
    if let Err(e) = client.setup().await {
        // Each turn retries the launch and pull on its own
        println!("System: Error: {}", e);
    }

    let (narrator, events) = Narrator::new(client.clone(), model);

    println!();
    println!("Welcome, adventurer. Say what you do; type {} to leave.", QUIT);
    println!();

    let input = BufReader::new(tokio::io::stdin());
    let mut out = io::stdout();
    play_session(&narrator, events, input, &mut out)
        .await
        .map_err(|e| miette::miette!("Failed to run session: {}", e))?;

    if stop_server {
        client.server().shutdown().await;
    }

    Ok(())
}

/// Feed `input` lines to the narrator and print its events to `out`.
///
/// End of input stops reading but waits for turns already submitted.
/// `/quit` cancels them.
pub(crate) async fn play_session<R, W>(
    narrator: &Narrator,
    mut events: UnboundedReceiver<NarratorEvent>,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut reading = true;
    let mut turns: Vec<Submission> = Vec::new();
    let mut pending: HashSet<TurnId> = HashSet::new();

    loop {
        if !reading && pending.is_empty() {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if reading => {
                let Some(line) = line? else {
                    reading = false;
                    continue;
                };
                let line = line.trim();
                if line == QUIT {
                    for turn in &turns {
                        turn.abort();
                    }
                    break;
                }
                if line.is_empty() {
                    continue;
                }

                writeln!(out, "You: {}", line)?;
                turns.retain(|turn| !turn.is_finished());
                if let Some(submission) = narrator.submit(line) {
                    pending.insert(submission.turn());
                    turns.push(submission);
                }
            }
            Some(event) = events.recv() => {
                writeln!(out, "{}", event)?;
                if !matches!(event.kind, EventKind::Thinking) {
                    pending.remove(&event.turn);
                }
            }
        }
        out.flush()?;
    }

    Ok(())
}
