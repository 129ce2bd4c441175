//! Background turns and the events they report.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use quest_ollama::Generator;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::prompt::game_master_prompt;

/// Identifier of one player submission.
pub type TurnId = u64;

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarratorEvent {
    pub turn: TurnId,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The turn was accepted and is waiting on the model.
    Thinking,
    /// The model answered.
    Narration(String),
    /// The turn failed; the message is ready to show.
    Failed(String),
}

impl EventKind {
    /// Who the line is attributed to when displayed.
    pub fn speaker(&self) -> &'static str {
        match self {
            EventKind::Narration(_) => "Narrator",
            EventKind::Thinking | EventKind::Failed(_) => "System",
        }
    }

    fn text(&self) -> &str {
        match self {
            EventKind::Thinking => "Thinking...",
            EventKind::Narration(text) | EventKind::Failed(text) => text,
        }
    }
}

impl fmt::Display for NarratorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.speaker(), self.kind.text())
    }
}

/// Handle on a turn running in the background.
#[derive(Debug)]
pub struct Submission {
    turn: TurnId,
    handle: JoinHandle<()>,
}

impl Submission {
    pub fn turn(&self) -> TurnId {
        self.turn
    }

    /// Cancel the turn. A cancelled turn reports nothing further.
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Dispatches player lines to a [`Generator`] as game-master prompts.
pub struct Narrator {
    generator: Arc<dyn Generator>,
    model: String,
    events: mpsc::UnboundedSender<NarratorEvent>,
    next_turn: AtomicU64,
}

impl Narrator {
    /// Create a narrator and the receiving end of its event channel.
    pub fn new(
        generator: Arc<dyn Generator>,
        model: impl Into<String>,
    ) -> (Self, mpsc::UnboundedReceiver<NarratorEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let narrator = Self {
            generator,
            model: model.into(),
            events,
            next_turn: AtomicU64::new(1),
        };
        (narrator, rx)
    }

    /// Get the model turns are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Start a turn for `input`.
    ///
    /// Blank input is ignored. Must be called from within a tokio runtime.
    pub fn submit(&self, input: &str) -> Option<Submission> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let turn = self.next_turn.fetch_add(1, Ordering::Relaxed);
        self.emit(turn, EventKind::Thinking);

        let generator = Arc::clone(&self.generator);
        let events = self.events.clone();
        let model = self.model.clone();
        let prompt = game_master_prompt(input);

        debug!("Turn {} submitted to model {}", turn, model);
        let handle = tokio::spawn(async move {
            let kind = match generator.generate(&model, &prompt).await {
                Ok(text) => EventKind::Narration(text),
                Err(e) => EventKind::Failed(format!("Error: {}", e)),
            };
            // Receiver gone means the UI has shut down
            let _ = events.send(NarratorEvent { turn, kind });
        });

        Some(Submission { turn, handle })
    }

    fn emit(&self, turn: TurnId, kind: EventKind) {
        let _ = self.events.send(NarratorEvent { turn, kind });
    }
}
