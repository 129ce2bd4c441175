//! # Quest Narrator
//!
//! Turns player input into game-master narration.
//!
//! Each submitted line becomes a *turn* that runs on its own tokio task. The
//! task never touches display state; it reports back through a channel that
//! the UI owner drains:
//!
//! ```text
//! player line ──> Narrator::submit ──> tokio task ──> Generator
//!                        │                               │
//!                        └── Thinking ──> events <── Narration / Failed
//! ```

mod narrator;
mod prompt;

pub use narrator::{EventKind, Narrator, NarratorEvent, Submission, TurnId};
pub use prompt::game_master_prompt;
