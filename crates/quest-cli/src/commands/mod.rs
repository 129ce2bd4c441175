//! CLI commands.

pub mod ask;
pub mod info;
pub mod model;
pub mod play;
