//! Frame orchestration: one `frame` call per rendered frame.
//!
//! # Invariants
//! - Input never mutates the session directly; key presses queue intents that
//!   are applied at the start of the next frame.
//! - A camera failure is logged and skipped; it never fails the frame.

mod config;
mod orchestrator;

pub use config::AnglerConfig;
pub use orchestrator::{FrameReport, Game};

/// Errors from building or running a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Input(#[from] angler_input::InputError),
    #[error(transparent)]
    Setup(#[from] angler_kernel::SetupError),
}

pub fn crate_info() -> &'static str {
    "angler-game v0.1.0"
}
