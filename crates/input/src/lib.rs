//! Input: edge-triggered key events mapped to named intents.
//!
//! # Invariants
//! - The simulation consumes intents, never raw key names.
//! - Intents are discrete events; nothing here polls held keys.

pub mod bindings;
pub mod intent;

pub use bindings::{InputError, KeyBindings};
pub use intent::Intent;

pub fn crate_info() -> &'static str {
    "angler-input v0.1.0"
}
