//! Developer tooling: read-only session inspection.
//!
//! # Invariants
//! - Tools never mutate the session.

mod inspector;

pub use inspector::{FishInfo, ObstacleInfo, SessionInspector, SessionSummary};

pub fn crate_info() -> &'static str {
    "angler-tools v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
