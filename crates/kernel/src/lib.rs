//! Game kernel: authoritative session state and per-frame simulation stepping.
//!
//! # Invariants
//! - All state mutations flow through explicit session operations.
//! - Randomness comes from one seeded RNG owned by the session, so a seed plus
//!   a sequence of operations reproduces the same session.
//! - Exactly `fish_count` fish are alive after every `advance`.

pub mod boat;
pub mod collision;
pub mod config;
pub mod error;
pub mod fish;
pub mod layout;
pub mod obstacle;
pub mod session;

pub use boat::Boat;
pub use collision::{Outcome, check_border, check_obstacles, check_proximity};
pub use config::{BoatTuning, FishTuning, GameConfig, LayoutConfig, SessionTuning};
pub use error::{ConfigError, SetupError};
pub use fish::{Fish, FishState, FishStep};
pub use obstacle::{Obstacle, ObstacleKind};
pub use session::{Phase, Session, SessionEvent};

pub fn crate_info() -> &'static str {
    "angler-kernel v0.1.0"
}
