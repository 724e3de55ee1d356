//! Shared types for the angler game core.
//!
//! Geometry lives on the horizontal XZ plane: Y is up and never takes part in
//! distance checks.

pub mod types;
pub mod view;

pub use types::{EntityId, Transform, heading_vector, planar_distance};
pub use view::{ParseViewModeError, ViewMode};
