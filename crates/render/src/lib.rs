//! Rendering adapter: the core's view of an external scene-graph renderer.
//!
//! # Invariants
//! - The renderer cannot mutate session state.
//! - Draw calls derive from session state, the camera rig and asset readiness.
//! - An asset that is not ready skips its draw; the frame still completes.

mod camera;
mod palette;
mod renderer;
mod scene;

pub use camera::{CameraConfig, CameraRig, FreeCamera, RenderError};
pub use palette::{CATCH_METER_STEPS, Gradient, catch_meter, fish_color};
pub use renderer::{DrawCommand, Material, RecordingRenderer, Renderer, Shape};
pub use scene::{FrameStats, emit_scene};

pub fn crate_info() -> &'static str {
    "angler-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
