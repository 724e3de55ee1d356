use angler_common::{ViewMode, heading_vector};
use angler_kernel::Boat;
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("degenerate {mode} camera: view matrix is not finite")]
    DegenerateCamera { mode: ViewMode },
}

/// Placement and smoothing of each camera mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance behind the boat of the chase eye.
    pub chase_distance: f32,
    /// Distance behind the boat of the chase look-at point.
    pub chase_look_ahead: f32,
    pub chase_height: f32,
    /// Per-frame interpolation factor toward the desired view.
    pub chase_smoothing: f32,
    pub top_height: f32,
    /// Southward offset of the top-down eye so the view has a defined up.
    pub top_offset: f32,
    pub top_smoothing: f32,
    pub free_smoothing: f32,
    /// Free camera travel per movement intent.
    pub free_glide_step: f32,
    /// Free camera turn per rotate intent, in radians.
    pub free_turn_step: f32,
    pub initial_eye: Vec3,
    pub initial_target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            chase_distance: 15.0,
            chase_look_ahead: 3.0,
            chase_height: 5.0,
            chase_smoothing: 0.1,
            top_height: 40.0,
            top_offset: 10.0,
            top_smoothing: 0.025,
            free_smoothing: 1.0,
            free_glide_step: 0.5,
            free_turn_step: 0.05,
            initial_eye: Vec3::new(0.0, 25.0, 15.0),
            initial_target: Vec3::ZERO,
        }
    }
}

/// Detached camera for the free view.
///
/// It glides over the water along its heading and turns about +Y, with the
/// same heading convention as the boat. The downward tilt is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeCamera {
    pub position: Vec3,
    pub heading: f32,
    /// Angle below the horizon, in radians.
    pub tilt: f32,
}

impl FreeCamera {
    /// Pose looking from `eye` toward `target`.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = target - eye;
        let planar = Vec2::new(offset.x, offset.z).length();
        Self {
            position: eye,
            heading: (-offset.z).atan2(offset.x),
            tilt: (-offset.y).atan2(planar),
        }
    }

    pub fn look_direction(&self) -> Vec3 {
        heading_vector(self.heading) * self.tilt.cos() - Vec3::Y * self.tilt.sin()
    }

    /// Move `distance` along the heading, keeping the height.
    pub fn glide(&mut self, distance: f32) {
        self.position += heading_vector(self.heading) * distance;
    }

    /// Turn counter-clockwise seen from above by `angle` radians.
    pub fn turn(&mut self, angle: f32) {
        self.heading = (self.heading + angle).rem_euclid(TAU);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.look_direction(), Vec3::Y)
    }
}

/// Smoothed camera that eases toward a per-mode desired view each frame.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    view: Mat4,
    free: FreeCamera,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let view = Mat4::look_at_rh(config.initial_eye, config.initial_target, Vec3::Y);
        let free = FreeCamera::looking_at(config.initial_eye, config.initial_target);
        Self { config, view, free }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Current view matrix.
    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn free(&self) -> &FreeCamera {
        &self.free
    }

    /// Glide the free camera one step forward (`direction` 1) or back (-1).
    pub fn glide_free(&mut self, direction: f32) {
        self.free.glide(direction * self.config.free_glide_step);
    }

    /// Turn the free camera one step left (`direction` 1) or right (-1).
    pub fn turn_free(&mut self, direction: f32) {
        self.free.turn(direction * self.config.free_turn_step);
    }

    pub fn smoothing(&self, mode: ViewMode) -> f32 {
        match mode {
            ViewMode::Chase => self.config.chase_smoothing,
            ViewMode::TopDown => self.config.top_smoothing,
            ViewMode::Free => self.config.free_smoothing,
        }
    }

    /// View the camera is easing toward for `mode`.
    pub fn desired(&self, mode: ViewMode, boat: &Boat) -> Result<Mat4, RenderError> {
        let c = &self.config;
        let view = match mode {
            ViewMode::Chase => {
                let behind = -boat.forward();
                let lift = Vec3::Y * c.chase_height;
                let eye = boat.position + behind * c.chase_distance + lift;
                let target = boat.position + behind * c.chase_look_ahead + lift;
                Mat4::look_at_rh(eye, target, Vec3::Y)
            }
            ViewMode::TopDown => {
                let eye = boat.position + Vec3::new(0.0, c.top_height, c.top_offset);
                Mat4::look_at_rh(eye, boat.position, Vec3::Y)
            }
            ViewMode::Free => self.free.view_matrix(),
        };
        if view.is_finite() {
            Ok(view)
        } else {
            Err(RenderError::DegenerateCamera { mode })
        }
    }

    /// Ease one frame toward the desired view and return the new view.
    ///
    /// On error the current view is left untouched.
    pub fn update(&mut self, mode: ViewMode, boat: &Boat) -> Result<Mat4, RenderError> {
        let desired = self.desired(mode, boat)?;
        let t = self.smoothing(mode);
        let current = self.view;
        let next = if t >= 1.0 {
            desired
        } else {
            Mat4::from_cols(
                current.x_axis.lerp(desired.x_axis, t),
                current.y_axis.lerp(desired.y_axis, t),
                current.z_axis.lerp(desired.z_axis, t),
                current.w_axis.lerp(desired.w_axis, t),
            )
        };
        if !next.is_finite() {
            return Err(RenderError::DegenerateCamera { mode });
        }
        self.view = next;
        Ok(next)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angler_kernel::BoatTuning;
    use std::f32::consts::FRAC_PI_2;

    fn boat() -> Boat {
        Boat::new(&BoatTuning::default())
    }

    fn eye_of(view: Mat4) -> Vec3 {
        view.inverse().transform_point3(Vec3::ZERO)
    }

    #[test]
    fn starts_at_initial_view() {
        let rig = CameraRig::default();
        assert!(eye_of(rig.view()).abs_diff_eq(Vec3::new(0.0, 25.0, 15.0), 1e-4));
    }

    #[test]
    fn chase_eye_sits_behind_boat() {
        let rig = CameraRig::default();
        let boat = boat();
        let desired = rig.desired(ViewMode::Chase, &boat).unwrap();
        let expected = boat.position + Vec3::new(0.0, 5.0, 15.0);
        assert!(eye_of(desired).abs_diff_eq(expected, 1e-3));
    }

    #[test]
    fn update_moves_a_fraction_of_the_way() {
        let mut rig = CameraRig::default();
        let boat = boat();
        let start = rig.view();
        let desired = rig.desired(ViewMode::Chase, &boat).unwrap();
        let next = rig.update(ViewMode::Chase, &boat).unwrap();
        let expected = start.w_axis.lerp(desired.w_axis, 0.1);
        assert!(next.w_axis.abs_diff_eq(expected, 1e-5));
        assert_eq!(rig.view(), next);
    }

    #[test]
    fn repeated_updates_converge() {
        let mut rig = CameraRig::default();
        let boat = boat();
        for _ in 0..800 {
            rig.update(ViewMode::TopDown, &boat).unwrap();
        }
        let desired = rig.desired(ViewMode::TopDown, &boat).unwrap();
        assert!(rig.view().abs_diff_eq(desired, 1e-3));
    }

    #[test]
    fn top_down_eases_slower_than_chase() {
        let rig = CameraRig::default();
        assert!(rig.smoothing(ViewMode::TopDown) < rig.smoothing(ViewMode::Chase));
    }

    #[test]
    fn degenerate_view_leaves_camera_unchanged() {
        let mut rig = CameraRig::default();
        let mut boat = boat();
        boat.position = Vec3::new(f32::NAN, 0.0, 0.0);
        let before = rig.view();
        let err = rig.update(ViewMode::Chase, &boat).unwrap_err();
        assert_eq!(err, RenderError::DegenerateCamera { mode: ViewMode::Chase });
        assert_eq!(rig.view(), before);
    }

    #[test]
    fn free_view_follows_glides_and_turns() {
        let mut rig = CameraRig::default();
        let start = rig.free().position;
        rig.glide_free(1.0);
        rig.glide_free(1.0);
        // Initial pose faces -Z.
        assert!(rig.free().position.abs_diff_eq(start + Vec3::new(0.0, 0.0, -1.0), 1e-5));

        rig.turn_free(-1.0);
        assert!(rig.free().heading < FRAC_PI_2);

        let view = rig.update(ViewMode::Free, &boat()).unwrap();
        assert_eq!(view, rig.free().view_matrix());
    }

    #[test]
    fn free_camera_starts_on_initial_view() {
        let rig = CameraRig::default();
        let eye = eye_of(rig.free().view_matrix());
        assert!(eye.abs_diff_eq(Vec3::new(0.0, 25.0, 15.0), 1e-4));
        let dir = rig.free().look_direction();
        assert!(dir.abs_diff_eq(Vec3::new(0.0, -25.0, -15.0).normalize(), 1e-5));
    }
}
