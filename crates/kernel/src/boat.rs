use angler_common::{Transform, heading_vector};
use glam::Vec3;

use crate::config::BoatTuning;

/// The player's boat. Speed is clamped to `[-max_speed, max_speed]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Boat {
    pub position: Vec3,
    /// Radians about +Y, accumulated from rotate intents.
    pub heading: f32,
    pub speed: f32,
    pub radius: f32,
}

impl Boat {
    /// A stationary boat at the configured start transform.
    pub fn new(tuning: &BoatTuning) -> Self {
        Self {
            position: tuning.start_position,
            heading: tuning.start_heading,
            speed: 0.0,
            radius: tuning.radius,
        }
    }

    pub fn accelerate(&mut self, tuning: &BoatTuning) {
        self.speed = (self.speed + tuning.speed_step).clamp(-tuning.max_speed, tuning.max_speed);
    }

    pub fn decelerate(&mut self, tuning: &BoatTuning) {
        self.speed = (self.speed - tuning.speed_step).clamp(-tuning.max_speed, tuning.max_speed);
    }

    /// Heading change applied by one rotate intent at the current speed.
    /// Turning is sharpest when stationary and decays toward full speed.
    pub fn turn_rate(&self, tuning: &BoatTuning) -> f32 {
        tuning.base_turn_rate * tuning.turn_decay.powf((self.speed / tuning.max_speed).abs())
    }

    pub fn rotate_left(&mut self, tuning: &BoatTuning) {
        self.heading += self.turn_rate(tuning);
    }

    pub fn rotate_right(&mut self, tuning: &BoatTuning) {
        self.heading -= self.turn_rate(tuning);
    }

    pub fn forward(&self) -> Vec3 {
        heading_vector(self.heading)
    }

    /// Move along the heading. `frames` is elapsed time in nominal frames.
    pub fn advance(&mut self, frames: f32) {
        self.position += self.forward() * self.speed * frames;
    }

    pub fn stop(&mut self) {
        self.speed = 0.0;
    }

    /// Speed as a signed percentage of `max_speed`.
    pub fn speed_percent(&self, tuning: &BoatTuning) -> f32 {
        100.0 * self.speed / tuning.max_speed
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position_yaw(self.position, self.heading)
    }
}
