use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::error::ConfigError;

/// Complete simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub boat: BoatTuning,
    pub layout: LayoutConfig,
    pub fish: FishTuning,
    pub session: SessionTuning,
}

/// Boat kinematics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoatTuning {
    pub start_position: Vec3,
    /// Heading in radians about +Y; π/2 faces −Z, toward the map centre.
    pub start_heading: f32,
    pub max_speed: f32,
    /// Speed change per accelerate/decelerate intent.
    pub speed_step: f32,
    pub radius: f32,
    /// Heading change per rotate intent when stationary.
    pub base_turn_rate: f32,
    /// Turn rate multiplier at full speed; turn rate is
    /// `base_turn_rate * turn_decay^(|speed| / max_speed)`.
    pub turn_decay: f32,
}

impl Default for BoatTuning {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 0.18, 15.0),
            start_heading: FRAC_PI_2,
            max_speed: 0.05,
            speed_step: 0.001,
            radius: 0.5,
            base_turn_rate: 0.01,
            turn_decay: 0.6,
        }
    }
}

/// Spatial layout of obstacles and fish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub map_half_extent: f32,
    /// Fraction of the half extent that candidate positions are drawn from.
    pub spawn_fraction: f32,
    pub islands: usize,
    pub shipwrecks: usize,
    pub obstacle_radius: f32,
    pub obstacle_height: f32,
    /// Minimum planar distance between any two obstacles.
    pub min_separation: f32,
    /// Nothing spawns within this distance of the boat.
    pub no_spawn_radius: f32,
    pub fish_count: usize,
    /// Minimum planar distance between a fish spawn and any obstacle.
    pub fish_clearance: f32,
    /// Candidate draws allowed per placed entity before giving up.
    pub max_attempts: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            map_half_extent: 30.0,
            spawn_fraction: 0.9,
            islands: 8,
            shipwrecks: 8,
            obstacle_radius: 1.0,
            obstacle_height: 0.8,
            min_separation: 8.0,
            no_spawn_radius: 6.0,
            fish_count: 10,
            fish_clearance: 2.0,
            max_attempts: 10_000,
        }
    }
}

/// Fish behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishTuning {
    pub fishing_radius: f32,
    /// Seconds a size-1.0 fish must stay hooked before it is caught.
    pub bite_time: f64,
    /// Seconds after a lost bite before the fish may bite again.
    pub rebite_delay: f64,
    pub min_size: f32,
    pub max_size: f32,
    /// Sizes drawn at or above this become trophies.
    pub trophy_threshold: f32,
    pub trophy_size: f32,
    /// Swim speed range, multiplied by size.
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_reorient_secs: f64,
    pub max_reorient_secs: f64,
    pub points_per_size: f32,
    pub water_level: f32,
}

impl Default for FishTuning {
    fn default() -> Self {
        Self {
            fishing_radius: 3.0,
            bite_time: 3.0,
            rebite_delay: 0.1,
            min_size: 0.5,
            max_size: 1.0,
            trophy_threshold: 0.95,
            trophy_size: 1.5,
            min_speed: 0.01,
            max_speed: 0.06,
            min_reorient_secs: 1.0,
            max_reorient_secs: 6.0,
            points_per_size: 50.0,
            water_level: 0.0,
        }
    }
}

/// Session rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    pub starting_lives: u32,
    /// Frame length at which one frame moves an entity by exactly its speed.
    pub nominal_frame_secs: f64,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            nominal_frame_secs: 1.0 / 60.0,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("must be non-negative, got {value}")))
    }
}

fn ordered(field: &'static str, low: f64, high: f64) -> Result<(), ConfigError> {
    if low < high {
        Ok(())
    } else {
        Err(ConfigError::new(field, format!("empty range [{low}, {high})")))
    }
}

impl GameConfig {
    /// Reject configurations that cannot produce a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.boat;
        positive("boat.max_speed", b.max_speed.into())?;
        positive("boat.speed_step", b.speed_step.into())?;
        non_negative("boat.radius", b.radius.into())?;
        non_negative("boat.base_turn_rate", b.base_turn_rate.into())?;
        positive("boat.turn_decay", b.turn_decay.into())?;
        if !b.start_position.is_finite() || !b.start_heading.is_finite() {
            return Err(ConfigError::new("boat.start_position", "must be finite"));
        }

        let l = &self.layout;
        positive("layout.map_half_extent", l.map_half_extent.into())?;
        if !(l.spawn_fraction > 0.0 && l.spawn_fraction <= 1.0) {
            return Err(ConfigError::new(
                "layout.spawn_fraction",
                format!("must be in (0, 1], got {}", l.spawn_fraction),
            ));
        }
        if crate::layout::spawn_bound(l) < 1 {
            return Err(ConfigError::new(
                "layout.spawn_fraction",
                "spawn area is smaller than one grid cell",
            ));
        }
        non_negative("layout.obstacle_radius", l.obstacle_radius.into())?;
        non_negative("layout.min_separation", l.min_separation.into())?;
        non_negative("layout.no_spawn_radius", l.no_spawn_radius.into())?;
        non_negative("layout.fish_clearance", l.fish_clearance.into())?;
        if l.fish_count == 0 {
            return Err(ConfigError::new("layout.fish_count", "must be at least 1"));
        }
        if l.max_attempts == 0 {
            return Err(ConfigError::new("layout.max_attempts", "must be at least 1"));
        }

        let f = &self.fish;
        non_negative("fish.fishing_radius", f.fishing_radius.into())?;
        positive("fish.bite_time", f.bite_time)?;
        non_negative("fish.rebite_delay", f.rebite_delay)?;
        positive("fish.min_size", f.min_size.into())?;
        ordered("fish.size", f.min_size.into(), f.max_size.into())?;
        positive("fish.trophy_size", f.trophy_size.into())?;
        non_negative("fish.min_speed", f.min_speed.into())?;
        ordered("fish.speed", f.min_speed.into(), f.max_speed.into())?;
        positive("fish.min_reorient_secs", f.min_reorient_secs)?;
        ordered("fish.reorient_secs", f.min_reorient_secs, f.max_reorient_secs)?;
        non_negative("fish.points_per_size", f.points_per_size.into())?;

        let s = &self.session;
        if s.starting_lives == 0 {
            return Err(ConfigError::new("session.starting_lives", "must be at least 1"));
        }
        positive("session.nominal_frame_secs", s.nominal_frame_secs)?;
        Ok(())
    }
}
