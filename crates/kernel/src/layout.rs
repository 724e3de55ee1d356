//! Rejection-sampling placement of obstacles and fish.
//!
//! Candidates are drawn on the integer grid inside
//! `[-spawn_fraction * half_extent, +spawn_fraction * half_extent)` and
//! redrawn while they violate a spacing constraint. Every placed entity gets
//! at most `max_attempts` draws; running out is a configuration error.

use angler_common::{EntityId, planar_distance};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

use crate::config::{FishTuning, LayoutConfig};
use crate::error::SetupError;
use crate::fish::Fish;
use crate::obstacle::Obstacle;

fn grid_candidate<R: Rng + ?Sized>(rng: &mut R, layout: &LayoutConfig) -> (f32, f32) {
    let bound = spawn_bound(layout);
    let x = rng.gen_range(-bound..bound);
    let z = rng.gen_range(-bound..bound);
    (x as f32, z as f32)
}

/// Half width of the candidate grid in whole cells.
///
/// The bound is floored, so candidates always sit on integer coordinates,
/// including when `spawn_fraction * map_half_extent` is not a whole number.
pub fn spawn_bound(layout: &LayoutConfig) -> i32 {
    (layout.spawn_fraction * layout.map_half_extent).floor() as i32
}

/// Place `islands` islands followed by `shipwrecks` shipwrecks.
///
/// Accepted obstacles are more than `min_separation` apart and at least
/// `no_spawn_radius` from `boat_start`.
pub fn place_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    layout: &LayoutConfig,
    boat_start: Vec3,
) -> Result<Vec<Obstacle>, SetupError> {
    let requested = layout.islands + layout.shipwrecks;
    let mut placed: Vec<Obstacle> = Vec::with_capacity(requested);

    while placed.len() < requested {
        let mut attempts = 0;
        let position = loop {
            if attempts == layout.max_attempts {
                return Err(SetupError::PlacementExhausted {
                    what: "obstacles",
                    placed: placed.len(),
                    requested,
                    attempts,
                });
            }
            attempts += 1;

            let (x, z) = grid_candidate(rng, layout);
            let candidate = Vec3::new(x, layout.obstacle_height, z);
            if planar_distance(candidate, boat_start) < layout.no_spawn_radius {
                continue;
            }
            if placed
                .iter()
                .any(|o| planar_distance(o.position(), candidate) <= layout.min_separation)
            {
                continue;
            }
            break candidate;
        };

        // Yaw range spans three turns; only the angle mod 2π is visible.
        let yaw = rng.gen_range(0.0..6.0 * PI);
        let obstacle = if placed.len() < layout.islands {
            Obstacle::island(position, yaw, layout.obstacle_radius)
        } else {
            Obstacle::shipwreck(position, yaw, layout.obstacle_radius)
        };
        tracing::trace!(kind = obstacle.label(), x = position.x, z = position.z, attempts, "placed obstacle");
        placed.push(obstacle);
    }

    tracing::debug!(
        islands = layout.islands,
        shipwrecks = layout.shipwrecks,
        "obstacle layout generated"
    );
    Ok(placed)
}

/// Place a single fish clear of `avoid` and of every obstacle.
///
/// Fish are not spaced against each other.
pub fn place_one_fish<R: Rng + ?Sized>(
    rng: &mut R,
    id: EntityId,
    layout: &LayoutConfig,
    tuning: &FishTuning,
    avoid: Vec3,
    obstacles: &[Obstacle],
) -> Result<Fish, SetupError> {
    for _ in 0..layout.max_attempts {
        let (x, z) = grid_candidate(rng, layout);
        let candidate = Vec3::new(x, tuning.water_level, z);
        if planar_distance(candidate, avoid) < layout.no_spawn_radius {
            continue;
        }
        if obstacles
            .iter()
            .any(|o| planar_distance(o.position(), candidate) < layout.fish_clearance)
        {
            continue;
        }
        let heading = rng.gen_range(0.0..2.0 * PI);
        let size = Fish::roll_size(rng, tuning);
        return Ok(Fish::new(id, candidate, heading, size));
    }
    Err(SetupError::PlacementExhausted {
        what: "fish",
        placed: 0,
        requested: 1,
        attempts: layout.max_attempts,
    })
}

/// Place `count` fish, taking ids from `next_id`.
pub fn place_fish<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    layout: &LayoutConfig,
    tuning: &FishTuning,
    avoid: Vec3,
    obstacles: &[Obstacle],
    mut next_id: impl FnMut() -> EntityId,
) -> Result<Vec<Fish>, SetupError> {
    let mut fish = Vec::with_capacity(count);
    for placed in 0..count {
        let one = place_one_fish(rng, next_id(), layout, tuning, avoid, obstacles).map_err(
            |_| SetupError::PlacementExhausted {
                what: "fish",
                placed,
                requested: count,
                attempts: layout.max_attempts,
            },
        )?;
        fish.push(one);
    }
    Ok(fish)
}
