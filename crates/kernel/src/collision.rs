//! Bounding-circle collision on the XZ plane.
//!
//! Vertical separation never matters. Two circles overlap when the planar
//! distance between their centres is strictly less than the sum of radii.

use angler_common::planar_distance;
use glam::Vec3;

use crate::obstacle::{Obstacle, ObstacleKind};

/// Lives lost when the boat touches an island.
pub const ISLAND_SEVERITY: u32 = 3;
/// Lives lost when the boat sinks a shipwreck.
pub const SHIPWRECK_SEVERITY: u32 = 1;

/// Result of a collision query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoHit,
    /// Outside the playable square.
    BorderHit,
    IslandHit { index: usize },
    /// `fresh` is false when the shipwreck was already sunk.
    ShipwreckHit { index: usize, fresh: bool },
}

impl Outcome {
    /// Lives this outcome costs the boat.
    pub fn life_cost(self) -> u32 {
        match self {
            Outcome::IslandHit { .. } => ISLAND_SEVERITY,
            Outcome::ShipwreckHit { fresh: true, .. } => SHIPWRECK_SEVERITY,
            Outcome::ShipwreckHit { fresh: false, .. } | Outcome::BorderHit | Outcome::NoHit => 0,
        }
    }

    pub fn is_hit(self) -> bool {
        !matches!(self, Outcome::NoHit)
    }
}

/// `true` when `position` lies outside the square `[-half_extent, half_extent]`.
pub fn check_border(position: Vec3, half_extent: f32) -> bool {
    position.x.abs() > half_extent || position.z.abs() > half_extent
}

pub fn check_proximity(a: Vec3, a_radius: f32, b: Vec3, b_radius: f32) -> bool {
    planar_distance(a, b) < a_radius + b_radius
}

/// First obstacle, in placement order, overlapping the circle.
///
/// Pure: the caller applies consequences such as sinking the shipwreck. A
/// sunk shipwreck still reports a (non-fresh) hit and shadows later obstacles.
pub fn check_obstacles(position: Vec3, radius: f32, obstacles: &[Obstacle]) -> Outcome {
    for (index, obstacle) in obstacles.iter().enumerate() {
        if !check_proximity(position, radius, obstacle.position(), obstacle.radius) {
            continue;
        }
        return match obstacle.kind {
            ObstacleKind::Island => Outcome::IslandHit { index },
            ObstacleKind::Shipwreck { sunk } => Outcome::ShipwreckHit {
                index,
                fresh: !sunk,
            },
        };
    }
    Outcome::NoHit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn island_at(x: f32, z: f32) -> Obstacle {
        Obstacle::island(Vec3::new(x, 0.8, z), 0.0, 1.0)
    }

    #[test]
    fn island_scenario() {
        let obstacles = vec![island_at(10.0, 0.0)];
        let hit = check_obstacles(Vec3::new(10.4, 0.18, 0.0), 0.5, &obstacles);
        assert_eq!(hit, Outcome::IslandHit { index: 0 });
        assert_eq!(hit.life_cost(), 3);

        let miss = check_obstacles(Vec3::new(8.0, 0.18, 0.0), 0.5, &obstacles);
        assert_eq!(miss, Outcome::NoHit);
        assert_eq!(miss.life_cost(), 0);
    }

    #[test]
    fn touching_circles_do_not_overlap() {
        assert!(!check_proximity(Vec3::ZERO, 1.0, Vec3::new(2.0, 0.0, 0.0), 1.0));
        assert!(check_proximity(Vec3::ZERO, 1.0, Vec3::new(1.99, 0.0, 0.0), 1.0));
    }

    #[test]
    fn height_is_ignored() {
        assert!(check_proximity(
            Vec3::new(0.0, -100.0, 0.0),
            0.5,
            Vec3::new(0.0, 100.0, 0.0),
            0.5
        ));
    }

    #[test]
    fn first_obstacle_in_order_wins() {
        let mut wreck = Obstacle::shipwreck(Vec3::new(0.5, 0.8, 0.0), 0.0, 1.0);
        let island = island_at(-0.5, 0.0);
        let obstacles = vec![island.clone(), wreck.clone()];
        assert_eq!(
            check_obstacles(Vec3::ZERO, 0.5, &obstacles),
            Outcome::IslandHit { index: 0 }
        );

        wreck.sink();
        let obstacles = vec![wreck, island];
        assert_eq!(
            check_obstacles(Vec3::ZERO, 0.5, &obstacles),
            Outcome::ShipwreckHit {
                index: 0,
                fresh: false
            }
        );
    }

    #[test]
    fn repeated_queries_agree() {
        let obstacles = vec![
            island_at(3.0, 3.0),
            Obstacle::shipwreck(Vec3::new(3.5, 0.8, 3.0), 1.0, 1.0),
        ];
        let position = Vec3::new(3.2, 0.0, 3.1);
        let first = check_obstacles(position, 0.5, &obstacles);
        for _ in 0..10 {
            assert_eq!(check_obstacles(position, 0.5, &obstacles), first);
        }
    }

    #[test]
    fn fresh_and_sunk_wreck_costs() {
        assert_eq!(
            Outcome::ShipwreckHit {
                index: 0,
                fresh: true
            }
            .life_cost(),
            1
        );
        assert_eq!(
            Outcome::ShipwreckHit {
                index: 0,
                fresh: false
            }
            .life_cost(),
            0
        );
    }

    #[test]
    fn border_is_a_square() {
        assert!(!check_border(Vec3::new(29.9, 0.0, -29.9), 30.0));
        assert!(check_border(Vec3::new(30.1, 0.0, 0.0), 30.0));
        assert!(check_border(Vec3::new(0.0, 0.0, -30.5), 30.0));
        assert!(!check_border(Vec3::new(0.0, 500.0, 0.0), 30.0));
    }
}
