use angler_common::Transform;
use glam::Vec3;

/// What an obstacle is, and for shipwrecks whether it has been sunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Island,
    Shipwreck { sunk: bool },
}

/// A fixed obstacle placed at session start.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub transform: Transform,
    pub radius: f32,
}

impl Obstacle {
    pub fn island(position: Vec3, yaw: f32, radius: f32) -> Self {
        Self {
            kind: ObstacleKind::Island,
            transform: Transform::from_position_yaw(position, yaw),
            radius,
        }
    }

    pub fn shipwreck(position: Vec3, yaw: f32, radius: f32) -> Self {
        Self {
            kind: ObstacleKind::Shipwreck { sunk: false },
            transform: Transform::from_position_yaw(position, yaw),
            radius,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn is_island(&self) -> bool {
        matches!(self.kind, ObstacleKind::Island)
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self.kind, ObstacleKind::Shipwreck { sunk: true })
    }

    /// Sunk shipwrecks are not drawn.
    pub fn is_visible(&self) -> bool {
        !self.is_sunk()
    }

    /// Sink a live shipwreck. Returns `true` only on the transition, so a
    /// shipwreck sinks exactly once and islands never do.
    pub fn sink(&mut self) -> bool {
        match &mut self.kind {
            ObstacleKind::Shipwreck { sunk } if !*sunk => {
                *sunk = true;
                true
            }
            _ => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            ObstacleKind::Island => "island",
            ObstacleKind::Shipwreck { sunk: false } => "shipwreck",
            ObstacleKind::Shipwreck { sunk: true } => "sunk shipwreck",
        }
    }
}
