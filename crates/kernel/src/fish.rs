use angler_common::{EntityId, Transform, heading_vector};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

use crate::config::FishTuning;

/// Behaviour state of a live fish.
///
/// Escaping is not a state: a fish past the border is removed by the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FishState {
    /// Swimming; picks a new heading and speed once `reorient_at` passes.
    Wandering { reorient_at: f64 },
    /// Hooked by the boat; caught at `deadline` if the boat stays in range.
    Biting { started_at: f64, deadline: f64 },
}

/// What a single behaviour step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FishStep {
    Swimming,
    Hooked,
    BiteStarted,
    BiteLost,
    Caught { points: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fish {
    pub id: EntityId,
    pub position: Vec3,
    pub heading: f32,
    pub size: f32,
    pub speed: f32,
    pub state: FishState,
    /// Earliest time a new bite may start after a lost one.
    pub rebite_after: f64,
}

impl Fish {
    /// A fresh fish with zeroed timers: it reorients on its first step.
    pub fn new(id: EntityId, position: Vec3, heading: f32, size: f32) -> Self {
        Self {
            id,
            position,
            heading,
            size,
            speed: 0.0,
            state: FishState::Wandering { reorient_at: 0.0 },
            rebite_after: 0.0,
        }
    }

    /// Draw a size uniformly from the tuning range, snapping the top of the
    /// range to the trophy size.
    pub fn roll_size<R: Rng + ?Sized>(rng: &mut R, tuning: &FishTuning) -> f32 {
        let size = rng.gen_range(tuning.min_size..tuning.max_size);
        if size >= tuning.trophy_threshold {
            tuning.trophy_size
        } else {
            size
        }
    }

    pub fn is_trophy(&self, tuning: &FishTuning) -> bool {
        self.size >= tuning.trophy_size
    }

    pub fn is_biting(&self) -> bool {
        matches!(self.state, FishState::Biting { .. })
    }

    /// Fraction of the bite window elapsed at `now`, in `[0, 1]`. Zero when
    /// the fish is not biting.
    pub fn bite_progress(&self, now: f64) -> f32 {
        match self.state {
            FishState::Wandering { .. } => 0.0,
            FishState::Biting {
                started_at,
                deadline,
            } => {
                let window = deadline - started_at;
                if window <= 0.0 {
                    return 1.0;
                }
                ((now - started_at) / window).clamp(0.0, 1.0) as f32
            }
        }
    }

    pub fn points(&self, tuning: &FishTuning) -> u32 {
        (self.size * tuning.points_per_size).round() as u32
    }

    /// Advance the behaviour state machine by one frame.
    ///
    /// `frames` is the elapsed time in nominal frames and scales swimming.
    /// A `Caught` result leaves the fish in place; removing it is up to the
    /// caller.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        in_range: bool,
        frames: f32,
        tuning: &FishTuning,
        rng: &mut R,
    ) -> FishStep {
        match self.state {
            FishState::Biting { deadline, .. } => {
                if !in_range {
                    self.state = FishState::Wandering { reorient_at: now };
                    self.rebite_after = now + tuning.rebite_delay;
                    FishStep::BiteLost
                } else if now >= deadline {
                    FishStep::Caught {
                        points: self.points(tuning),
                    }
                } else {
                    FishStep::Hooked
                }
            }
            FishState::Wandering { reorient_at } => {
                if in_range && now >= self.rebite_after {
                    self.state = FishState::Biting {
                        started_at: now,
                        deadline: now + tuning.bite_time * f64::from(self.size),
                    };
                    return FishStep::BiteStarted;
                }
                if now >= reorient_at {
                    self.reorient(now, tuning, rng);
                }
                self.position += heading_vector(self.heading) * self.speed * frames;
                FishStep::Swimming
            }
        }
    }

    fn reorient<R: Rng + ?Sized>(&mut self, now: f64, tuning: &FishTuning, rng: &mut R) {
        self.heading = (self.heading + rng.gen_range(-PI..PI)).rem_euclid(2.0 * PI);
        self.speed = rng.gen_range(tuning.min_speed..tuning.max_speed) * self.size;
        let wait = rng.gen_range(tuning.min_reorient_secs..tuning.max_reorient_secs);
        self.state = FishState::Wandering {
            reorient_at: now + wait,
        };
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position_yaw(self.position, self.heading).with_scale(self.size)
    }
}
