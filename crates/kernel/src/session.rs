use angler_common::{EntityId, ViewMode};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::boat::Boat;
use crate::collision::{Outcome, check_border, check_obstacles, check_proximity};
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::fish::{Fish, FishStep};
use crate::layout::{place_fish, place_obstacles, place_one_fish};
use crate::obstacle::Obstacle;

/// Top-level game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the first start input.
    #[default]
    Title,
    Playing,
    /// Lives ran out. The simulation is frozen until the next start input.
    GameOver,
}

/// A record of every gameplay-relevant state change.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started { round: u32 },
    ObstacleHit { index: usize, outcome: Outcome, lives_left: u32 },
    FishSpawned { id: EntityId },
    BiteStarted { id: EntityId },
    BiteLost { id: EntityId },
    FishCaught { id: EntityId, size: f32, points: u32 },
    FishEscaped { id: EntityId },
    GameOver { score: u32 },
}

/// The authoritative session state.
///
/// Input is applied through the intent methods (`accelerate`, `start`, ...)
/// and the world moves only in `advance`. Everything random comes from the
/// session's seeded RNG.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    phase: Phase,
    lives: u32,
    score: u32,
    view: ViewMode,
    show_radius: bool,
    boat: Boat,
    obstacles: Vec<Obstacle>,
    fish: Vec<Fish>,
    rng: StdRng,
    next_id: u64,
    round: u32,
    tick: u64,
    time: f64,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Validate `config` and lay out the title-screen scene.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        let mut session = Self {
            phase: Phase::Title,
            lives: config.session.starting_lives,
            score: 0,
            view: ViewMode::Chase,
            show_radius: false,
            boat: Boat::new(&config.boat),
            obstacles: Vec::new(),
            fish: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            next_id: 0,
            round: 0,
            tick: 0,
            time: 0.0,
            events: Vec::new(),
            config,
        };
        let (obstacles, fish) = session.generate_layout()?;
        session.obstacles = obstacles;
        session.fish = fish;
        Ok(session)
    }

    fn generate_layout(&mut self) -> Result<(Vec<Obstacle>, Vec<Fish>), SetupError> {
        let start = self.config.boat.start_position;
        let obstacles = place_obstacles(&mut self.rng, &self.config.layout, start)?;
        let next_id = &mut self.next_id;
        let fish = place_fish(
            &mut self.rng,
            self.config.layout.fish_count,
            &self.config.layout,
            &self.config.fish,
            start,
            &obstacles,
            || {
                *next_id += 1;
                EntityId(*next_id)
            },
        )?;
        Ok((obstacles, fish))
    }

    /// Begin a new round from the title or game-over screen.
    ///
    /// Resets lives, score, boat and view, and lays out a fresh map. Ignored
    /// while a round is in progress. On error the previous state is kept.
    pub fn start(&mut self) -> Result<(), SetupError> {
        if self.phase == Phase::Playing {
            tracing::debug!("start ignored: round already in progress");
            return Ok(());
        }
        let (obstacles, fish) = self.generate_layout()?;
        self.obstacles = obstacles;
        self.fish = fish;
        self.boat = Boat::new(&self.config.boat);
        self.lives = self.config.session.starting_lives;
        self.score = 0;
        self.view = ViewMode::Chase;
        self.phase = Phase::Playing;
        self.round += 1;
        tracing::info!(round = self.round, "round started");
        self.record(SessionEvent::Started { round: self.round });
        for id in self.fish.iter().map(|f| f.id).collect::<Vec<_>>() {
            self.record(SessionEvent::FishSpawned { id });
        }
        Ok(())
    }

    pub fn accelerate(&mut self) {
        if self.phase == Phase::Playing {
            self.boat.accelerate(&self.config.boat);
        }
    }

    pub fn decelerate(&mut self) {
        if self.phase == Phase::Playing {
            self.boat.decelerate(&self.config.boat);
        }
    }

    pub fn rotate_left(&mut self) {
        if self.phase == Phase::Playing {
            self.boat.rotate_left(&self.config.boat);
        }
    }

    pub fn rotate_right(&mut self) {
        if self.phase == Phase::Playing {
            self.boat.rotate_right(&self.config.boat);
        }
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn toggle_radius(&mut self) {
        self.show_radius = !self.show_radius;
    }

    /// Advance the simulation to session time `now`, `dt` seconds after the
    /// previous frame.
    ///
    /// Order: boat motion, fish behaviour with removal and replenishment,
    /// then boat-versus-obstacle collisions. Outside `Playing` only the clock
    /// moves. A replenishment error is returned after the collision step has
    /// still run.
    pub fn advance(&mut self, now: f64, dt: f64) -> Result<(), SetupError> {
        let _span = tracing::debug_span!("session_advance", tick = self.tick + 1).entered();
        self.tick += 1;
        self.time = now;
        if self.phase != Phase::Playing {
            return Ok(());
        }

        let frames = (dt / self.config.session.nominal_frame_secs) as f32;
        self.boat.advance(frames);
        let replenished = self.update_fish(now, frames);

        let outcome = check_obstacles(self.boat.position, self.boat.radius, &self.obstacles);
        self.apply_boat_outcome(outcome);
        replenished
    }

    fn update_fish(&mut self, now: f64, frames: f32) -> Result<(), SetupError> {
        let boat_position = self.boat.position;
        let fishing_radius = self.config.fish.fishing_radius;
        let half_extent = self.config.layout.map_half_extent;

        let mut index = 0;
        while index < self.fish.len() {
            let fish = &mut self.fish[index];
            let in_range = check_proximity(boat_position, fishing_radius, fish.position, 0.0);
            let step = fish.step(now, in_range, frames, &self.config.fish, &mut self.rng);
            let id = fish.id;
            let size = fish.size;
            let escaped = check_border(fish.position, half_extent);

            match step {
                FishStep::Caught { points } => {
                    self.fish.remove(index);
                    self.score = self.score.saturating_add(points);
                    tracing::info!(%id, size, points, score = self.score, "fish caught");
                    self.record(SessionEvent::FishCaught { id, size, points });
                    continue;
                }
                FishStep::BiteStarted => {
                    tracing::debug!(%id, "bite started");
                    self.record(SessionEvent::BiteStarted { id });
                }
                FishStep::BiteLost => {
                    tracing::debug!(%id, "bite lost");
                    self.record(SessionEvent::BiteLost { id });
                }
                FishStep::Swimming | FishStep::Hooked => {}
            }

            if escaped {
                self.fish.remove(index);
                tracing::debug!(%id, "fish escaped past the border");
                self.record(SessionEvent::FishEscaped { id });
                continue;
            }
            index += 1;
        }

        self.replenish_fish()
    }

    /// Refill the population under the same rules as the initial layout.
    fn replenish_fish(&mut self) -> Result<(), SetupError> {
        while self.fish.len() < self.config.layout.fish_count {
            self.next_id += 1;
            let fish = place_one_fish(
                &mut self.rng,
                EntityId(self.next_id),
                &self.config.layout,
                &self.config.fish,
                self.config.boat.start_position,
                &self.obstacles,
            )
            .inspect_err(|err| tracing::warn!(%err, "fish replenishment failed"))?;
            let id = fish.id;
            self.fish.push(fish);
            self.record(SessionEvent::FishSpawned { id });
        }
        Ok(())
    }

    fn apply_boat_outcome(&mut self, outcome: Outcome) {
        let index = match outcome {
            Outcome::IslandHit { index } => index,
            Outcome::ShipwreckHit { index, fresh: true } => {
                self.obstacles[index].sink();
                index
            }
            Outcome::ShipwreckHit { fresh: false, .. } | Outcome::BorderHit | Outcome::NoHit => {
                return;
            }
        };

        self.lives = self.lives.saturating_sub(outcome.life_cost());
        tracing::info!(index, ?outcome, lives = self.lives, "boat hit obstacle");
        self.record(SessionEvent::ObstacleHit {
            index,
            outcome,
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.phase = Phase::GameOver;
            self.boat.stop();
            tracing::info!(score = self.score, "game over");
            self.record(SessionEvent::GameOver { score: self.score });
        }
    }

    fn record(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn show_radius(&self) -> bool {
        self.show_radius
    }

    pub fn boat(&self) -> &Boat {
        &self.boat
    }

    /// Direct boat access for tooling and tests.
    pub fn boat_mut(&mut self) -> &mut Boat {
        &mut self.boat
    }

    /// Obstacles in placement order: islands first, then shipwrecks.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn fish(&self) -> &[Fish] {
        &self.fish
    }

    /// Mutable fish access. The slice keeps the population fixed.
    pub fn fish_mut(&mut self) -> &mut [Fish] {
        &mut self.fish
    }

    /// Number of `advance` calls so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Session time passed to the latest `advance`.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Rounds started so far.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fish::FishState;
    use glam::Vec3;

    const DT: f64 = 1.0 / 60.0;

    fn playing(seed: u64) -> Session {
        let mut session = Session::new(GameConfig::default(), seed).unwrap();
        session.start().unwrap();
        session.drain_events();
        session
    }

    /// Put the first fish right under the boat, everyone else far away.
    fn hook_first_fish(session: &mut Session) {
        let boat = session.boat().position;
        for (i, fish) in session.fish_mut().iter_mut().enumerate() {
            fish.speed = 0.0;
            fish.state = FishState::Wandering { reorient_at: 1e9 };
            if i == 0 {
                fish.position = Vec3::new(boat.x, 0.0, boat.z);
                fish.size = 1.0;
            } else {
                fish.position = Vec3::new(-25.0, 0.0, -25.0);
            }
        }
    }

    #[test]
    fn new_session_waits_on_title() {
        let session = Session::new(GameConfig::default(), 1).unwrap();
        assert_eq!(session.phase(), Phase::Title);
        assert_eq!(session.obstacles().len(), 16);
        assert_eq!(session.fish().len(), 10);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut config = GameConfig::default();
        config.boat.max_speed = -1.0;
        assert!(matches!(
            Session::new(config, 1),
            Err(SetupError::Config(_))
        ));
    }

    #[test]
    fn title_ignores_movement() {
        let mut session = Session::new(GameConfig::default(), 1).unwrap();
        session.accelerate();
        session.advance(DT, DT).unwrap();
        assert_eq!(session.boat().speed, 0.0);
        assert_eq!(session.tick(), 1);
    }

    #[test]
    fn start_resets_round_state() {
        let session = playing(3);
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.view(), ViewMode::Chase);
        assert_eq!(session.round(), 1);
    }

    #[test]
    fn start_while_playing_is_ignored() {
        let mut session = playing(3);
        session.accelerate();
        session.start().unwrap();
        assert_eq!(session.round(), 1);
        assert!(session.boat().speed > 0.0);
    }

    #[test]
    fn fish_population_is_constant() {
        let mut session = playing(9);
        let mut t = 0.0;
        for frame in 0..3000 {
            match frame % 7 {
                0 | 1 => session.accelerate(),
                2 => session.rotate_left(),
                _ => {}
            }
            t += DT;
            session.advance(t, DT).unwrap();
            assert_eq!(session.fish().len(), 10);
            if session.phase() == Phase::GameOver {
                session.start().unwrap();
            }
        }
    }

    #[test]
    fn catch_scenario_scores_fifty() {
        let mut session = playing(4);
        hook_first_fish(&mut session);
        let id = session.fish()[0].id;

        session.advance(0.0, DT).unwrap();
        assert!(session.fish()[0].is_biting());
        session.advance(1.5, DT).unwrap();
        session.advance(3.0, DT).unwrap();

        assert_eq!(session.score(), 50);
        assert!(session.fish().iter().all(|f| f.id != id));
        assert_eq!(session.fish().len(), 10);
        assert!(session.events().contains(&SessionEvent::FishCaught {
            id,
            size: 1.0,
            points: 50
        }));
    }

    #[test]
    fn leaving_range_cancels_catch() {
        let mut session = playing(4);
        hook_first_fish(&mut session);
        let id = session.fish()[0].id;

        session.advance(0.0, DT).unwrap();
        session.boat_mut().position.x += 10.0;
        session.advance(2.95, DT).unwrap();
        session.advance(3.0, DT).unwrap();

        assert_eq!(session.score(), 0);
        assert!(session.events().contains(&SessionEvent::BiteLost { id }));
        assert!(session.fish().iter().any(|f| f.id == id));
    }

    #[test]
    fn escaped_fish_is_replaced_without_score() {
        let mut session = playing(5);
        let id = session.fish()[0].id;
        session.fish_mut()[0].position = Vec3::new(31.0, 0.0, 0.0);
        session.advance(DT, DT).unwrap();

        assert_eq!(session.score(), 0);
        assert!(session.events().contains(&SessionEvent::FishEscaped { id }));
        assert_eq!(session.fish().len(), 10);
    }

    #[test]
    fn shipwreck_costs_one_life_once() {
        let mut session = playing(6);
        let wreck = session.config().layout.islands;
        let position = session.obstacles()[wreck].position();
        session.boat_mut().position = Vec3::new(position.x, 0.18, position.z);

        session.advance(DT, DT).unwrap();
        assert_eq!(session.lives(), 2);
        assert!(session.obstacles()[wreck].is_sunk());

        session.advance(2.0 * DT, DT).unwrap();
        assert_eq!(session.lives(), 2);
        assert!(session.obstacles()[wreck].is_sunk());
    }

    #[test]
    fn island_ends_the_round() {
        let mut session = playing(7);
        let position = session.obstacles()[0].position();
        session.accelerate();
        session.boat_mut().position = Vec3::new(position.x + 0.4, 0.18, position.z);

        session.advance(DT, DT).unwrap();
        assert_eq!(session.lives(), 0);
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.boat().speed, 0.0);

        session.advance(2.0 * DT, DT).unwrap();
        assert_eq!(session.lives(), 0);
        assert!(session.events().contains(&SessionEvent::GameOver { score: 0 }));
    }

    #[test]
    fn lives_never_go_below_zero() {
        let mut session = playing(8);
        let wreck = session.config().layout.islands;
        session.boat_mut().position = session.obstacles()[wreck].position();
        session.advance(DT, DT).unwrap();
        assert_eq!(session.lives(), 2);

        session.boat_mut().position = session.obstacles()[0].position();
        session.advance(2.0 * DT, DT).unwrap();
        assert_eq!(session.lives(), 0);
        assert_eq!(session.phase(), Phase::GameOver);
    }

    #[test]
    fn replay_after_game_over_resets() {
        let mut session = playing(10);
        let island = session.obstacles()[0].position();
        session.boat_mut().position = island;
        session.advance(DT, DT).unwrap();
        assert_eq!(session.phase(), Phase::GameOver);
        session.set_view(ViewMode::TopDown);

        session.start().unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.lives(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.boat().position, session.config().boat.start_position);
        assert_eq!(session.view(), ViewMode::Chase);
        assert_eq!(session.round(), 2);
    }

    #[test]
    fn score_never_decreases() {
        let mut session = playing(12);
        let mut best = 0;
        let mut t = 0.0;
        for frame in 0..2000 {
            if frame % 40 == 0 {
                hook_first_fish(&mut session);
            }
            t += 0.1;
            session.advance(t, DT).unwrap();
            assert!(session.score() >= best);
            best = session.score();
        }
        assert!(best > 0);
    }

    #[test]
    fn same_seed_same_session() {
        let run = |seed| {
            let mut session = playing(seed);
            let mut t = 0.0;
            for _ in 0..600 {
                session.accelerate();
                t += DT;
                session.advance(t, DT).unwrap();
            }
            (
                session.boat().position,
                session.fish().to_vec(),
                session.lives(),
            )
        };
        assert_eq!(run(77), run(77));
    }

    #[test]
    fn replenishment_ignores_boat_position() {
        let mut config = GameConfig::default();
        config.layout.map_half_extent = 10.0;
        config.layout.islands = 1;
        config.layout.shipwrecks = 0;
        config.layout.no_spawn_radius = 13.0;
        config.boat.start_position = Vec3::new(0.0, 0.18, 30.0);
        let mut session = Session::new(config, 9).unwrap();
        session.start().unwrap();

        // From the origin every grid cell is within 13 units of the boat.
        session.boat_mut().position = Vec3::new(0.0, 0.18, 0.0);
        session.obstacles_mut()[0].transform.position = Vec3::new(-8.0, 0.8, -8.0);
        session.fish_mut()[0].position = Vec3::new(11.0, 0.0, 0.0);
        session.drain_events();

        session.advance(DT, DT).unwrap();
        assert_eq!(session.fish().len(), 10);
        let events = session.drain_events();
        assert!(events.iter().any(|e| matches!(e, SessionEvent::FishEscaped { .. })));
        assert!(events.iter().any(|e| matches!(e, SessionEvent::FishSpawned { .. })));

        session.advance(2.0 * DT, DT).unwrap();
        assert_eq!(session.fish().len(), 10);
    }
}
