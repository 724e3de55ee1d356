use angler_assets::AssetStore;
use angler_common::ViewMode;
use angler_input::{Intent, KeyBindings};
use angler_kernel::{Phase, Session, SessionEvent};
use angler_render::{CameraRig, FrameStats, Renderer, emit_scene};
use std::collections::VecDeque;

use crate::GameError;
use crate::config::AnglerConfig;

/// What happened during one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Intents applied at the start of the frame.
    pub intents: usize,
    pub events: Vec<SessionEvent>,
    /// False when the camera kept last frame's view.
    pub camera_updated: bool,
    pub stats: FrameStats,
}

/// Owns the session and everything needed to present it.
pub struct Game {
    session: Session,
    camera: CameraRig,
    assets: AssetStore,
    bindings: KeyBindings,
    pending: VecDeque<Intent>,
}

impl Game {
    pub fn new(config: AnglerConfig, seed: u64, assets: AssetStore) -> Result<Self, GameError> {
        let bindings = config.key_bindings()?;
        let session = Session::new(config.game, seed)?;
        Ok(Self {
            session,
            camera: CameraRig::new(config.camera),
            assets,
            bindings,
            pending: VecDeque::new(),
        })
    }

    /// Queue the intent bound to `key`, if any.
    pub fn handle_key(&mut self, key: &str) -> Option<Intent> {
        let intent = self.bindings.resolve(key)?;
        self.push_intent(intent);
        Some(intent)
    }

    pub fn push_intent(&mut self, intent: Intent) {
        self.pending.push_back(intent);
    }

    pub fn pending_intents(&self) -> usize {
        self.pending.len()
    }

    fn apply_intents(&mut self) -> Result<usize, GameError> {
        let mut applied = 0;
        while let Some(intent) = self.pending.pop_front() {
            tracing::trace!(%intent, "applying intent");
            let free_view = self.session.view() == ViewMode::Free;
            match intent {
                // The free view takes over the movement keys; the boat coasts.
                Intent::MoveForward if free_view => self.camera.glide_free(1.0),
                Intent::MoveBackward if free_view => self.camera.glide_free(-1.0),
                Intent::RotateLeft if free_view => self.camera.turn_free(1.0),
                Intent::RotateRight if free_view => self.camera.turn_free(-1.0),
                Intent::MoveForward => self.session.accelerate(),
                Intent::MoveBackward => self.session.decelerate(),
                Intent::RotateLeft => self.session.rotate_left(),
                Intent::RotateRight => self.session.rotate_right(),
                Intent::StartSession => self.session.start()?,
                Intent::SwitchView(mode) => self.session.set_view(mode),
                Intent::ToggleRadiusDisplay => self.session.toggle_radius(),
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// Run one frame at session time `t`, `dt` seconds after the last one.
    ///
    /// Applies queued intents, advances the session, eases the camera and
    /// emits draw calls. Errors only come from layout generation.
    pub fn frame<R: Renderer>(
        &mut self,
        t: f64,
        dt: f64,
        renderer: &mut R,
    ) -> Result<FrameReport, GameError> {
        let _span = tracing::info_span!("frame", tick = self.session.tick() + 1).entered();

        let intents = self.apply_intents()?;
        self.session.advance(t, dt)?;

        let camera_updated = if self.session.phase() == Phase::Title {
            false
        } else {
            match self.camera.update(self.session.view(), self.session.boat()) {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!(%err, "camera update failed, keeping previous view");
                    false
                }
            }
        };
        renderer.set_camera(self.camera.view());

        let stats = emit_scene(&self.session, &self.assets, renderer);
        let events = self.session.drain_events();
        if !events.is_empty() {
            tracing::debug!(count = events.len(), "session events");
        }

        Ok(FrameReport {
            intents,
            events,
            camera_updated,
            stats,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetStore {
        &mut self.assets
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}
