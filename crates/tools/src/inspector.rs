use angler_common::{EntityId, ViewMode};
use angler_kernel::{FishState, Phase, Session};

/// Session inspector for developer tooling.
pub struct SessionInspector;

impl SessionInspector {
    pub fn summary(session: &Session) -> SessionSummary {
        SessionSummary {
            phase: session.phase(),
            round: session.round(),
            tick: session.tick(),
            time: session.time(),
            lives: session.lives(),
            score: session.score(),
            view: session.view(),
            fish: session.fish().len(),
            biting: session.fish().iter().filter(|f| f.is_biting()).count(),
            obstacles: session.obstacles().len(),
            sunk: session.obstacles().iter().filter(|o| o.is_sunk()).count(),
        }
    }

    pub fn list_fish(session: &Session) -> Vec<FishInfo> {
        let tuning = &session.config().fish;
        let now = session.time();
        session
            .fish()
            .iter()
            .map(|f| FishInfo {
                id: f.id,
                position: [f.position.x, f.position.z],
                size: f.size,
                trophy: f.is_trophy(tuning),
                bite_progress: match f.state {
                    FishState::Biting { .. } => Some(f.bite_progress(now)),
                    FishState::Wandering { .. } => None,
                },
            })
            .collect()
    }

    pub fn list_obstacles(session: &Session) -> Vec<ObstacleInfo> {
        session
            .obstacles()
            .iter()
            .enumerate()
            .map(|(index, o)| ObstacleInfo {
                index,
                kind: o.label(),
                position: [o.position().x, o.position().z],
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub phase: Phase,
    pub round: u32,
    pub tick: u64,
    pub time: f64,
    pub lives: u32,
    pub score: u32,
    pub view: ViewMode,
    pub fish: usize,
    pub biting: usize,
    pub obstacles: usize,
    pub sunk: usize,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: phase={:?} round={} tick={} t={:.2}s lives={} score={} view={} fish={} biting={} obstacles={} sunk={}",
            self.phase,
            self.round,
            self.tick,
            self.time,
            self.lives,
            self.score,
            self.view,
            self.fish,
            self.biting,
            self.obstacles,
            self.sunk
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FishInfo {
    pub id: EntityId,
    /// Planar `[x, z]`.
    pub position: [f32; 2],
    pub size: f32,
    pub trophy: bool,
    pub bite_progress: Option<f32>,
}

impl std::fmt::Display for FishInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fish {} pos=({:.2}, {:.2}) size={:.2}",
            self.id, self.position[0], self.position[1], self.size
        )?;
        if self.trophy {
            write!(f, " trophy")?;
        }
        if let Some(progress) = self.bite_progress {
            write!(f, " biting={:.0}%", progress * 100.0)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleInfo {
    pub index: usize,
    pub kind: &'static str,
    pub position: [f32; 2],
}

impl std::fmt::Display for ObstacleInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{:>2}] {} at ({:.0}, {:.0})",
            self.index, self.kind, self.position[0], self.position[1]
        )
    }
}
