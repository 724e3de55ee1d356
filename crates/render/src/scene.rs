use angler_assets::{AssetError, AssetStore};
use angler_kernel::{ObstacleKind, Phase, Session};
use glam::{Mat4, Vec3};
use std::f32::consts::PI;

use crate::palette::fish_color;
use crate::renderer::{Material, Renderer, Shape};

/// Counts from one scene emission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub draws: usize,
    /// Draws skipped because their asset was not drawable.
    pub skipped: usize,
    pub texts: usize,
}

struct Emitter<'a, R: Renderer> {
    renderer: &'a mut R,
    assets: &'a AssetStore,
    stats: FrameStats,
}

impl<R: Renderer> Emitter<'_, R> {
    fn draw(&mut self, shape: Shape, transform: Mat4, material: Material) {
        if let Some(name) = shape.streamed_asset() {
            match self.assets.require(name) {
                Ok(_) => {}
                Err(AssetError::NotReady(_)) => {
                    tracing::trace!(?shape, "asset loading, draw skipped");
                    self.stats.skipped += 1;
                    return;
                }
                Err(err) => {
                    tracing::debug!(?shape, %err, "asset unavailable, draw skipped");
                    self.stats.skipped += 1;
                    return;
                }
            }
        }
        self.renderer.draw(shape, transform, material);
        self.stats.draws += 1;
    }

    fn text(&mut self, content: &str, transform: Mat4) {
        self.renderer.set_text(content);
        self.renderer.draw(Shape::Text, transform, Material::Text);
        self.stats.texts += 1;
    }
}

/// Transform of HUD line `row`, floating beside the boat.
fn hud_line(anchor: Mat4, row: usize) -> Mat4 {
    anchor
        * Mat4::from_scale(Vec3::new(0.1, 0.5, 0.5))
        * Mat4::from_translation(Vec3::new(0.0, 2.0 + 2.0 * row as f32, -20.0))
        * Mat4::from_rotation_x(1.5 * PI)
        * Mat4::from_rotation_z(1.5 * PI)
}

/// Issue the draw calls for one frame of `session`.
///
/// The camera is not touched here.
pub fn emit_scene<R: Renderer>(session: &Session, assets: &AssetStore, renderer: &mut R) -> FrameStats {
    let mut out = Emitter {
        renderer,
        assets,
        stats: FrameStats::default(),
    };
    let config = session.config();
    let extent = config.layout.map_half_extent;

    out.draw(
        Shape::Ocean,
        Mat4::from_scale(Vec3::new(extent, 1.0, extent)),
        Material::Ocean,
    );

    for obstacle in session.obstacles() {
        let transform = obstacle.transform.to_matrix();
        match obstacle.kind {
            ObstacleKind::Island => out.draw(
                Shape::Island,
                Mat4::from_translation(Vec3::new(0.0, 0.5, 0.0)) * transform,
                Material::Island,
            ),
            ObstacleKind::Shipwreck { sunk: false } => {
                out.draw(Shape::Shipwreck, transform, Material::Shipwreck)
            }
            ObstacleKind::Shipwreck { sunk: true } => {}
        }
    }

    let now = session.time();
    for fish in session.fish() {
        let color = fish_color(fish.bite_progress(now), fish.is_trophy(&config.fish));
        out.draw(Shape::Fish, fish.transform().to_matrix(), Material::Fish { color });
    }

    let boat = session.boat();
    let anchor = boat.transform().to_matrix();
    out.draw(Shape::Raft, anchor * Mat4::from_scale(Vec3::splat(0.5)), Material::Wood);

    if session.show_radius() {
        let r = config.fish.fishing_radius;
        out.draw(
            Shape::RadiusRing,
            Mat4::from_translation(boat.position) * Mat4::from_scale(Vec3::new(r, 1.0, r)),
            Material::Radius,
        );
    }

    match session.phase() {
        Phase::Title => {
            out.text("Press Enter to start", hud_line(anchor, 0));
        }
        Phase::Playing => {
            let speed = boat.speed_percent(&config.boat);
            // Leftover float error must not print as "-0".
            let speed = if speed.abs() < 0.5 { 0.0 } else { speed };
            out.text(&format!("{speed:.0}% Speed"), hud_line(anchor, 0));
            out.text(&format!("Lives: {}", session.lives()), hud_line(anchor, 1));
            out.text(&format!("Score: {}", session.score()), hud_line(anchor, 2));
        }
        Phase::GameOver => {
            out.text("Game Over", hud_line(anchor, 0));
            out.text(&format!("Score: {}", session.score()), hud_line(anchor, 1));
            out.text("Press Enter to play again", hud_line(anchor, 2));
        }
    }

    out.stats
}
