use glam::{Mat4, Vec4};

/// Shapes the external renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Ocean,
    Raft,
    Island,
    Shipwreck,
    Fish,
    RadiusRing,
    /// A textured-quad text line holding the latest `set_text` content.
    Text,
}

impl Shape {
    /// Mesh file for shapes that load asynchronously. Built-in shapes are
    /// always drawable.
    pub fn streamed_asset(self) -> Option<&'static str> {
        use angler_assets::names;
        match self {
            Shape::Raft => Some(names::RAFT),
            Shape::Island => Some(names::ISLAND),
            Shape::Shipwreck => Some(names::SHIPWRECK),
            Shape::Fish => Some(names::FISH),
            Shape::Ocean | Shape::RadiusRing | Shape::Text => None,
        }
    }
}

/// Shading binding for a draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Ocean,
    Wood,
    Island,
    Shipwreck,
    Fish { color: Vec4 },
    Radius,
    Text,
}

/// Side-effect-only interface to the external scene-graph renderer.
pub trait Renderer {
    /// Draw `shape` at a world transform.
    fn draw(&mut self, shape: Shape, transform: Mat4, material: Material);

    /// Replace the active view matrix.
    fn set_camera(&mut self, view: Mat4);

    /// Set the string shown by the next `Shape::Text` draw.
    fn set_text(&mut self, content: &str);
}

/// One call made on a [`Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Draw {
        shape: Shape,
        transform: Mat4,
        material: Material,
    },
    SetCamera(Mat4),
    SetText(String),
}

/// Renderer that records every call, for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn count(&self, shape: Shape) -> usize {
        self.draws().filter(|(s, _, _)| *s == shape).count()
    }

    pub fn draws(&self) -> impl Iterator<Item = (Shape, &Mat4, &Material)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Draw {
                shape,
                transform,
                material,
            } => Some((*shape, transform, material)),
            _ => None,
        })
    }

    /// Text strings in the order they were set.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetText(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_camera(&self) -> Option<Mat4> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::SetCamera(m) => Some(*m),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, shape: Shape, transform: Mat4, material: Material) {
        self.commands.push(DrawCommand::Draw {
            shape,
            transform,
            material,
        });
    }

    fn set_camera(&mut self, view: Mat4) {
        self.commands.push(DrawCommand::SetCamera(view));
    }

    fn set_text(&mut self, content: &str) {
        self.commands.push(DrawCommand::SetText(content.to_string()));
    }
}
