//! The drawing-surface seam between the engine and a rendering backend.

use bevy::prelude::*;

/// Minimal immediate-mode 2D drawing target. The coordinates are surface
/// pixels with the origin at the top-left. Colours carry their alpha.
pub trait DrawSurface {
    /// Current pixel dimensions.
    fn size(&self) -> Vec2;
    /// Reallocate to `size`. The contents afterwards are transparent.
    fn resize(&mut self, size: UVec2);
    /// Erase to fully transparent.
    fn clear(&mut self);
    /// Composite `color` at `alpha` over the whole surface. Used to leave
    /// fading trails.
    fn fade(&mut self, color: Color, alpha: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Disk whose alpha falls linearly from `color` at the centre to zero
    /// at `radius`.
    fn radial_gradient_fill(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);
    /// Fill a closed polygon with the non-zero winding rule.
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Resize(UVec2),
    Clear,
    Fade { color: Color, alpha: f32 },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Glow { center: Vec2, radius: f32, color: Color },
    StrokeCircle { center: Vec2, radius: f32, width: f32, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
}

/// Headless surface that only records what was drawn.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    /// Number of recorded disks (filled circles).
    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn resize(&mut self, size: UVec2) {
        self.size = size.as_vec2();
        self.commands.push(DrawCommand::Resize(size));
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fade(&mut self, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Fade { color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn radial_gradient_fill(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Glow {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }
}
