use crate::foundation::core::{Affine, Point, Rect};
use crate::render::draw::{BlendMode, DrawSurface, FillStyle, Pattern, StateStack};
use crate::scene::noise::NoiseTexture;

/// One recorded drawing call, with the drawing state it was issued under.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize {
        width: u32,
        height: u32,
    },
    CreatePattern {
        pattern: Pattern,
        size: u32,
    },
    FillRect {
        rect: Rect,
        style: FillStyle,
        transform: [f64; 6],
        alpha: f32,
        blend: BlendMode,
    },
    FillCircle {
        center: Point,
        radius: f64,
        style: FillStyle,
        transform: [f64; 6],
        alpha: f32,
        blend: BlendMode,
    },
}

/// Surface that draws nothing and records every call.
///
/// Useful for inspecting exactly what a frame issues (layer order, blend modes, transforms)
/// without rasterizing. Save/restore are folded into the state captured by each fill.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Option<(u32, u32)>,
    states: StateStack,
    patterns: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Last buffer size passed to `resize`.
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    fn snapshot_state(&self) -> ([f64; 6], f32, BlendMode) {
        let s = self.states.current();
        (s.transform.as_coeffs(), s.global_alpha, s.blend)
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, width_px: u32, height_px: u32) {
        self.size = Some((width_px, height_px));
        self.states.reset();
        self.commands.push(DrawCommand::Resize {
            width: width_px,
            height: height_px,
        });
    }

    fn is_ready(&self) -> bool {
        matches!(self.size, Some((w, h)) if w > 0 && h > 0)
    }

    fn create_pattern(&mut self, texture: &NoiseTexture) -> Pattern {
        let pattern = Pattern(self.patterns);
        self.patterns += 1;
        self.commands.push(DrawCommand::CreatePattern {
            pattern,
            size: texture.size(),
        });
        pattern
    }

    fn states(&self) -> &StateStack {
        &self.states
    }

    fn states_mut(&mut self) -> &mut StateStack {
        &mut self.states
    }

    fn fill_rect(&mut self, rect: Rect, style: &FillStyle) {
        let (transform, alpha, blend) = self.snapshot_state();
        self.commands.push(DrawCommand::FillRect {
            rect,
            style: style.clone(),
            transform,
            alpha,
            blend,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, style: &FillStyle) {
        let (transform, alpha, blend) = self.snapshot_state();
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            style: style.clone(),
            transform,
            alpha,
            blend,
        });
    }
}

/// Transform captured by a recorded fill.
pub fn command_transform(cmd: &DrawCommand) -> Option<Affine> {
    match cmd {
        DrawCommand::FillRect { transform, .. } | DrawCommand::FillCircle { transform, .. } => {
            Some(Affine::new(*transform))
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/record.rs"]
mod tests;
