//! Canvas-2D-like drawing capability.
//!
//! [`DrawSurface`] is the narrow immediate-mode API the frame renderer paints through. It covers
//! exactly what the backdrop needs: filled rectangles and circles, solid/radial-gradient/pattern
//! fill styles, an affine transform stack with save/restore, global alpha, and three blend modes.

use crate::foundation::core::{Affine, Point, Rect, Rgba, Rgba8Premul, Vec2};
use crate::scene::noise::NoiseTexture;

/// Named compositing operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Normal alpha compositing.
    #[default]
    SourceOver,
    /// `1 - (1 - s)(1 - d)`; never darkens.
    Screen,
    /// Multiply dark backdrop regions, screen light ones.
    Overlay,
}

/// Offset/color pair of a gradient.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ColorStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f32,
    /// Color at this position.
    pub color: Rgba,
}

/// Radial gradient between two concentric circles.
///
/// Points inside `inner_radius` take the first stop, points beyond `outer_radius` the last.
/// Stops are interpolated in premultiplied space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RadialGradient {
    /// Shared center of both circles.
    pub center: Point,
    /// Radius mapped to offset 0.
    pub inner_radius: f64,
    /// Radius mapped to offset 1.
    pub outer_radius: f64,
    /// Color stops in insertion order.
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    /// Create a gradient with no stops.
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::new(),
        }
    }

    /// Append a stop; offsets are clamped into `[0, 1]`.
    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self
    }

    /// Gradient parameter of a point in user space, clamped into `[0, 1]`.
    pub fn offset_at(&self, p: Point) -> f32 {
        let span = self.outer_radius - self.inner_radius;
        if span <= 0.0 {
            return 1.0;
        }
        let d = (p - self.center).hypot();
        ((d - self.inner_radius) / span).clamp(0.0, 1.0) as f32
    }

    /// Premultiplied color of a point in user space.
    pub fn sample(&self, p: Point) -> Rgba8Premul {
        let t = self.offset_at(p);
        let Some(first) = self.stops.first() else {
            return Rgba8Premul::transparent();
        };
        if t <= first.offset {
            return first.color.to_premul();
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= 0.0 {
                    return b.color.to_premul();
                }
                return a
                    .color
                    .to_premul()
                    .lerp(b.color.to_premul(), (t - a.offset) / span);
            }
        }
        self.stops[self.stops.len() - 1].color.to_premul()
    }
}

/// Opaque handle to a repeating image pattern owned by a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Pattern(pub u32);

/// What a fill paints with.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillStyle {
    /// Flat color.
    Solid {
        /// The color.
        color: Rgba,
    },
    /// Radial gradient in user space.
    Radial(RadialGradient),
    /// Repeating pattern anchored at the user-space origin.
    Pattern {
        /// Handle returned by [`DrawSurface::create_pattern`].
        pattern: Pattern,
    },
}

/// Mutable drawing state captured by `save` and restored by `restore`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    /// User-to-device transform.
    pub transform: Affine,
    /// Multiplier applied to every fill.
    pub global_alpha: f32,
    /// Compositing operation for every fill.
    pub blend: BlendMode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            global_alpha: 1.0,
            blend: BlendMode::SourceOver,
        }
    }
}

/// Current state plus the save stack.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    /// Current drawing state.
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    /// Mutable current drawing state.
    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    /// Push a copy of the current state.
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(s) = self.saved.pop() {
            self.current = s;
        }
    }

    /// Number of outstanding saves.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Drop all saved states and return to defaults.
    pub fn reset(&mut self) {
        self.current = DrawState::default();
        self.saved.clear();
    }
}

/// Immediate-mode 2D drawing surface.
///
/// Implementors provide storage, state access and the fill primitives; transform helpers are
/// derived from [`DrawSurface::states_mut`] and post-multiply like their canvas counterparts.
pub trait DrawSurface {
    /// Resize the pixel buffer. Clears content and resets all drawing state.
    fn resize(&mut self, width_px: u32, height_px: u32);

    /// Whether the surface has a pixel buffer to draw into.
    fn is_ready(&self) -> bool;

    /// Register a texture as a repeating fill pattern.
    fn create_pattern(&mut self, texture: &NoiseTexture) -> Pattern;

    /// Save/restore stack.
    fn states(&self) -> &StateStack;

    /// Mutable save/restore stack.
    fn states_mut(&mut self) -> &mut StateStack;

    /// Fill an axis-aligned rectangle given in user space.
    fn fill_rect(&mut self, rect: Rect, style: &FillStyle);

    /// Fill a full circle given in user space.
    fn fill_circle(&mut self, center: Point, radius: f64, style: &FillStyle);

    /// Push a copy of the drawing state.
    fn save(&mut self) {
        self.states_mut().save();
    }

    /// Pop the drawing state.
    fn restore(&mut self) {
        self.states_mut().restore();
    }

    /// Current user-to-device transform.
    fn transform(&self) -> Affine {
        self.states().current().transform
    }

    /// Replace the transform.
    fn set_transform(&mut self, transform: Affine) {
        self.states_mut().current_mut().transform = transform;
    }

    /// Post-multiply a translation.
    fn translate(&mut self, v: Vec2) {
        let t = self.transform() * Affine::translate(v);
        self.set_transform(t);
    }

    /// Post-multiply a rotation (radians, clockwise in y-down space).
    fn rotate(&mut self, angle: f64) {
        let t = self.transform() * Affine::rotate(angle);
        self.set_transform(t);
    }

    /// Post-multiply a uniform scale.
    fn scale(&mut self, s: f64) {
        let t = self.transform() * Affine::scale(s);
        self.set_transform(t);
    }

    /// Set the global alpha, clamped into `[0, 1]`.
    fn set_global_alpha(&mut self, alpha: f32) {
        self.states_mut().current_mut().global_alpha = alpha.clamp(0.0, 1.0);
    }

    /// Set the blend mode used by subsequent fills.
    fn set_blend_mode(&mut self, blend: BlendMode) {
        self.states_mut().current_mut().blend = blend;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
