//! Per-frame motion: focal smoothing and film-grain drift.

use std::f64::consts::TAU;

use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::wrap_mod;

/// Exponential smoothing of the focal point toward the pointer.
///
/// Each step covers a fixed fraction of the remaining distance, so convergence speed depends on
/// the frame rate: the step is not scaled by elapsed time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocalSmoother {
    factor: f64,
}

impl FocalSmoother {
    /// Default fraction of the remaining distance covered per frame.
    pub const DEFAULT_FACTOR: f64 = 0.09;

    /// Smoother with the given factor, clamped into `[0, 1]`.
    pub fn new(factor: f64) -> Self {
        Self {
            factor: factor.clamp(0.0, 1.0),
        }
    }

    /// Configured factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// One smoothing step, applied per axis.
    pub fn step(&self, focal: Point, target: Point) -> Point {
        Point::new(
            focal.x + (target.x - focal.x) * self.factor,
            focal.y + (target.y - focal.y) * self.factor,
        )
    }
}

impl Default for FocalSmoother {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FACTOR)
    }
}

/// Film-grain motion tunables.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GrainParams {
    /// Pattern downscale; a texel covers `1 / scale` logical units.
    pub scale: f64,
    /// Base opacity of the grain layer.
    pub alpha: f32,
    /// Fraction of focal movement added to the grain offset.
    pub parallax: f64,
    /// Constant drift in offset units per second.
    pub drift: [f64; 2],
    /// Accumulated rotation speed in radians per second.
    pub rotate_speed: f64,
}

impl Default for GrainParams {
    fn default() -> Self {
        Self {
            scale: 6.0,
            alpha: 0.22,
            parallax: 0.25,
            drift: [12.0, 8.0],
            rotate_speed: 0.15,
        }
    }
}

/// Share of the accumulated rotation that is actually applied to the pattern.
pub const ROTATION_APPLIED: f64 = 0.05;

/// Where to draw the grain pattern this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrainPlacement {
    /// Offset wrapped into `[0, tile)` on both axes.
    pub offset: Vec2,
    /// Rotation to apply about the surface center, in radians.
    pub rotation: f64,
    /// Flickering layer opacity.
    pub alpha: f32,
    /// Tile period in offset units.
    pub tile: f64,
}

/// Accumulated grain drift, parallax and rotation.
///
/// Both accumulators are kept wrapped to one period (`tile` for the offset, one full applied turn
/// for the rotation), which leaves the drawn pattern unchanged while keeping the values bounded.
#[derive(Clone, Debug)]
pub struct GrainMotion {
    params: GrainParams,
    offset: Vec2,
    rotation: f64,
    last_t: Option<f64>,
    prev_focal: Option<Point>,
}

impl GrainMotion {
    /// Fresh motion state at rest.
    pub fn new(params: GrainParams) -> Self {
        Self {
            params,
            offset: Vec2::ZERO,
            rotation: 0.0,
            last_t: None,
            prev_focal: None,
        }
    }

    /// Tunables in use.
    pub fn params(&self) -> &GrainParams {
        &self.params
    }

    /// Wrapped accumulated offset.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Wrapped accumulated rotation (before [`ROTATION_APPLIED`] is applied).
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Timestamp of the last integrated frame, in milliseconds.
    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_t
    }

    /// Focal point remembered for the next parallax delta.
    pub fn prev_focal(&self) -> Option<Point> {
        self.prev_focal
    }

    /// Tile period for a texture of `texture_size` texels.
    pub fn tile_for(&self, texture_size: u32) -> f64 {
        f64::from(texture_size) * self.params.scale
    }

    /// Forget the last timestamp so the next frame integrates no drift.
    pub fn reset_clock(&mut self) {
        self.last_t = None;
    }

    /// Anchor parallax at `focal` without moving the grain.
    pub fn reseed_focal(&mut self, focal: Point) {
        self.prev_focal = Some(focal);
    }

    /// Integrate drift, parallax and rotation for a frame at `t_ms` and return the placement.
    ///
    /// The focal point is not remembered here; call [`GrainMotion::remember_focal`] once per
    /// frame whether or not the grain was drawn.
    pub fn advance(&mut self, t_ms: f64, focal: Point, tile: f64) -> GrainPlacement {
        let dt = match self.last_t {
            Some(last) => (t_ms - last) / 1000.0,
            None => 0.0,
        };
        self.last_t = Some(t_ms);

        let drift = Vec2::new(self.params.drift[0], self.params.drift[1]) * dt;
        let parallax = match self.prev_focal {
            Some(prev) => (focal - prev) * self.params.parallax,
            None => Vec2::ZERO,
        };
        let raw = self.offset + drift + parallax;

        let tile = if tile.is_finite() && tile > 0.0 { tile } else { 1.0 };
        self.offset = Vec2::new(wrap_mod(raw.x, tile), wrap_mod(raw.y, tile));
        self.rotation = wrap_mod(
            self.rotation + self.params.rotate_speed * dt,
            TAU / ROTATION_APPLIED,
        );

        let time = t_ms / 1000.0;
        let flicker = 0.95 + 0.05 * (time * 2.5).sin();
        GrainPlacement {
            offset: self.offset,
            rotation: self.rotation * ROTATION_APPLIED,
            alpha: (f64::from(self.params.alpha) * flicker) as f32,
            tile,
        }
    }

    /// Remember this frame's focal point for the next parallax delta.
    pub fn remember_focal(&mut self, focal: Point) {
        self.prev_focal = Some(focal);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/motion.rs"]
mod tests;
