//! The five-layer backdrop composition.
//!
//! Layer order and blend modes are fixed:
//!
//! 1. flat background, source-over
//! 2. pointer-following radial glow, screen
//! 3. drifting film grain pattern, overlay (when a pattern exists)
//! 4. particle dots, overlay (when particles exist)
//! 5. vignette, source-over

use crate::foundation::core::{Point, Rect, Rgba};
use crate::render::draw::{BlendMode, DrawSurface, FillStyle, Pattern, RadialGradient};
use crate::scene::motion::GrainPlacement;
use crate::scene::particles::Particle;
use crate::scene::surface::SurfaceMetrics;

/// Background fill, `#1E1E1E`.
pub const BACKGROUND: Rgba = Rgba::rgb(0x1E, 0x1E, 0x1E);

/// Glow gradient stops, center outward.
pub const GLOW_STOPS: [(f32, Rgba); 5] = [
    (0.00, Rgba::rgb(0xF1, 0xEA, 0xE4)),
    (0.01, Rgba::rgb(0xF1, 0xEA, 0xE4)),
    (0.10, Rgba::rgb(0xF2, 0x57, 0xA2)),
    (0.35, Rgba::rgb(0x32, 0x2D, 0xBF)),
    (1.00, Rgba::rgba(30, 30, 30, 0.0)),
];

/// Glow radius as a fraction of the longer surface side.
pub const GLOW_RADIUS: f64 = 0.9;

/// Opacity of the particle layer.
pub const PARTICLE_ALPHA: f32 = 0.04;

/// Vignette inner/outer radii as fractions of the longer surface side.
pub const VIGNETTE_RADII: (f64, f64) = (0.2, 0.95);

/// Vignette edge color.
pub const VIGNETTE_EDGE: Rgba = Rgba::rgba(0, 0, 0, 0.25);

/// Grain pattern plus where to put it this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrainLayer {
    pub pattern: Pattern,
    pub placement: GrainPlacement,
    /// Pattern downscale factor.
    pub scale: f64,
}

/// Everything one frame reads.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    pub metrics: &'a SurfaceMetrics,
    /// Smoothed focal point, logical units.
    pub focal: Point,
    /// Seconds since the time origin.
    pub time: f64,
    pub grain: Option<GrainLayer>,
    /// Particles already advanced for this frame.
    pub particles: &'a [Particle],
}

/// Stateless painter for the backdrop layers.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameRenderer;

impl FrameRenderer {
    /// Paint one full frame. A surface that is not ready is left untouched.
    pub fn paint<S: DrawSurface + ?Sized>(&self, surface: &mut S, inputs: &FrameInputs<'_>) {
        if !surface.is_ready() {
            tracing::trace!("frame skipped: surface not ready");
            return;
        }
        surface.set_transform(inputs.metrics.base_transform());

        self.background(surface, inputs.metrics);
        self.glow(surface, inputs.metrics, inputs.focal);
        if let Some(grain) = &inputs.grain {
            self.grain(surface, inputs.metrics, grain);
        }
        if !inputs.particles.is_empty() {
            self.particles(surface, inputs.particles);
        }
        self.vignette(surface, inputs.metrics);
    }

    fn background<S: DrawSurface + ?Sized>(&self, surface: &mut S, metrics: &SurfaceMetrics) {
        surface.set_blend_mode(BlendMode::SourceOver);
        surface.set_global_alpha(1.0);
        surface.fill_rect(metrics.logical_rect(), &FillStyle::Solid { color: BACKGROUND });
    }

    fn glow<S: DrawSurface + ?Sized>(&self, surface: &mut S, metrics: &SurfaceMetrics, focal: Point) {
        surface.set_blend_mode(BlendMode::Screen);
        surface.fill_rect(metrics.logical_rect(), &FillStyle::Radial(glow_gradient(metrics, focal)));
    }

    fn grain<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        metrics: &SurfaceMetrics,
        grain: &GrainLayer,
    ) {
        let p = &grain.placement;
        let center = metrics.center().to_vec2();

        surface.save();
        surface.set_global_alpha(p.alpha);
        surface.set_blend_mode(BlendMode::Overlay);
        surface.translate(center);
        surface.rotate(p.rotation);
        surface.translate(-center);
        surface.translate(-p.offset);
        surface.scale(1.0 / grain.scale);
        surface.fill_rect(
            grain_rect(metrics, p.tile, grain.scale),
            &FillStyle::Pattern {
                pattern: grain.pattern,
            },
        );
        surface.restore();
    }

    fn particles<S: DrawSurface + ?Sized>(&self, surface: &mut S, particles: &[Particle]) {
        surface.save();
        surface.set_global_alpha(PARTICLE_ALPHA);
        surface.set_blend_mode(BlendMode::Overlay);
        let white = FillStyle::Solid { color: Rgba::WHITE };
        for p in particles {
            surface.fill_circle(p.pos, p.radius, &white);
        }
        surface.restore();
    }

    fn vignette<S: DrawSurface + ?Sized>(&self, surface: &mut S, metrics: &SurfaceMetrics) {
        surface.set_blend_mode(BlendMode::SourceOver);
        surface.fill_rect(metrics.logical_rect(), &FillStyle::Radial(vignette_gradient(metrics)));
    }
}

/// Pointer-following glow centered on `focal`.
pub fn glow_gradient(metrics: &SurfaceMetrics, focal: Point) -> RadialGradient {
    GLOW_STOPS.iter().fold(
        RadialGradient::new(focal, 0.0, metrics.max_side() * GLOW_RADIUS),
        |g, &(offset, color)| g.with_stop(offset, color),
    )
}

/// Darkening ring around the surface center.
pub fn vignette_gradient(metrics: &SurfaceMetrics) -> RadialGradient {
    let max = metrics.max_side();
    RadialGradient::new(metrics.center(), max * VIGNETTE_RADII.0, max * VIGNETTE_RADII.1)
        .with_stop(0.0, Rgba::rgba(0, 0, 0, 0.0))
        .with_stop(1.0, VIGNETTE_EDGE)
}

/// Pattern-space rectangle large enough to cover the surface at any wrapped offset.
pub fn grain_rect(metrics: &SurfaceMetrics, tile: f64, scale: f64) -> Rect {
    Rect::from_origin_size(
        Point::ORIGIN,
        ((metrics.width + tile) * scale, (metrics.height + tile) * scale),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
