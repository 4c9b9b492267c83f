use std::sync::Arc;

use vello_cpu::kurbo::Shape as _;

use crate::effects::composite::composite_in_place;
use crate::foundation::core::{Affine, Point, Rect, Rgba};
use crate::foundation::error::{GlowfieldError, GlowfieldResult};
use crate::render::backend::FrameRGBA;
use crate::render::draw::{DrawSurface, FillStyle, Pattern, RadialGradient, StateStack};
use crate::scene::noise::NoiseTexture;

/// Flattening tolerance for circles, in device pixels.
const CIRCLE_TOLERANCE: f64 = 0.01;

enum CpuShape {
    Rect(Rect),
    Circle { center: Point, radius: f64 },
}

enum CpuPaint {
    Color(vello_cpu::peniko::Color),
    Image(vello_cpu::Image),
}

/// CPU raster surface.
///
/// Each fill is rasterized by `vello_cpu` into a scratch layer (normal blending, full coverage
/// paint), then composited onto the premultiplied RGBA8 target with the current global alpha and
/// blend mode. Radial gradients are shaded per pixel from the layer's coverage.
pub struct CpuSurface {
    width: u16,
    height: u16,
    target: Vec<u8>,
    layer: Option<vello_cpu::Pixmap>,
    ctx: Option<vello_cpu::RenderContext>,
    patterns: Vec<vello_cpu::Image>,
    states: StateStack,
    fills: u64,
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSurface {
    /// Surface with no pixel buffer; it becomes ready on the first `resize`.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            target: Vec::new(),
            layer: None,
            ctx: None,
            patterns: Vec::new(),
            states: StateStack::default(),
            fills: 0,
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Number of fills composited since creation.
    pub fn fills(&self) -> u64 {
        self.fills
    }

    /// Copy of the current pixels (premultiplied).
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.width(),
            height: self.height(),
            data: self.target.clone(),
            premultiplied: true,
        }
    }

    fn fill(&mut self, shape: CpuShape, style: &FillStyle) {
        if !self.is_ready() {
            tracing::trace!("fill skipped: surface has no buffer");
            return;
        }
        let state = *self.states.current();
        if state.global_alpha <= 0.0 {
            return;
        }

        let paint = match style {
            FillStyle::Solid { color } => CpuPaint::Color(color_to_cpu(*color)),
            FillStyle::Radial(_) => CpuPaint::Color(color_to_cpu(Rgba::WHITE)),
            FillStyle::Pattern { pattern } => match self.patterns.get(pattern.0 as usize) {
                Some(img) => CpuPaint::Image(img.clone()),
                None => {
                    tracing::warn!(pattern = pattern.0, "fill skipped: unknown pattern");
                    return;
                }
            },
        };

        self.rasterize(&shape, paint, state.transform);
        let Some(layer) = self.layer.as_mut() else {
            return;
        };
        if let FillStyle::Radial(gradient) = style {
            shade_radial(
                layer.data_as_u8_slice_mut(),
                usize::from(self.width),
                gradient,
                state.transform,
            );
        }
        if let Err(e) = composite_in_place(
            &mut self.target,
            layer.data_as_u8_slice(),
            state.global_alpha,
            state.blend,
        ) {
            tracing::warn!(error = %e, "layer composite failed");
            return;
        }
        self.fills += 1;
    }

    fn rasterize(&mut self, shape: &CpuShape, paint: CpuPaint, transform: Affine) {
        let (w, h) = (self.width, self.height);
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match paint {
            CpuPaint::Color(c) => ctx.set_paint(c),
            CpuPaint::Image(img) => ctx.set_paint(img),
        }
        match *shape {
            CpuShape::Rect(r) => {
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1));
            }
            CpuShape::Circle { center, radius } => {
                let circle = vello_cpu::kurbo::Circle::new(
                    vello_cpu::kurbo::Point::new(center.x, center.y),
                    radius,
                );
                ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
            }
        }
        ctx.flush();

        let layer = self
            .layer
            .get_or_insert_with(|| vello_cpu::Pixmap::new(w, h));
        layer.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(layer);
        self.ctx = Some(ctx);
    }
}

impl DrawSurface for CpuSurface {
    fn resize(&mut self, width_px: u32, height_px: u32) {
        let clamp = |v: u32| -> u16 {
            u16::try_from(v).unwrap_or_else(|_| {
                tracing::warn!(requested = v, "surface side exceeds u16; clamping");
                u16::MAX
            })
        };
        self.width = clamp(width_px);
        self.height = clamp(height_px);
        self.target = vec![0u8; usize::from(self.width) * usize::from(self.height) * 4];
        self.layer = None;
        self.states.reset();
    }

    fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    fn create_pattern(&mut self, texture: &NoiseTexture) -> Pattern {
        let handle = Pattern(self.patterns.len() as u32);
        match pixmap_from_premul_bytes(texture.as_bytes(), texture.size(), texture.size()) {
            Ok(pixmap) => self.patterns.push(vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default()
                    .with_extend(vello_cpu::peniko::Extend::Repeat)
                    .with_quality(vello_cpu::peniko::ImageQuality::Low),
            }),
            // The handle stays dangling; fills with it are skipped.
            Err(e) => tracing::warn!(error = %e, "pattern texture rejected"),
        }
        handle
    }

    fn states(&self) -> &StateStack {
        &self.states
    }

    fn states_mut(&mut self) -> &mut StateStack {
        &mut self.states
    }

    fn fill_rect(&mut self, rect: Rect, style: &FillStyle) {
        self.fill(CpuShape::Rect(rect), style);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, style: &FillStyle) {
        if radius <= 0.0 {
            return;
        }
        self.fill(CpuShape::Circle { center, radius }, style);
    }
}

/// Replace white coverage with gradient color, evaluating the gradient at pixel centers.
fn shade_radial(layer: &mut [u8], width: usize, gradient: &RadialGradient, transform: Affine) {
    if width == 0 {
        return;
    }
    let inv = transform.inverse();
    for (i, px) in layer.chunks_exact_mut(4).enumerate() {
        let coverage = u16::from(px[3]);
        if coverage == 0 {
            continue;
        }
        let device = Point::new((i % width) as f64 + 0.5, (i / width) as f64 + 0.5);
        let c = gradient.sample(inv * device).to_array();
        for (dst, src) in px.iter_mut().zip(c) {
            *dst = crate::foundation::math::mul_div255_u8(u16::from(src), coverage);
        }
    }
}

fn color_to_cpu(c: Rgba) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.alpha_u8())
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> GlowfieldResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GlowfieldError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GlowfieldError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(GlowfieldError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
