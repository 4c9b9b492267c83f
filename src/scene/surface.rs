use crate::foundation::core::{Affine, Point, Rect, Size};

/// Raw host measurement, as reported by the platform layout engine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HostMeasurement {
    /// On-screen bounding box of the drawing element.
    pub element: Rect,
    /// Bounding box of the element's container, if it has one.
    pub parent: Option<Rect>,
    /// Size of the window viewport.
    pub viewport: Size,
    /// Reported device pixel ratio (may be 0 or non-finite on exotic hosts).
    pub device_pixel_ratio: f64,
}

impl HostMeasurement {
    /// Element and container both exactly `size`, placed at the origin.
    pub fn fixed(size: Size, device_pixel_ratio: f64) -> Self {
        let rect = Rect::from_origin_size(Point::ZERO, size);
        Self {
            element: rect,
            parent: Some(rect),
            viewport: size,
            device_pixel_ratio,
        }
    }
}

/// Resolved drawing-surface geometry.
///
/// Invariants: `width, height >= 1`, `dpr` in `[1, 2]`,
/// `buffer_width == ceil(width * dpr)` and `buffer_height == ceil(height * dpr)`.
/// The CPU surface rasterizes at most `u16::MAX` pixels per side and clamps larger buffers;
/// `HeadlessOpts::validate` rejects such sizes up front.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SurfaceMetrics {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Clamped device pixel ratio.
    pub dpr: f64,
    /// Physical buffer width in pixels.
    pub buffer_width: u32,
    /// Physical buffer height in pixels.
    pub buffer_height: u32,
    /// On-screen origin used to convert client coordinates.
    pub origin: Point,
}

impl SurfaceMetrics {
    /// Upper bound applied to the device pixel ratio.
    pub const MAX_PIXEL_RATIO: f64 = 2.0;

    /// Pick the logical size from a measurement and derive the buffer.
    ///
    /// The element's own box wins when both sides are non-zero; otherwise each axis falls back
    /// to the container and then to the viewport.
    pub fn from_measurement(m: &HostMeasurement) -> Self {
        let el = m.element.size();
        let (width, height) = if usable(el.width) && usable(el.height) {
            (el.width, el.height)
        } else {
            let parent = m.parent.map(|r| r.size()).unwrap_or(Size::ZERO);
            let pick = |p: f64, v: f64| if usable(p) { p } else { v };
            (
                pick(parent.width, m.viewport.width),
                pick(parent.height, m.viewport.height),
            )
        };
        Self::new(width, height, m.device_pixel_ratio, m.element.origin())
    }

    /// Build metrics from a logical size and a raw pixel ratio.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64, origin: Point) -> Self {
        let width = if width.is_finite() { width.max(1.0) } else { 1.0 };
        let height = if height.is_finite() { height.max(1.0) } else { 1.0 };
        let dpr = clamp_pixel_ratio(device_pixel_ratio);
        Self {
            width,
            height,
            dpr,
            buffer_width: (width * dpr).ceil() as u32,
            buffer_height: (height * dpr).ceil() as u32,
            origin,
        }
    }

    /// Logical-to-physical transform installed after every resize.
    pub fn base_transform(&self) -> Affine {
        Affine::scale(self.dpr)
    }

    /// Full surface in logical units.
    pub fn logical_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Logical size.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Center of the surface.
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Longer side.
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Resting focal point used until the pointer moves.
    pub fn focal_seed(&self) -> Point {
        Point::new(self.width * 0.55, self.height * 0.35)
    }
}

fn usable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Clamp a raw device pixel ratio into `[1, MAX_PIXEL_RATIO]`; unusable values count as 1.
pub fn clamp_pixel_ratio(dpr: f64) -> f64 {
    if usable(dpr) {
        dpr.clamp(1.0, SurfaceMetrics::MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/surface.rs"]
mod tests;
