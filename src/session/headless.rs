//! Offline driver: a backdrop on the CPU surface, stepped by a manual clock.

use std::f64::consts::TAU;

use crate::backdrop::Backdrop;
use crate::config::BackdropConfig;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::error::{GlowfieldError, GlowfieldResult};
use crate::host::element::StaticHost;
use crate::host::input::PointerEvent;
use crate::host::schedule::ManualScheduler;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::CpuSurface;
use crate::render::draw::DrawSurface;
use crate::render::record::{DrawCommand, RecordingSurface};
use crate::scene::surface::SurfaceMetrics;

/// Backdrop wired to the built-in offline adapters.
pub type HeadlessBackdrop = Backdrop<CpuSurface, ManualScheduler, StaticHost>;

/// Surface geometry and clock for a headless run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadlessOpts {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    pub device_pixel_ratio: f64,
    /// Simulated display refresh rate.
    pub fps: u32,
}

impl Default for HeadlessOpts {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            device_pixel_ratio: 1.0,
            fps: 60,
        }
    }
}

impl HeadlessOpts {
    pub fn validate(&self) -> GlowfieldResult<()> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width < 1.0
            || self.height < 1.0
        {
            return Err(GlowfieldError::validation(
                "headless size must be finite and >= 1",
            ));
        }
        if self.fps == 0 {
            return Err(GlowfieldError::validation("fps must be > 0"));
        }
        let m = SurfaceMetrics::new(self.width, self.height, self.device_pixel_ratio, Point::ORIGIN);
        let max = u32::from(u16::MAX);
        if m.buffer_width > max || m.buffer_height > max {
            return Err(GlowfieldError::validation(format!(
                "buffer {}x{} exceeds the raster limit of {max} pixels per side",
                m.buffer_width, m.buffer_height
            )));
        }
        Ok(())
    }

    /// Milliseconds between two simulated frames.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }
}

/// Scripted pointer positions in surface coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerPath {
    /// No pointer input; the focal point rests at its seed.
    Still,
    /// One position per frame, cycling.
    Points(Vec<Point>),
    /// Circular motion.
    Orbit {
        center: Point,
        radius: f64,
        /// Seconds per revolution.
        period_s: f64,
    },
}

impl PointerPath {
    /// Pointer position for frame `idx` at `time_s`, if the path moves the pointer.
    pub fn position_at(&self, idx: u64, time_s: f64) -> Option<Point> {
        match self {
            Self::Still => None,
            Self::Points(points) if points.is_empty() => None,
            Self::Points(points) => Some(points[(idx % points.len() as u64) as usize]),
            Self::Orbit {
                center,
                radius,
                period_s,
            } => {
                let phase = if *period_s > 0.0 {
                    TAU * time_s / period_s
                } else {
                    0.0
                };
                Some(*center + Vec2::from_angle(phase) * *radius)
            }
        }
    }
}

/// Summary of a headless run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RunStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Timestamp of the last frame, in milliseconds.
    pub last_t_ms: f64,
    /// Focal point after the last frame.
    pub final_focal: Point,
    /// Wrapped grain offset after the last frame.
    pub grain_offset: Vec2,
    /// Fills composited by the surface, including forced paints.
    pub fills: u64,
}

/// Drives a mounted [`HeadlessBackdrop`] frame by frame.
pub struct HeadlessRun {
    backdrop: HeadlessBackdrop,
    opts: HeadlessOpts,
}

impl HeadlessRun {
    /// Build and mount a backdrop on a fresh CPU surface.
    pub fn new(config: BackdropConfig, opts: HeadlessOpts) -> GlowfieldResult<Self> {
        opts.validate()?;
        let host = StaticHost::new(Size::new(opts.width, opts.height), opts.device_pixel_ratio);
        let mut backdrop = Backdrop::new(config, CpuSurface::new(), ManualScheduler::new(), host)?;
        backdrop.mount();
        Ok(Self { backdrop, opts })
    }

    pub fn backdrop(&self) -> &HeadlessBackdrop {
        &self.backdrop
    }

    pub fn backdrop_mut(&mut self) -> &mut HeadlessBackdrop {
        &mut self.backdrop
    }

    pub fn opts(&self) -> &HeadlessOpts {
        &self.opts
    }

    /// Deliver an optional pointer move, then the due frame callback at `t_ms`.
    pub fn render_frame_at(&mut self, t_ms: f64, pointer: Option<Point>) -> GlowfieldResult<FrameRGBA> {
        if let Some(client) = pointer {
            self.backdrop.on_pointer(&PointerEvent::Move { client });
        }
        deliver_frame(&mut self.backdrop, t_ms)?;
        Ok(self.backdrop.surface().snapshot())
    }

    /// Step at the configured rate until `t_ms` and return the frame painted at `t_ms`.
    pub fn render_until(&mut self, t_ms: f64, path: &PointerPath) -> GlowfieldResult<FrameRGBA> {
        let interval = self.opts.frame_interval_ms();
        let steps = (t_ms.max(0.0) / interval).floor() as u64;
        for i in 0..steps {
            let t = i as f64 * interval;
            self.step(i, t, path)?;
        }
        let frame = self.step(steps, t_ms.max(0.0), path)?;
        Ok(frame)
    }

    /// Render `frames` frames along `path` into `sink`.
    #[tracing::instrument(level = "debug", skip_all, fields(frames = frames))]
    pub fn run(
        &mut self,
        frames: u64,
        path: &PointerPath,
        sink: &mut dyn FrameSink,
    ) -> GlowfieldResult<RunStats> {
        let metrics = self
            .backdrop
            .metrics()
            .copied()
            .ok_or_else(|| GlowfieldError::render("backdrop was never measured"))?;
        sink.begin(SinkConfig {
            width: metrics.buffer_width,
            height: metrics.buffer_height,
            fps: self.opts.fps,
        })?;

        let interval = self.opts.frame_interval_ms();
        let mut last_t_ms = 0.0;
        for i in 0..frames {
            last_t_ms = i as f64 * interval;
            let frame = self.step(i, last_t_ms, path)?;
            sink.push_frame(i, &frame)?;
        }
        sink.end()?;

        let stats = RunStats {
            frames,
            last_t_ms,
            final_focal: self.backdrop.focal(),
            grain_offset: self.backdrop.grain().offset(),
            fills: self.backdrop.surface().fills(),
        };
        tracing::debug!(?stats, "headless run finished");
        Ok(stats)
    }

    fn step(&mut self, idx: u64, t_ms: f64, path: &PointerPath) -> GlowfieldResult<FrameRGBA> {
        let pointer = path.position_at(idx, t_ms / 1000.0);
        self.render_frame_at(t_ms, pointer)
    }
}

/// Draw commands issued by the frame at `t_ms` (after mount and its forced paint).
pub fn trace_frame(
    config: BackdropConfig,
    opts: HeadlessOpts,
    t_ms: f64,
    pointer: Option<Point>,
) -> GlowfieldResult<Vec<DrawCommand>> {
    opts.validate()?;
    let host = StaticHost::new(Size::new(opts.width, opts.height), opts.device_pixel_ratio);
    let mut backdrop = Backdrop::new(config, RecordingSurface::new(), ManualScheduler::new(), host)?;
    backdrop.mount();
    backdrop.surface_mut().take_commands();

    if let Some(client) = pointer {
        backdrop.on_pointer(&PointerEvent::Move { client });
    }
    deliver_frame(&mut backdrop, t_ms)?;
    Ok(backdrop.surface_mut().take_commands())
}

/// Fire the due frame callback at `t_ms`; an empty queue or a rejected callback is an error.
fn deliver_frame<S: DrawSurface>(
    backdrop: &mut Backdrop<S, ManualScheduler, StaticHost>,
    t_ms: f64,
) -> GlowfieldResult<()> {
    let handle = backdrop
        .scheduler_mut()
        .take_due()
        .ok_or_else(|| GlowfieldError::render("frame loop is not running"))?;
    if !backdrop.on_animation_frame(handle, t_ms) {
        return Err(GlowfieldError::render("frame callback was rejected"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/headless.rs"]
mod tests;
