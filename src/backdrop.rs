//! The backdrop component: owns all per-instance state and drives the frame loop.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::BackdropConfig;
use crate::foundation::core::Point;
use crate::foundation::error::GlowfieldResult;
use crate::host::element::HostElement;
use crate::host::input::{PointerEvent, Visibility};
use crate::host::schedule::{FrameHandle, FrameScheduler};
use crate::render::draw::{DrawSurface, Pattern};
use crate::render::frame::{FrameInputs, FrameRenderer, GrainLayer};
use crate::scene::motion::{FocalSmoother, GrainMotion};
use crate::scene::noise::NoiseTexture;
use crate::scene::particles::ParticleField;
use crate::scene::pointer::PointerTracker;
use crate::scene::surface::SurfaceMetrics;

/// Frame loop lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopState {
    /// Constructed, not mounted yet.
    Idle,
    /// A frame callback is pending.
    Running,
    /// Host hidden; no callback pending.
    Paused,
    /// Torn down. Terminal.
    Destroyed,
}

/// Animated backdrop bound to a drawing surface, a frame scheduler and a host element.
///
/// Every entry point is an event from the host: mount/unmount, resize notifications, pointer
/// moves, visibility changes and frame callbacks. Events after [`Backdrop::unmount`] are
/// ignored.
pub struct Backdrop<S, F, H> {
    config: BackdropConfig,
    surface: S,
    scheduler: F,
    host: H,

    state: LoopState,
    pending: Option<FrameHandle>,
    metrics: Option<SurfaceMetrics>,

    pointer: PointerTracker,
    smoother: FocalSmoother,
    focal: Point,
    particles: ParticleField,
    grain: GrainMotion,

    noise_built: bool,
    noise: Option<NoiseTexture>,
    pattern: Option<Pattern>,

    rng: StdRng,
    renderer: FrameRenderer,
    frames_painted: u64,
}

impl<S, F, H> Backdrop<S, F, H>
where
    S: DrawSurface,
    F: FrameScheduler,
    H: HostElement,
{
    /// Validate `config` and build an unmounted backdrop.
    pub fn new(config: BackdropConfig, surface: S, scheduler: F, host: H) -> GlowfieldResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            smoother: FocalSmoother::new(config.smoothing),
            grain: GrainMotion::new(config.grain),
            config,
            surface,
            scheduler,
            host,
            state: LoopState::Idle,
            pending: None,
            metrics: None,
            pointer: PointerTracker::default(),
            focal: Point::ORIGIN,
            particles: ParticleField::default(),
            noise_built: false,
            noise: None,
            pattern: None,
            rng,
            renderer: FrameRenderer,
            frames_painted: 0,
        })
    }

    /// Size the surface, start observing the host and schedule the first frame.
    pub fn mount(&mut self) {
        if self.state != LoopState::Idle {
            tracing::debug!(state = ?self.state, "mount ignored");
            return;
        }
        self.on_resize();
        self.host.observe_resize();
        self.state = LoopState::Running;
        self.pending = Some(self.scheduler.request_frame());
        tracing::debug!("backdrop mounted");
    }

    /// Re-measure the host and rebuild everything that depends on the surface size.
    ///
    /// Regenerates particles, re-seeds focal point and pointer target, builds the noise texture
    /// on first use and paints one frame immediately.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn on_resize(&mut self) {
        if self.state == LoopState::Destroyed {
            return;
        }
        let m = SurfaceMetrics::from_measurement(&self.host.measure());
        tracing::debug!(
            width = m.width,
            height = m.height,
            dpr = m.dpr,
            buffer_width = m.buffer_width,
            buffer_height = m.buffer_height,
            "surface resized"
        );
        self.surface.resize(m.buffer_width, m.buffer_height);
        self.surface.set_transform(m.base_transform());

        self.particles = ParticleField::scatter(self.config.particle_count, m.size(), &mut self.rng);
        let seed = m.focal_seed();
        self.focal = seed;
        self.pointer.set_target(seed);
        self.grain.reseed_focal(seed);
        self.metrics = Some(m);

        if !self.noise_built {
            self.build_noise();
        }

        // Before the first frame callback there is no clock to reuse; paint at 0 and leave
        // the clock unset so the first callback integrates no drift.
        let last = self.grain.last_timestamp();
        self.paint(last.unwrap_or(0.0));
        if last.is_none() {
            self.grain.reset_clock();
        }
    }

    fn build_noise(&mut self) {
        self.noise_built = true;
        match NoiseTexture::build(&self.config.noise, &mut self.rng) {
            Ok(tex) => {
                self.pattern = Some(self.surface.create_pattern(&tex));
                self.noise = Some(tex);
            }
            Err(e) => tracing::warn!(error = %e, "noise texture not built; grain disabled"),
        }
    }

    /// Store a pointer/touch position relative to the surface.
    pub fn on_pointer(&mut self, event: &PointerEvent) {
        if self.state == LoopState::Destroyed {
            return;
        }
        // The element can scroll or move without a resize notification.
        let origin = self.host.measure().element.origin();
        self.pointer.handle_event(event, origin);
    }

    /// Shared handle for writing pointer targets from an input handler.
    pub fn pointer_handle(&self) -> PointerTracker {
        self.pointer.clone()
    }

    /// Pause on hidden, resume with a fresh callback chain on visible.
    pub fn on_visibility(&mut self, visibility: Visibility) {
        match (self.state, visibility) {
            (LoopState::Running, Visibility::Hidden) => {
                if let Some(h) = self.pending.take() {
                    self.scheduler.cancel_frame(h);
                }
                self.state = LoopState::Paused;
                tracing::debug!("frame loop paused");
            }
            (LoopState::Paused, Visibility::Visible) => {
                self.grain.reset_clock();
                self.state = LoopState::Running;
                self.pending = Some(self.scheduler.request_frame());
                tracing::debug!("frame loop resumed");
            }
            _ => {}
        }
    }

    /// Frame callback. Paints and schedules the next frame.
    ///
    /// Returns `false` when the handle is not the pending one or the loop is not running.
    pub fn on_animation_frame(&mut self, handle: FrameHandle, t_ms: f64) -> bool {
        if self.state != LoopState::Running || self.pending != Some(handle) {
            tracing::trace!(handle = handle.0, state = ?self.state, "stale frame callback");
            return false;
        }
        self.pending = None;
        self.paint(t_ms);
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    /// Advance motion and paint one frame at `t_ms`. Skipped while the surface is not ready.
    pub fn paint(&mut self, t_ms: f64) {
        if self.state == LoopState::Destroyed {
            return;
        }
        let Some(m) = self.metrics else {
            tracing::trace!("frame skipped: not measured");
            return;
        };
        if !self.surface.is_ready() {
            tracing::trace!("frame skipped: surface not ready");
            return;
        }

        let time = t_ms / 1000.0;
        self.focal = self.smoother.step(self.focal, self.pointer.target());

        let grain = match (self.pattern, &self.noise) {
            (Some(pattern), Some(tex)) => {
                let tile = self.grain.tile_for(tex.size());
                Some(GrainLayer {
                    pattern,
                    placement: self.grain.advance(t_ms, self.focal, tile),
                    scale: self.grain.params().scale,
                })
            }
            _ => None,
        };
        self.grain.remember_focal(self.focal);
        self.particles.step(time, m.size());

        self.renderer.paint(
            &mut self.surface,
            &FrameInputs {
                metrics: &m,
                focal: self.focal,
                time,
                grain,
                particles: self.particles.as_slice(),
            },
        );
        self.frames_painted += 1;
    }

    /// Cancel the pending callback, stop observing the host and enter `Destroyed`.
    pub fn unmount(&mut self) {
        if self.state == LoopState::Destroyed {
            return;
        }
        if let Some(h) = self.pending.take() {
            self.scheduler.cancel_frame(h);
        }
        self.host.disconnect();
        self.state = LoopState::Destroyed;
        tracing::debug!(frames = self.frames_painted, "backdrop unmounted");
    }
}

impl<S, F, H> Backdrop<S, F, H> {
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// Displayed focal point.
    pub fn focal(&self) -> Point {
        self.focal
    }

    /// Current pointer target.
    pub fn pointer_target(&self) -> Point {
        self.pointer.target()
    }

    /// Latest surface metrics; `None` before the first resize.
    pub fn metrics(&self) -> Option<&SurfaceMetrics> {
        self.metrics.as_ref()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn grain(&self) -> &GrainMotion {
        &self.grain
    }

    /// Whether texture synthesis has run (successfully or not).
    pub fn noise_built(&self) -> bool {
        self.noise_built
    }

    pub fn noise(&self) -> Option<&NoiseTexture> {
        self.noise.as_ref()
    }

    /// Callback handle the loop is waiting on.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames painted so far, including forced paints after resize.
    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
#[path = "../tests/unit/backdrop.rs"]
mod tests;
