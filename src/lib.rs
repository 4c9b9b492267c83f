//! Glowfield renders an animated landing-page backdrop.
//!
//! One [`Backdrop`] owns all per-instance state: surface geometry, the pointer target, the
//! smoothed focal point, a particle set and a tileable film-grain texture. The host drives it
//! with events (mount, resize, pointer, visibility, frame callbacks) through three capability
//! traits:
//!
//! - [`DrawSurface`] for painting ([`CpuSurface`] rasterizes, [`RecordingSurface`] records)
//! - [`FrameScheduler`] for per-frame callbacks ([`ManualScheduler`])
//! - [`HostElement`] for measurement and resize observation ([`StaticHost`])
//!
//! [`HeadlessRun`] wires the offline adapters together and streams frames into a [`FrameSink`].
#![forbid(unsafe_code)]

mod foundation;

/// The backdrop component and its frame loop.
pub mod backdrop;
/// JSON configuration.
pub mod config;
pub(crate) mod effects;
/// Frame sinks for offline output.
pub mod encode;
/// Host-side capabilities: element measurement, frame scheduling, input events.
pub mod host;
/// Drawing surfaces and the layered frame painter.
pub mod render;
/// Geometry, pointer, motion, noise and particle state.
pub mod scene;
/// Offline driver.
pub mod session;

pub use crate::foundation::core::{Affine, Point, Rect, Rgba, Rgba8Premul, Size, Vec2};
pub use crate::foundation::error::{GlowfieldError, GlowfieldResult};
pub use crate::foundation::math::wrap_mod;

pub use crate::backdrop::{Backdrop, LoopState};
pub use crate::config::BackdropConfig;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig, write_png};
pub use crate::host::element::{HostElement, StaticHost};
pub use crate::host::input::{PointerEvent, Visibility};
pub use crate::host::schedule::{FrameHandle, FrameScheduler, ManualScheduler};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::draw::{
    BlendMode, ColorStop, DrawState, DrawSurface, FillStyle, Pattern, RadialGradient, StateStack,
};
pub use crate::render::frame::{FrameInputs, FrameRenderer, GrainLayer};
pub use crate::render::record::{DrawCommand, RecordingSurface};
pub use crate::scene::motion::{FocalSmoother, GrainMotion, GrainParams, GrainPlacement};
pub use crate::scene::noise::{NoiseParams, NoiseTexture};
pub use crate::scene::particles::{Particle, ParticleField};
pub use crate::scene::pointer::PointerTracker;
pub use crate::scene::surface::{HostMeasurement, SurfaceMetrics, clamp_pixel_ratio};
pub use crate::session::headless::{
    HeadlessBackdrop, HeadlessOpts, HeadlessRun, PointerPath, RunStats, trace_frame,
};
