use std::path::Path;

use crate::foundation::error::{GlowfieldError, GlowfieldResult};
use crate::scene::motion::{FocalSmoother, GrainParams};
use crate::scene::noise::NoiseParams;

/// Backdrop tunables.
///
/// Every field has a default, so `{}` is a valid configuration. Unknown keys are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    /// Fraction of the remaining pointer distance the focal point covers per frame.
    pub smoothing: f64,
    /// Number of particle dots.
    pub particle_count: usize,
    pub noise: NoiseParams,
    pub grain: GrainParams,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            smoothing: FocalSmoother::DEFAULT_FACTOR,
            particle_count: 0,
            noise: NoiseParams::default(),
            grain: GrainParams::default(),
            seed: None,
        }
    }
}

impl BackdropConfig {
    /// Upper bound on `particle_count`.
    pub const MAX_PARTICLES: usize = 100_000;

    pub fn validate(&self) -> GlowfieldResult<()> {
        if !self.smoothing.is_finite() || !(0.0..=1.0).contains(&self.smoothing) {
            return Err(GlowfieldError::validation("smoothing must be in [0, 1]"));
        }
        if self.particle_count > Self::MAX_PARTICLES {
            return Err(GlowfieldError::validation(format!(
                "particle_count must be <= {}",
                Self::MAX_PARTICLES
            )));
        }
        self.noise.validate()?;

        let g = &self.grain;
        if !g.scale.is_finite() || g.scale <= 0.0 {
            return Err(GlowfieldError::validation("grain.scale must be finite and > 0"));
        }
        if !g.alpha.is_finite() || !(0.0..=1.0).contains(&g.alpha) {
            return Err(GlowfieldError::validation("grain.alpha must be in [0, 1]"));
        }
        if !g.parallax.is_finite() {
            return Err(GlowfieldError::validation("grain.parallax must be finite"));
        }
        if !g.drift.iter().all(|v| v.is_finite()) {
            return Err(GlowfieldError::validation("grain.drift must be finite"));
        }
        if !g.rotate_speed.is_finite() {
            return Err(GlowfieldError::validation(
                "grain.rotate_speed must be finite",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> GlowfieldResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| GlowfieldError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GlowfieldResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config '{}': {e}", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> GlowfieldResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GlowfieldError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
