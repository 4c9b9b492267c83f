use rand::Rng;

use crate::foundation::error::{GlowfieldError, GlowfieldResult};

/// Noise synthesis parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseParams {
    /// Side of the square texture in texels.
    pub size: u32,
    /// Side of each constant-valued block; 1 means per-texel noise.
    pub block_size: u32,
    /// Contrast multiplier applied around mid-gray before clamping.
    pub contrast: f64,
    /// Force every block to one of two fixed levels.
    pub binarize: bool,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            size: 128,
            block_size: 1,
            contrast: 2.0,
            binarize: false,
        }
    }
}

impl NoiseParams {
    /// Largest accepted texture side.
    pub const MAX_SIZE: u32 = 4096;

    /// Check ranges.
    pub fn validate(&self) -> GlowfieldResult<()> {
        if self.size == 0 || self.size > Self::MAX_SIZE {
            return Err(GlowfieldError::validation(format!(
                "noise size must be in 1..={}",
                Self::MAX_SIZE
            )));
        }
        if !self.contrast.is_finite() || self.contrast < 0.0 {
            return Err(GlowfieldError::validation(
                "noise contrast must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Level used for dark blocks when binarizing.
pub const BINARY_LOW: u8 = 70;
/// Level used for light blocks when binarizing.
pub const BINARY_HIGH: u8 = 200;

/// Square, opaque, grayscale noise image (RGBA8, row-major).
///
/// Opaque texels make the straight and premultiplied representations identical.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoiseTexture {
    size: u32,
    rgba: Vec<u8>,
}

impl NoiseTexture {
    /// Synthesize a texture.
    pub fn build(params: &NoiseParams, rng: &mut impl Rng) -> GlowfieldResult<Self> {
        params.validate()?;
        let size = params.size as usize;
        let block = params.block_size.max(1) as usize;
        let mut rgba = vec![0u8; size * size * 4];

        for by in (0..size).step_by(block) {
            for bx in (0..size).step_by(block) {
                let v = texel_value(rng.gen_range(-0.5..0.5), params.contrast, params.binarize);
                for y in by..(by + block).min(size) {
                    for x in bx..(bx + block).min(size) {
                        let i = (y * size + x) * 4;
                        rgba[i..i + 4].copy_from_slice(&[v, v, v, 255]);
                    }
                }
            }
        }

        Ok(Self {
            size: params.size,
            rgba,
        })
    }

    /// Side length in texels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    /// Texel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.size as usize) + (x as usize)) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }
}

/// Map one uniform sample in `[-0.5, 0.5)` to a gray level.
pub fn texel_value(sample: f64, contrast: f64, binarize: bool) -> u8 {
    let r = (sample * contrast).clamp(-0.5, 0.5);
    let v = ((r + 0.5) * 255.0).round() as u8;
    if binarize {
        if v < 128 { BINARY_LOW } else { BINARY_HIGH }
    } else {
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/noise.rs"]
mod tests;
