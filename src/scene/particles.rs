//! Sparse drifting dots.

use rand::Rng;

use crate::foundation::core::{Point, Size, Vec2};

/// A single floating dot.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    /// Position in logical units.
    pub pos: Point,
    /// Velocity in logical units per frame.
    pub vel: Vec2,
    /// Dot radius.
    pub radius: f64,
}

impl Particle {
    /// Advance one frame and wrap toroidally into `[0, bounds]`.
    ///
    /// A small sinusoidal wobble derived from the time and the other coordinate keeps the drift
    /// from looking linear.
    pub fn step(&mut self, time: f64, bounds: Size) {
        self.pos.x += self.vel.x + (time + self.pos.y * 0.01).sin() * 0.03;
        self.pos.y += self.vel.y + (time + self.pos.x * 0.01).cos() * 0.03;
        if self.pos.x < 0.0 {
            self.pos.x = bounds.width;
        }
        if self.pos.x > bounds.width {
            self.pos.x = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = bounds.height;
        }
        if self.pos.y > bounds.height {
            self.pos.y = 0.0;
        }
    }
}

/// Fixed-size particle collection, regenerated on every resize.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Peak-to-peak range of each velocity component.
    pub const SPEED: f64 = 0.15;
    /// Smallest radius.
    pub const MIN_RADIUS: f64 = 0.1;
    /// Radius range above [`Self::MIN_RADIUS`].
    pub const RADIUS_SPAN: f64 = 0.6;

    /// Scatter `count` particles uniformly over `bounds`.
    pub fn scatter(count: usize, bounds: Size, rng: &mut impl Rng) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                pos: Point::new(
                    rng.r#gen::<f64>() * bounds.width,
                    rng.r#gen::<f64>() * bounds.height,
                ),
                vel: Vec2::new(
                    (rng.r#gen::<f64>() - 0.5) * Self::SPEED,
                    (rng.r#gen::<f64>() - 0.5) * Self::SPEED,
                ),
                radius: rng.r#gen::<f64>() * Self::RADIUS_SPAN + Self::MIN_RADIUS,
            })
            .collect();
        Self { particles }
    }

    /// Advance every particle one frame.
    pub fn step(&mut self, time: f64, bounds: Size) {
        for p in &mut self.particles {
            p.step(time, bounds);
        }
    }

    /// Current particles.
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/particles.rs"]
mod tests;
