//! Uniform sampling service consumed by stochastic light sampling.

use lumen_math::Vec2;
use rand::Rng;

/// A source of independent uniform values in `[0, 1)`.
///
/// Implementations own their state, so a rendering thread samples through
/// `&mut` on its own stream and the lights it queries stay immutable.
pub trait UniformSampler {
    /// Draw the next value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Draw two independent values in `[0, 1)`.
    fn next_2d(&mut self) -> Vec2 {
        let u = self.next_f32();
        let v = self.next_f32();
        Vec2::new(u, v)
    }
}

impl<R: Rng + ?Sized> UniformSampler for R {
    #[inline]
    fn next_f32(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Useful for stratified callers that precompute their sample positions and
/// for deterministic tests. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SequenceSampler {
    values: Vec<f32>,
    next: usize,
}

impl SequenceSampler {
    /// Largest `f32` strictly below one.
    const ONE_MINUS_EPSILON: f32 = 1.0 - f32::EPSILON / 2.0;

    pub fn new(values: Vec<f32>) -> Self {
        if values.is_empty() {
            log::warn!("SequenceSampler created without values, it will only produce 0.0");
        }
        Self { values, next: 0 }
    }
}

impl UniformSampler for SequenceSampler {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next % self.values.len()];
        self.next = (self.next + 1) % self.values.len();
        value.clamp(0.0, Self::ONE_MINUS_EPSILON)
    }
}
