/// A closed range of ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Shrink the upper end, used to keep the closest hit so far.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// The open segment between a shading point and a light sample, padded at
    /// both ends so neither endpoint's own surface counts as an occluder.
    pub fn shadow_segment(epsilon: f32) -> Interval {
        Interval::new(epsilon, 1.0 - epsilon)
    }

    /// Everything in front of the ray origin.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f32::INFINITY,
    };
}
