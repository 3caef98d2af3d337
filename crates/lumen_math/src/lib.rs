// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod frame;
mod interval;
mod ray;
mod transform;

pub use aabb::Aabb;
pub use frame::CoordinateFrame;
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transformation;

/// Tolerance used when deciding whether a length is zero.
pub const DEGENERATE_EPSILON: f32 = 1e-8;
