//! Coordinate frames for placing objects in world space.

use glam::{Mat3, Vec3};

/// An origin plus three basis vectors embedded in world space.
///
/// The basis is stored as the columns of a `Mat3`. It is usually orthonormal
/// but this is not enforced; a frame read back from a sheared light keeps the
/// sheared edge directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateFrame {
    pub origin: Vec3,
    pub basis: Mat3,
}

impl Default for CoordinateFrame {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            basis: Mat3::IDENTITY,
        }
    }
}

impl CoordinateFrame {
    /// Create a frame from an origin and three axes.
    pub fn new(origin: Vec3, x_axis: Vec3, y_axis: Vec3, z_axis: Vec3) -> Self {
        Self {
            origin,
            basis: Mat3::from_cols(x_axis, y_axis, z_axis),
        }
    }

    #[inline]
    pub fn x_axis(&self) -> Vec3 {
        self.basis.x_axis
    }

    #[inline]
    pub fn y_axis(&self) -> Vec3 {
        self.basis.y_axis
    }

    #[inline]
    pub fn z_axis(&self) -> Vec3 {
        self.basis.z_axis
    }

    /// Returns true if the axes are unit length and mutually perpendicular.
    pub fn is_orthonormal(&self, epsilon: f32) -> bool {
        let (x, y, z) = (self.x_axis(), self.y_axis(), self.z_axis());
        (x.length() - 1.0).abs() < epsilon
            && (y.length() - 1.0).abs() < epsilon
            && (z.length() - 1.0).abs() < epsilon
            && x.dot(y).abs() < epsilon
            && y.dot(z).abs() < epsilon
            && z.dot(x).abs() < epsilon
    }
}
