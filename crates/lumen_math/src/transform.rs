// Linear and affine transformations applied to scene objects.
//
// Points and vectors are both glam::Vec3; the caller picks apply_point or
// apply_vector to say which one it is holding.

use glam::{Affine3A, Mat3, Vec3};

/// Smallest `|det| / (|c0| · |c1| · |c2|)` for a map to count as invertible.
///
/// The ratio is the volume of the parallelepiped spanned by the unit
/// columns, so it ignores overall scale.
const SINGULAR_TOLERANCE: f32 = 1e-6;

/// A transformation of 3D space, either purely linear or linear plus a
/// translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transformation {
    /// Rotation, scale, shear, reflection. Points are treated as offsets
    /// from the world origin.
    Linear(Mat3),
    /// A linear map followed by a translation.
    Affine(Affine3A),
}

impl Transformation {
    /// Transform a location. Only the affine form translates.
    pub fn apply_point(&self, point: Vec3) -> Vec3 {
        match self {
            Transformation::Linear(m) => *m * point,
            Transformation::Affine(a) => a.transform_point3(point),
        }
    }

    /// Transform an offset or edge. Translation never applies to vectors.
    pub fn apply_vector(&self, vector: Vec3) -> Vec3 {
        match self {
            Transformation::Linear(m) => *m * vector,
            Transformation::Affine(a) => a.transform_vector3(vector),
        }
    }

    /// The linear part shared by both forms.
    pub fn linear_part(&self) -> Mat3 {
        match self {
            Transformation::Linear(m) => *m,
            Transformation::Affine(a) => Mat3::from(a.matrix3),
        }
    }

    /// The translation component (zero for linear maps).
    pub fn translation(&self) -> Vec3 {
        match self {
            Transformation::Linear(_) => Vec3::ZERO,
            Transformation::Affine(a) => Vec3::from(a.translation),
        }
    }

    pub fn determinant(&self) -> f32 {
        self.linear_part().determinant()
    }

    /// Returns true if every entry is finite and the linear part is not
    /// singular.
    ///
    /// The determinant is compared relative to the column lengths, so small
    /// uniform scales (metres to millimetres) stay invertible.
    pub fn is_invertible(&self) -> bool {
        let m = self.linear_part();
        if !(m.is_finite() && self.translation().is_finite()) {
            return false;
        }
        let column_volume = m.x_axis.length() * m.y_axis.length() * m.z_axis.length();
        m.determinant().abs() > SINGULAR_TOLERANCE * column_volume
    }
}

impl From<Mat3> for Transformation {
    fn from(m: Mat3) -> Self {
        Transformation::Linear(m)
    }
}

impl From<Affine3A> for Transformation {
    fn from(a: Affine3A) -> Self {
        Transformation::Affine(a)
    }
}
