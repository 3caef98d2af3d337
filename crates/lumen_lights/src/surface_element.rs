//! Sampled points on emitting surfaces.

use lumen_math::Vec3;

/// A point sampled on a light together with its orientation and the density
/// it was drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceElement {
    /// Sampled position in world space
    pub point: Vec3,
    /// Unit normal of the emitting side
    pub normal: Vec3,
    /// Sampling density with respect to surface area (1 / area for uniform sampling)
    pub pdf_area: f32,
}

impl SurfaceElement {
    pub fn new(point: Vec3, normal: Vec3, pdf_area: f32) -> Self {
        Self {
            point,
            normal,
            pdf_area,
        }
    }

    /// Returns true if `reference` is on the emitting side of the element.
    pub fn faces(&self, reference: Vec3) -> bool {
        self.normal.dot(reference - self.point) > 0.0
    }

    /// Convert the area density to a density over solid angle as seen from
    /// `reference`: `pdf_area · d² / cos θ`.
    ///
    /// Returns `None` when the reference point sees the back of the element,
    /// lies in its plane, or coincides with it.
    pub fn pdf_solid_angle(&self, reference: Vec3) -> Option<f32> {
        let to_reference = reference - self.point;
        let dist_sqr = to_reference.length_squared();
        if dist_sqr == 0.0 {
            return None;
        }

        let cos_theta = self.normal.dot(to_reference) / dist_sqr.sqrt();
        if cos_theta <= 0.0 {
            return None;
        }

        Some(self.pdf_area * dist_sqr / cos_theta)
    }
}
