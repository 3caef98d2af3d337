use crate::{Interval, Ray, Vec3};

/// Axis-aligned bounding box.
///
/// Flat emitters have zero thickness along their normal, so boxes built from
/// points are padded to a minimum extent on every axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Minimum extent per axis.
    const PADDING: f32 = 0.0001;

    /// An empty box (contains nothing, identity for `surrounding`).
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create the smallest box containing every point.
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::EMPTY;
        }

        let mut min = Vec3::INFINITY;
        let mut max = Vec3::NEG_INFINITY;
        for &p in points {
            min = min.min(p);
            max = max.max(p);
        }

        let mut aabb = Self { min, max };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create a box that surrounds two other boxes.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Returns true if the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.max.cmplt(self.min).any()
    }

    /// Test if a ray intersects this box within the given parameter interval.
    ///
    /// Slab method, all three axes at once.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> bool {
        if self.is_empty() {
            return false;
        }

        let inv_dir = ray.direction.recip();
        let t0 = (self.min - ray.origin) * inv_dir;
        let t1 = (self.max - ray.origin) * inv_dir;
        let t_near = t0.min(t1).max_element().max(ray_t.min);
        let t_far = t0.max(t1).min_element().min(ray_t.max);

        t_near <= t_far
    }

    fn pad_to_minimums(&mut self) {
        let extent = self.max - self.min;
        let pad = Vec3::select(
            extent.cmplt(Vec3::splat(Self::PADDING)),
            Vec3::splat(Self::PADDING * 0.5),
            Vec3::ZERO,
        );
        self.min -= pad;
        self.max += pad;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(3.0, -4.0, 5.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]);

        assert_eq!(aabb.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 2.0, 5.0));
    }

    #[test]
    fn test_flat_aabb_is_padded() {
        let aabb = Aabb::from_points(&[Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)]);

        assert!(aabb.max.z > aabb.min.z);
        assert!((aabb.max.z - aabb.min.z - 0.0001).abs() < 1e-6);
        assert_eq!(aabb.min.x, -1.0);
    }

    #[test]
    fn test_aabb_surrounding() {
        let a = Aabb::from_points(&[Vec3::ZERO, Vec3::splat(5.0)]);
        let b = Aabb::from_points(&[Vec3::splat(3.0), Vec3::splat(10.0)]);
        let both = Aabb::surrounding(&a, &b);

        assert_eq!(both.min, Vec3::ZERO);
        assert_eq!(both.max, Vec3::splat(10.0));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &a), a);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(&[Vec3::splat(-1.0), Vec3::splat(1.0)]);

        let toward = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.hit(&toward, Interval::new(0.0, 100.0)));

        let away = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!aabb.hit(&away, Interval::new(0.0, 100.0)));

        let beside = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(!aabb.hit(&beside, Interval::new(0.0, 100.0)));

        // Segment stops before reaching the box
        assert!(!aabb.hit(&toward, Interval::new(0.0, 1.0)));
        assert!(!Aabb::EMPTY.hit(&toward, Interval::FORWARD));
    }
}
