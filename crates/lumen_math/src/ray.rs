use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Shadow rays between a shading point and a sampled light point use an
/// unnormalized direction so that `t = 1` lands exactly on the light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create the segment ray from `from` to `to`, parameterized over `[0, 1]`.
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to - from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_between_ends_at_target() {
        let from = Vec3::new(1.0, 2.0, 3.0);
        let to = Vec3::new(-4.0, 0.5, 9.0);
        let ray = Ray::between(from, to);

        assert_eq!(ray.origin, from);
        assert!((ray.origin + ray.direction - to).length() < 1e-6);
    }
}
