//! Direct-lighting irradiance estimation.
//!
//! The minimal consumer of the light contract:
//! - asks each light for its sample count
//! - draws that many uniform surface elements per shading point
//! - weights them by the geometry term and the area density
//! - adds each light's ambient floor independent of sampling

use std::f32::consts::PI;

use lumen_core::{TriangleMesh, UniformSampler};
use lumen_math::{Interval, Ray, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::{AreaLight, LightSet};

/// Fraction of a shadow segment ignored at each end.
pub const SHADOW_EPSILON: f32 = 1e-4;

/// Estimate the irradiance arriving at `point` on a surface with unit
/// `normal`.
///
/// `visible(from, to)` reports whether the segment between the shading point
/// and a light sample is unoccluded. It is only consulted for lights that
/// create shadows.
pub fn estimate_irradiance<F>(
    lights: &LightSet,
    point: Vec3,
    normal: Vec3,
    sampler: &mut dyn UniformSampler,
    visible: F,
) -> f32
where
    F: Fn(Vec3, Vec3) -> bool,
{
    let mut irradiance = 0.0;

    for light in lights {
        // Constant radiance over the hemisphere integrates to π·L
        irradiance += PI * light.ambient_radiance().value();

        let radiance = light.emitted_radiance().value();
        if radiance == 0.0 {
            continue;
        }

        let sample_count = light.number_of_samples().max(1);
        let mut sum = 0.0;

        for _ in 0..sample_count {
            let element = light.random_surface_element(sampler);
            let to_light = element.point - point;
            let dist_sqr = to_light.length_squared();
            if dist_sqr == 0.0 {
                continue;
            }

            let wi = to_light / dist_sqr.sqrt();
            let cos_receiver = normal.dot(wi);
            let cos_light = -element.normal.dot(wi);
            if cos_receiver <= 0.0 || cos_light <= 0.0 {
                continue;
            }

            if light.creates_shadows() && !visible(point, element.point) {
                continue;
            }

            sum += radiance * cos_receiver * cos_light / (dist_sqr * element.pdf_area);
        }

        irradiance += sum / sample_count as f32;
    }

    irradiance
}

/// Estimate irradiance for many `(point, normal)` receivers in parallel.
///
/// Every receiver gets its own random stream derived from `seed`, so the
/// result does not depend on how rayon schedules the work.
pub fn estimate_irradiance_parallel<F>(
    lights: &LightSet,
    receivers: &[(Vec3, Vec3)],
    seed: u64,
    visible: F,
) -> Vec<f32>
where
    F: Fn(Vec3, Vec3) -> bool + Sync,
{
    receivers
        .par_iter()
        .enumerate()
        .map(|(i, &(point, normal))| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            estimate_irradiance(lights, point, normal, &mut rng, &visible)
        })
        .collect()
}

/// Visibility predicate that tests shadow segments against occluder meshes.
pub fn mesh_visibility(occluders: &[TriangleMesh]) -> impl Fn(Vec3, Vec3) -> bool + Sync + '_ {
    move |from, to| {
        let ray = Ray::between(from, to);
        let segment = Interval::shadow_segment(SHADOW_EPSILON);
        !occluders.iter().any(|mesh| mesh.occludes(&ray, segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LightSetBuilder, RectangularAreaLight};
    use lumen_core::{Power, Radiance};

    fn always_visible(_: Vec3, _: Vec3) -> bool {
        true
    }

    /// 2 x 2 light at height `h` above the origin facing down.
    fn overhead_light(h: f32, power: f32) -> RectangularAreaLight {
        RectangularAreaLight::new(
            Vec3::new(0.0, 0.0, h),
            Vec3::NEG_Z,
            Vec3::new(2.0, 0.0, 0.0),
            2.0,
            Power::new(power),
        )
        .unwrap()
        .with_number_of_samples(16)
    }

    fn single(light: RectangularAreaLight) -> LightSet {
        let mut builder = LightSetBuilder::new();
        builder.add(Box::new(light));
        builder.freeze()
    }

    #[test]
    fn test_far_field_irradiance() {
        let _ = env_logger::builder().is_test(true).try_init();

        let d = 50.0;
        let lights = single(overhead_light(d, 100.0));
        let mut rng = StdRng::seed_from_u64(42);

        let e = estimate_irradiance(&lights, Vec3::ZERO, Vec3::Z, &mut rng, always_visible);

        // E ≈ L·A / d² = Φ / (π d²) for a small, distant emitter
        let expected = 100.0 / (PI * d * d);
        assert!((e - expected).abs() / expected < 0.01, "e = {}, expected = {}", e, expected);
    }

    #[test]
    fn test_back_side_receives_nothing() {
        let lights = single(overhead_light(5.0, 100.0));
        let mut rng = StdRng::seed_from_u64(1);

        // Receiver facing away from the light
        let e = estimate_irradiance(&lights, Vec3::ZERO, Vec3::NEG_Z, &mut rng, always_visible);
        assert_eq!(e, 0.0);

        // Receiver behind the emitting side
        let e = estimate_irradiance(&lights, Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z, &mut rng, always_visible);
        assert_eq!(e, 0.0);
    }

    #[test]
    fn test_occluder_blocks_only_shadow_casting_lights() {
        let blocker = TriangleMesh::from_triangles(&[
            [
                Vec3::new(-10.0, -10.0, 2.0),
                Vec3::new(10.0, -10.0, 2.0),
                Vec3::new(10.0, 10.0, 2.0),
            ],
            [
                Vec3::new(-10.0, -10.0, 2.0),
                Vec3::new(10.0, 10.0, 2.0),
                Vec3::new(-10.0, 10.0, 2.0),
            ],
        ]);
        let occluders = [blocker];
        let visible = mesh_visibility(&occluders);

        let lights = single(overhead_light(5.0, 100.0));
        let mut rng = StdRng::seed_from_u64(2);
        let shadowed = estimate_irradiance(&lights, Vec3::ZERO, Vec3::Z, &mut rng, &visible);
        assert_eq!(shadowed, 0.0);

        let mut light = overhead_light(5.0, 100.0);
        light.set_creates_shadows(false);
        let lights = single(light);
        let unshadowed = estimate_irradiance(&lights, Vec3::ZERO, Vec3::Z, &mut rng, &visible);
        assert!(unshadowed > 0.0);
    }

    #[test]
    fn test_light_mesh_does_not_shadow_itself() {
        let lights = single(overhead_light(5.0, 100.0));
        let meshes = lights.meshes();
        let visible = mesh_visibility(&meshes);
        let mut rng = StdRng::seed_from_u64(3);

        let with_mesh = estimate_irradiance(&lights, Vec3::ZERO, Vec3::Z, &mut rng, &visible);
        assert!(with_mesh > 0.0);
    }

    #[test]
    fn test_ambient_floor() {
        let mut light = overhead_light(5.0, 0.0);
        light.set_ambient_radiance(Radiance::new(0.5));
        let lights = single(light);
        let mut rng = StdRng::seed_from_u64(4);

        // Facing away: only the ambient term remains
        let e = estimate_irradiance(&lights, Vec3::ZERO, Vec3::NEG_Z, &mut rng, always_visible);
        assert!((e - 0.5 * PI).abs() < 1e-5);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let lights = single(overhead_light(3.0, 100.0));
        let receivers: Vec<(Vec3, Vec3)> = (0..32)
            .map(|i| (Vec3::new(i as f32 * 0.25 - 4.0, 0.0, 0.0), Vec3::Z))
            .collect();

        let parallel = estimate_irradiance_parallel(&lights, &receivers, 9, always_visible);
        assert_eq!(parallel.len(), receivers.len());

        for (i, &(point, normal)) in receivers.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(9 + i as u64);
            let sequential = estimate_irradiance(&lights, point, normal, &mut rng, always_visible);
            assert_eq!(parallel[i], sequential);
        }
    }
}
