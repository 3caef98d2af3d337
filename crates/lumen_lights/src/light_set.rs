//! Scene lights across the setup and render phases.
//!
//! During setup lights are owned mutably by a [`LightSetBuilder`] and can be
//! moved around. [`LightSetBuilder::freeze`] turns them into an immutable,
//! shareable [`LightSet`] that rendering threads read without locking.

use std::sync::Arc;

use lumen_core::{Power, TriangleMesh};
use lumen_math::{Aabb, Transformation};

use crate::{AreaLight, LightError, LightResult};

/// Mutable collection of lights used while the scene is being set up.
#[derive(Debug, Default)]
pub struct LightSetBuilder {
    lights: Vec<Box<dyn AreaLight>>,
}

impl LightSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a light and return its ID.
    pub fn add(&mut self, light: Box<dyn AreaLight>) -> usize {
        let id = self.lights.len();
        self.lights.push(light);
        id
    }

    /// Get a light by ID for further setup.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut Box<dyn AreaLight>> {
        self.lights.get_mut(id)
    }

    /// Apply the same transformation to every light.
    ///
    /// Either every light moves or, if any light rejects the map, none does.
    pub fn apply_transformation_to_all(&mut self, transformation: &Transformation) -> LightResult<()> {
        if !transformation.is_invertible() {
            return Err(LightError::InvalidTransformation(format!(
                "map is singular or non-finite (determinant {})",
                transformation.determinant()
            )));
        }

        let transformed = self
            .lights
            .iter()
            .map(|light| light.transformed(transformation))
            .collect::<LightResult<Vec<_>>>()?;
        self.lights = transformed;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// End the setup phase.
    pub fn freeze(self) -> LightSet {
        let lights: Arc<[Arc<dyn AreaLight>]> = self
            .lights
            .into_iter()
            .map(Arc::<dyn AreaLight>::from)
            .collect();
        let set = LightSet { lights };

        log::info!(
            "Froze {} area lights, total power {}",
            set.len(),
            set.total_power()
        );
        set
    }
}

/// Immutable lights shared by all rendering threads.
///
/// Cloning is cheap; clones share the same lights.
#[derive(Debug, Clone)]
pub struct LightSet {
    lights: Arc<[Arc<dyn AreaLight>]>,
}

impl Default for LightSet {
    fn default() -> Self {
        LightSetBuilder::new().freeze()
    }
}

impl LightSet {
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Arc<dyn AreaLight>> {
        self.lights.get(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn AreaLight>> {
        self.lights.iter()
    }

    /// Sum of the configured power of every light.
    pub fn total_power(&self) -> Power {
        self.lights.iter().map(|light| light.total_power()).sum()
    }

    /// One mesh per light, for registering with the visibility structure.
    pub fn meshes(&self) -> Vec<TriangleMesh> {
        self.lights.iter().map(|light| light.mesh()).collect()
    }

    /// Bounding box around every light.
    pub fn bounds(&self) -> Aabb {
        self.lights
            .iter()
            .fold(Aabb::EMPTY, |acc, light| Aabb::surrounding(&acc, &light.mesh().bounds))
    }
}

impl<'a> IntoIterator for &'a LightSet {
    type Item = &'a Arc<dyn AreaLight>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn AreaLight>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RectangularAreaLight;
    use lumen_math::{Affine3A, Mat3, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn light_at(center: Vec3, power: f32) -> Box<dyn AreaLight> {
        Box::new(RectangularAreaLight::new(center, Vec3::NEG_Y, Vec3::X, 1.0, Power::new(power)).unwrap())
    }

    #[test]
    fn test_builder_and_freeze() {
        let mut builder = LightSetBuilder::new();
        assert!(builder.is_empty());

        let a = builder.add(light_at(Vec3::new(0.0, 2.0, 0.0), 10.0));
        let b = builder.add(light_at(Vec3::new(4.0, 2.0, 0.0), 5.0));
        assert_eq!((a, b), (0, 1));

        builder.get_mut(b).unwrap().set_creates_shadows(false);

        let lights = builder.freeze();
        assert_eq!(lights.len(), 2);
        assert_eq!(lights.total_power(), Power::new(15.0));
        assert!(lights.get(0).unwrap().creates_shadows());
        assert!(!lights.get(1).unwrap().creates_shadows());
        assert!(lights.get(2).is_none());
        assert_eq!(lights.meshes().len(), 2);
        assert_eq!(lights.iter().count(), 2);
    }

    #[test]
    fn test_transform_all() {
        let mut builder = LightSetBuilder::new();
        builder.add(light_at(Vec3::new(0.0, 2.0, 0.0), 1.0));
        builder.add(light_at(Vec3::new(1.0, 2.0, 0.0), 1.0));

        builder
            .apply_transformation_to_all(&Affine3A::from_translation(Vec3::new(0.0, 1.0, 0.0)).into())
            .unwrap();

        let flatten: Transformation = Mat3::ZERO.into();
        assert!(matches!(
            builder.apply_transformation_to_all(&flatten),
            Err(LightError::InvalidTransformation(_))
        ));

        let lights = builder.freeze();
        for light in &lights {
            assert!((light.coordinate_frame().origin.y - 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_transform_all_is_all_or_nothing() {
        let mut builder = LightSetBuilder::new();
        // Spans X and Z
        builder.add(light_at(Vec3::new(0.0, 2.0, 0.0), 1.0));
        // Spans X and Y
        builder.add(Box::new(
            RectangularAreaLight::new(Vec3::ZERO, Vec3::Z, Vec3::X, 1.0, Power::new(1.0)).unwrap(),
        ));
        builder.get_mut(0).unwrap().set_creates_shadows(false);

        // Invertible, but folds Y almost onto X
        let squash: Transformation = Mat3::from_cols(Vec3::X, Vec3::new(1.0, 1e-5, 0.0), Vec3::Z).into();
        assert!(squash.is_invertible());

        let result = builder.apply_transformation_to_all(&squash);
        assert!(matches!(result, Err(LightError::InvalidTransformation(_))));

        let lights = builder.freeze();
        assert_eq!(lights.get(0).unwrap().coordinate_frame().origin, Vec3::new(0.0, 2.0, 0.0));
        assert!(!lights.get(0).unwrap().creates_shadows());
        assert_eq!(lights.get(1).unwrap().coordinate_frame().origin, Vec3::ZERO);
    }

    #[test]
    fn test_bounds() {
        let mut builder = LightSetBuilder::new();
        builder.add(light_at(Vec3::new(0.0, 2.0, 0.0), 1.0));
        builder.add(light_at(Vec3::new(4.0, 2.0, 0.0), 1.0));
        let bounds = builder.freeze().bounds();

        assert!((bounds.min.x - (-0.5)).abs() < 1e-4);
        assert!((bounds.max.x - 4.5).abs() < 1e-4);
        assert!(bounds.min.y < 2.0 && bounds.max.y > 2.0);
        assert!(LightSet::default().bounds().is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let mut builder = LightSetBuilder::new();
        builder.add(light_at(Vec3::new(0.0, 2.0, 0.0), 1.0));
        let lights = builder.freeze();

        let handles: Vec<_> = (0..4)
            .map(|seed| {
                let lights = lights.clone();
                std::thread::spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let light = lights.get(0).unwrap();
                    (0..100).all(|_| (light.random_point(&mut rng).y - 2.0).abs() < 1e-5)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
