//! The capability set every light-emitting shape implements.

use std::fmt;

use lumen_core::{Power, Radiance, TriangleMesh, UniformSampler};
use lumen_math::{CoordinateFrame, Transformation, Vec3};
use serde::{Deserialize, Serialize};

use crate::{LightResult, SurfaceElement};

/// Per-light configuration that does not affect geometry or sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    /// Whether shadow rays toward this light are tested for occlusion
    pub creates_shadows: bool,

    /// Constant radiance floor added regardless of sampling
    pub ambient_radiance: Radiance,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            creates_shadows: true,
            ambient_radiance: Radiance::BLACK,
        }
    }
}

/// A finite-size light source.
///
/// Implementations must guarantee:
///
/// - `surface_area()` is strictly positive
/// - `random_point()` and `random_surface_element()` are uniform over the
///   surface area
/// - rigid transformations keep `surface_area()` and `total_power()`;
///   scaling changes the area but never the stored power
/// - a failed `set_coordinate_frame()` or `apply_transformation()` leaves the
///   light unchanged
///
/// Sampling only reads the light, so a light shared between rendering threads
/// needs no locking as long as each thread brings its own sampler.
pub trait AreaLight: Send + Sync + fmt::Debug {
    /// Placement and orientation of the light in world space.
    fn coordinate_frame(&self) -> CoordinateFrame;

    fn surface_area(&self) -> f32;

    /// How many samples the integrator should draw per shading point.
    fn number_of_samples(&self) -> u32;

    /// Coarse geometry for inserting the light into the visibility structure.
    fn mesh(&self) -> TriangleMesh;

    /// A point drawn uniformly from the emitting surface.
    fn random_point(&self, sampler: &mut dyn UniformSampler) -> Vec3;

    /// A uniformly drawn point with its normal and area density.
    fn random_surface_element(&self, sampler: &mut dyn UniformSampler) -> SurfaceElement;

    /// Total emitted power, exactly as configured.
    fn total_power(&self) -> Power;

    /// Move the light to a new frame, keeping its size.
    fn set_coordinate_frame(&mut self, frame: &CoordinateFrame) -> LightResult<()>;

    /// Remap the light's geometry through a linear or affine map.
    fn apply_transformation(&mut self, transformation: &Transformation) -> LightResult<()>;

    /// A copy of the light remapped through `transformation`, leaving `self`
    /// as it is.
    fn transformed(&self, transformation: &Transformation) -> LightResult<Box<dyn AreaLight>>;

    fn settings(&self) -> &LightSettings;

    fn settings_mut(&mut self) -> &mut LightSettings;

    fn creates_shadows(&self) -> bool {
        self.settings().creates_shadows
    }

    fn set_creates_shadows(&mut self, creates_shadows: bool) {
        self.settings_mut().creates_shadows = creates_shadows;
    }

    fn ambient_radiance(&self) -> Radiance {
        self.settings().ambient_radiance
    }

    fn set_ambient_radiance(&mut self, radiance: Radiance) {
        self.settings_mut().ambient_radiance = radiance;
    }

    /// Radiance leaving the surface if the configured power is spread
    /// uniformly over it (one-sided Lambertian emission).
    fn emitted_radiance(&self) -> Radiance {
        Radiance::from_power(self.total_power(), self.surface_area())
    }
}
