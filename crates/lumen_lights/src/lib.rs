//! Lumen Lights - finite-size light sources.
//!
//! Area lights give soft shadows and tie a light's configured power to the
//! radiance it emits. The renderer sees every shape through the
//! [`AreaLight`] trait:
//!
//! 1. at scene-build time it registers `mesh()` with its visibility structure
//! 2. per shading point it draws `number_of_samples()` uniform
//!    `random_surface_element()`s for direct lighting
//!
//! Lights are configured and moved through a [`LightSetBuilder`], then frozen
//! into a [`LightSet`] that rendering threads share.
//!
//! # Example
//!
//! ```ignore
//! use lumen_lights::{direct, LightSetConfig};
//!
//! let lights = LightSetConfig::from_json(&json)?.build()?.freeze();
//! let meshes = lights.meshes();
//! let e = direct::estimate_irradiance(&lights, p, n, &mut rng, direct::mesh_visibility(&meshes));
//! ```

mod area_light;
mod config;
pub mod direct;
mod error;
mod light_set;
mod rectangular;
mod surface_element;

pub use area_light::{AreaLight, LightSettings};
pub use config::{ConfigError, Facing, LightSetConfig, RectangularLightConfig};
pub use error::{LightError, LightResult};
pub use light_set::{LightSet, LightSetBuilder};
pub use rectangular::RectangularAreaLight;
pub use surface_element::SurfaceElement;

/// Re-export math and radiometry types used in the light API
pub use lumen_core::{Power, Radiance, TriangleMesh, UniformSampler};
pub use lumen_math::{CoordinateFrame, Transformation, Vec3};
