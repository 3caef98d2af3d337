//! JSON light descriptions.
//!
//! ```json
//! {
//!   "rectangular": [
//!     {
//!       "center": [0.0, 2.0, 0.0],
//!       "facing": { "direction": [0.0, -1.0, 0.0] },
//!       "width_vector": [1.0, 0.0, 0.0],
//!       "height": 1.0,
//!       "power": 100.0,
//!       "number_of_samples": 16
//!     }
//!   ]
//! }
//! ```
//!
//! `facing` may instead be `{ "target": [x, y, z] }`. `number_of_samples`,
//! `creates_shadows` and `ambient_radiance` are optional.

use lumen_core::Power;
use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{LightError, LightSetBuilder, LightSettings, RectangularAreaLight};

/// Errors that can occur while reading light descriptions.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid light #{index}: {source}")]
    Light {
        index: usize,
        #[source]
        source: LightError,
    },
}

/// How a rectangular light is oriented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    /// Face along this direction
    Direction([f32; 3]),
    /// Face toward this point
    Target([f32; 3]),
}

/// Description of one rectangular light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangularLightConfig {
    pub center: [f32; 3],
    pub facing: Facing,
    pub width_vector: [f32; 3],
    pub height: f32,
    pub power: Power,
    #[serde(default = "default_number_of_samples")]
    pub number_of_samples: u32,
    #[serde(flatten)]
    pub settings: LightSettings,
}

fn default_number_of_samples() -> u32 {
    1
}

impl RectangularLightConfig {
    /// Validate the description and build the light.
    pub fn build(&self) -> Result<RectangularAreaLight, LightError> {
        let center = Vec3::from(self.center);
        let width_vector = Vec3::from(self.width_vector);

        let light = match self.facing {
            Facing::Direction(direction) => RectangularAreaLight::new(
                center,
                Vec3::from(direction),
                width_vector,
                self.height,
                self.power,
            )?,
            Facing::Target(target) => RectangularAreaLight::facing_point(
                center,
                Vec3::from(target),
                width_vector,
                self.height,
                self.power,
            )?,
        };

        Ok(light
            .with_number_of_samples(self.number_of_samples)
            .with_settings(self.settings))
    }
}

/// All lights of a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightSetConfig {
    #[serde(default)]
    pub rectangular: Vec<RectangularLightConfig>,
}

impl LightSetConfig {
    /// Parse light descriptions from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build every light, ready for further setup.
    ///
    /// Fails on the first invalid light, reporting its position in the list.
    pub fn build(&self) -> Result<LightSetBuilder, ConfigError> {
        let mut builder = LightSetBuilder::new();
        for (index, config) in self.rectangular.iter().enumerate() {
            let light = config
                .build()
                .map_err(|source| ConfigError::Light { index, source })?;
            builder.add(Box::new(light));
        }
        log::debug!("Built {} lights from configuration", builder.len());
        Ok(builder)
    }
}
