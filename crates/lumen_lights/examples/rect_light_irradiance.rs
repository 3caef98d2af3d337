//! Rectangular light irradiance example.
//!
//! Loads lights from a JSON file (or a built-in scene), tilts them with an
//! affine transformation during setup, freezes them and prints the
//! irradiance along a line on the floor, computed in parallel.
//!
//! ```text
//! RUST_LOG=debug cargo run --example rect_light_irradiance -- lights.json
//! ```

use anyhow::{Context, Result};
use lumen_lights::{direct, AreaLight, LightSetConfig, Transformation, Vec3};
use lumen_math::{Affine3A, Quat};

const DEFAULT_SCENE: &str = r#"{
    "rectangular": [
        {
            "center": [0.0, 3.0, 0.0],
            "facing": { "target": [0.0, 0.0, 0.0] },
            "width_vector": [1.0, 0.0, 0.0],
            "height": 1.0,
            "power": 200.0,
            "number_of_samples": 32
        }
    ]
}"#;

fn main() -> Result<()> {
    env_logger::init();

    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?,
        None => DEFAULT_SCENE.to_string(),
    };

    // Setup phase
    let mut builder = LightSetConfig::from_json(&json)?.build()?;
    let tilt = Affine3A::from_rotation_translation(
        Quat::from_rotation_z(15.0_f32.to_radians()),
        Vec3::new(0.5, 0.0, 0.0),
    );
    builder.apply_transformation_to_all(&Transformation::from(tilt))?;
    let lights = builder.freeze();

    for (i, light) in lights.iter().enumerate() {
        println!(
            "light {}: area {:.3} m², power {}, radiance {:.3}, {} samples",
            i,
            light.surface_area(),
            light.total_power(),
            light.emitted_radiance().value(),
            light.number_of_samples()
        );
    }

    // Render phase
    let meshes = lights.meshes();
    let receivers: Vec<(Vec3, Vec3)> = (0..=20)
        .map(|i| (Vec3::new(-5.0 + i as f32 * 0.5, 0.0, 0.0), Vec3::Y))
        .collect();

    let start = std::time::Instant::now();
    let irradiance = direct::estimate_irradiance_parallel(
        &lights,
        &receivers,
        42,
        direct::mesh_visibility(&meshes),
    );
    println!("Estimated {} receivers in {:?}", receivers.len(), start.elapsed());

    for ((point, _), e) in receivers.iter().zip(irradiance) {
        println!("x = {:5.2}  E = {:8.4} W/m²", point.x, e);
    }

    Ok(())
}
