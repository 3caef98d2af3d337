//! Lumen Core - shared geometry, radiometry and sampling types.
//!
//! This crate provides:
//!
//! - **Geometry**: `TriangleMesh`, the coarse surface used for visibility
//! - **Radiometry**: `Power` and `Radiance` with power/radiance conversion
//! - **Sampling**: the `UniformSampler` service consumed by light sampling
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Power, Radiance, UniformSampler};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let u = rng.next_f32();
//! let radiance = Radiance::from_power(Power::new(100.0), 4.0);
//! ```

pub mod mesh;
pub mod radiometry;
pub mod sampling;

// Re-export commonly used types
pub use mesh::TriangleMesh;
pub use radiometry::{Power, Radiance};
pub use sampling::{SequenceSampler, UniformSampler};
