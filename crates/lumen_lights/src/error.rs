//! Errors raised when a light would end up degenerate.

use thiserror::Error;

/// Errors that can occur while building or moving a light.
///
/// A failed operation leaves the light untouched; retry with corrected input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LightError {
    #[error("Invalid light geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid transformation: {0}")]
    InvalidTransformation(String),

    #[error("Invalid light power: {0}")]
    InvalidPower(f32),
}

/// Result type for light operations.
pub type LightResult<T> = Result<T, LightError>;
