//! Scalar radiometric quantities.
//!
//! Emission is grey: a single value per quantity, no wavelength dependence.

use std::f32::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Total radiant flux, in watts.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Power(pub f32);

/// Radiance, in W·sr⁻¹·m⁻².
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radiance(pub f32);

impl Power {
    pub const ZERO: Power = Power(0.0);

    pub fn new(watts: f32) -> Self {
        Self(watts)
    }

    #[inline]
    pub fn watts(self) -> f32 {
        self.0
    }

    /// Power leaving a one-sided Lambertian emitter of the given area:
    /// `Φ = L · π · A`.
    pub fn from_radiance(radiance: Radiance, area: f32) -> Self {
        if area <= 0.0 {
            return Power::ZERO;
        }
        Power(radiance.0 * PI * area)
    }
}

impl Radiance {
    /// No emission.
    pub const BLACK: Radiance = Radiance(0.0);

    pub fn new(value: f32) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_black(self) -> bool {
        self.0 == 0.0
    }

    /// Radiance of a one-sided Lambertian emitter of the given area that
    /// emits `power` in total: `L = Φ / (π · A)`.
    ///
    /// A non-positive area yields black.
    pub fn from_power(power: Power, area: f32) -> Self {
        if area <= 0.0 {
            return Radiance::BLACK;
        }
        Radiance(power.0 / (PI * area))
    }
}

impl Add for Power {
    type Output = Power;

    fn add(self, rhs: Power) -> Power {
        Power(self.0 + rhs.0)
    }
}

impl AddAssign for Power {
    fn add_assign(&mut self, rhs: Power) {
        self.0 += rhs.0;
    }
}

impl std::iter::Sum for Power {
    fn sum<I: Iterator<Item = Power>>(iter: I) -> Power {
        iter.fold(Power::ZERO, |acc, p| acc + p)
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} W", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_radiance_roundtrip() {
        let power = Power::new(100.0);
        let area = 4.0;
        let radiance = Radiance::from_power(power, area);

        assert!((radiance.value() - 100.0 / (PI * 4.0)).abs() < 1e-5);
        assert!((Power::from_radiance(radiance, area).watts() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_area_is_black() {
        assert!(Radiance::from_power(Power::new(10.0), 0.0).is_black());
        assert_eq!(Power::from_radiance(Radiance::new(1.0), -1.0), Power::ZERO);
    }

    #[test]
    fn test_power_sum() {
        let total: Power = [Power::new(1.0), Power::new(2.5), Power::new(0.5)]
            .into_iter()
            .sum();
        assert_eq!(total, Power::new(4.0));
        assert_eq!(total.to_string(), "4 W");
    }

    #[test]
    fn test_serde_transparent() {
        let radiance: Radiance = serde_json::from_str("0.25").unwrap();
        assert_eq!(radiance, Radiance::new(0.25));
        assert_eq!(serde_json::to_string(&Power::new(3.0)).unwrap(), "3.0");
    }
}
