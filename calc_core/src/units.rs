//! # Unit Types
//!
//! Type-safe wrappers for the handful of SI units the blast calculator uses.
//! These are plain `f64` newtypes so JSON stays clean (just numbers).
//!
//! ## Units
//!
//! - Length: centimeters (package input), meters (everything downstream)
//! - Volume: cubic meters
//! - Mass: kilograms
//! - Density: kilograms per cubic meter
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Centimeters, CubicMeters, KgPerM3, Kilograms, Meters};
//!
//! let length: Meters = Centimeters(50.0).into();
//! assert_eq!(length.0, 0.5);
//!
//! let mass: Kilograms = CubicMeters(0.5) * KgPerM3(1630.0);
//! assert_eq!(mass.0, 815.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

// ============================================================================
// Volume, Mass, Density
// ============================================================================

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl CubicMeters {
    /// Volume of a rectangular box, multiplied in length, width, height order
    pub fn of_box(length: Meters, width: Meters, height: Meters) -> Self {
        CubicMeters(length.0 * width.0 * height.0)
    }
}

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Density in kilograms per cubic meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM3(pub f64);

impl Mul<KgPerM3> for CubicMeters {
    type Output = Kilograms;
    fn mul(self, rhs: KgPerM3) -> Self::Output {
        Kilograms(self.0 * rhs.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(KgPerM3);
