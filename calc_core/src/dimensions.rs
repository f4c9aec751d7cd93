//! # Package Dimensions
//!
//! The explicit input record for a calculation: the outer length, width,
//! and height of the suspect package in centimeters.
//!
//! Dimensions usually arrive as raw text from a form or a terminal prompt.
//! [`PackageDimensions::parse`] turns the three strings into a validated
//! record or fails with [`CalcError::MissingOrInvalidDimension`] naming the
//! first offending field. Nothing is coerced: `"12abc"` is rejected rather
//! than read as 12.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::dimensions::PackageDimensions;
//!
//! let dims = PackageDimensions::parse("50", "40", " 30 ").unwrap();
//! assert!((dims.volume().0 - 0.06).abs() < 1e-12);
//!
//! assert!(PackageDimensions::parse("50", "", "30").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Centimeters, CubicMeters, Meters};

/// Outer dimensions of a rectangular package, in centimeters.
///
/// Fields are private: every value is built through [`PackageDimensions::new`],
/// [`PackageDimensions::parse`], or deserialization, all of which validate.
///
/// ## JSON Example
///
/// ```json
/// { "length_cm": 50.0, "width_cm": 40.0, "height_cm": 30.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct PackageDimensions {
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
}

/// Unvalidated wire shape of package dimensions
#[derive(Deserialize)]
struct RawDimensions {
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
}

impl TryFrom<RawDimensions> for PackageDimensions {
    type Error = CalcError;

    fn try_from(raw: RawDimensions) -> CalcResult<Self> {
        PackageDimensions::new(raw.length_cm, raw.width_cm, raw.height_cm)
    }
}

impl PackageDimensions {
    /// Create dimensions from numbers, validating each one.
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> CalcResult<Self> {
        check_dimension("length_cm", length_cm)?;
        check_dimension("width_cm", width_cm)?;
        check_dimension("height_cm", height_cm)?;
        Ok(PackageDimensions {
            length_cm,
            width_cm,
            height_cm,
        })
    }

    /// Parse dimensions from raw user text.
    ///
    /// Surrounding whitespace is ignored. Fields are checked in length,
    /// width, height order and the first failure is reported.
    pub fn parse(length: &str, width: &str, height: &str) -> CalcResult<Self> {
        Ok(PackageDimensions {
            length_cm: parse_dimension("length_cm", length)?,
            width_cm: parse_dimension("width_cm", width)?,
            height_cm: parse_dimension("height_cm", height)?,
        })
    }

    /// Length in centimeters
    pub fn length_cm(&self) -> f64 {
        self.length_cm
    }

    /// Width in centimeters
    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    /// Height in centimeters
    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    /// Length converted to meters
    pub fn length(&self) -> Meters {
        Centimeters(self.length_cm).into()
    }

    /// Width converted to meters
    pub fn width(&self) -> Meters {
        Centimeters(self.width_cm).into()
    }

    /// Height converted to meters
    pub fn height(&self) -> Meters {
        Centimeters(self.height_cm).into()
    }

    /// Package volume V = l * w * h (m³)
    pub fn volume(&self) -> CubicMeters {
        CubicMeters::of_box(self.length(), self.width(), self.height())
    }
}

fn parse_dimension(field: &str, raw: &str) -> CalcResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid_dimension(field, raw, "Value is required"));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::invalid_dimension(field, raw, "Not a number"))?;
    check_dimension(field, value)?;
    Ok(value)
}

fn check_dimension(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_dimension(
            field,
            value.to_string(),
            "Must be a finite number",
        ));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_dimension(field, value.to_string(), "Must be positive"));
    }
    Ok(())
}
