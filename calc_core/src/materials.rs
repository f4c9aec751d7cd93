//! # Explosive Materials
//!
//! Reference explosive profiles used to bound the contents of an unknown
//! package. Each profile carries a nominal loading density and a relative
//! effectiveness (RE) factor expressing its TNT equivalence.
//!
//! The five built-in references are exposed as [`ReferenceExplosive`];
//! catalogs loaded from configuration use the plain [`MaterialProfile`]
//! record so that other materials can be substituted.
//!
//! | Material  | Density (kg/m³) | RE   |
//! |-----------|-----------------|------|
//! | TNT       | 1630            | 1.00 |
//! | C4        | 1590            | 1.34 |
//! | ANFO      | 840             | 0.82 |
//! | Dynamite  | 1300            | 0.92 |
//! | PETN      | 1760            | 1.66 |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::materials::ReferenceExplosive;
//!
//! let c4 = ReferenceExplosive::C4.profile();
//! assert_eq!(c4.name, "C4");
//! assert_eq!(c4.relative_effectiveness, 1.34);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::KgPerM3;

/// A material the package is assumed to be completely filled with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProfile {
    /// Identifier shown in results and reports (e.g. "TNT")
    pub name: String,

    /// Nominal density in kg/m³
    pub density_kg_m3: f64,

    /// TNT-equivalence factor (TNT = 1.0)
    pub relative_effectiveness: f64,
}

impl MaterialProfile {
    /// Create a new material profile.
    pub fn new(name: impl Into<String>, density_kg_m3: f64, relative_effectiveness: f64) -> Self {
        MaterialProfile {
            name: name.into(),
            density_kg_m3,
            relative_effectiveness,
        }
    }

    /// Density as a typed unit
    pub fn density(&self) -> KgPerM3 {
        KgPerM3(self.density_kg_m3)
    }

    /// Check that the profile has a name and positive, finite constants.
    pub fn validate(&self) -> CalcResult<()> {
        if self.name.trim().is_empty() {
            return Err(CalcError::invalid_catalog("Material name must not be empty"));
        }
        if !(self.density_kg_m3.is_finite() && self.density_kg_m3 > 0.0) {
            return Err(CalcError::invalid_catalog(format!(
                "Material '{}' density must be positive, got {}",
                self.name, self.density_kg_m3
            )));
        }
        if !(self.relative_effectiveness.is_finite() && self.relative_effectiveness > 0.0) {
            return Err(CalcError::invalid_catalog(format!(
                "Material '{}' relative effectiveness must be positive, got {}",
                self.name, self.relative_effectiveness
            )));
        }
        Ok(())
    }
}

/// Built-in reference explosives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceExplosive {
    /// Trinitrotoluene, the equivalence baseline
    #[serde(rename = "TNT")]
    Tnt,
    /// Composition C-4 plastic explosive
    C4,
    /// Ammonium nitrate / fuel oil
    #[serde(rename = "ANFO")]
    Anfo,
    /// Nitroglycerin-based dynamite
    Dynamite,
    /// Pentaerythritol tetranitrate
    #[serde(rename = "PETN")]
    Petn,
}

impl ReferenceExplosive {
    /// All reference explosives in report order
    pub const ALL: [ReferenceExplosive; 5] = [
        ReferenceExplosive::Tnt,
        ReferenceExplosive::C4,
        ReferenceExplosive::Anfo,
        ReferenceExplosive::Dynamite,
        ReferenceExplosive::Petn,
    ];

    /// Identifier used in results and reports
    pub fn name(&self) -> &'static str {
        match self {
            ReferenceExplosive::Tnt => "TNT",
            ReferenceExplosive::C4 => "C4",
            ReferenceExplosive::Anfo => "ANFO",
            ReferenceExplosive::Dynamite => "Dynamite",
            ReferenceExplosive::Petn => "PETN",
        }
    }

    /// Nominal density in kg/m³
    pub fn density_kg_m3(&self) -> f64 {
        match self {
            ReferenceExplosive::Tnt => 1630.0,
            ReferenceExplosive::C4 => 1590.0,
            ReferenceExplosive::Anfo => 840.0,
            ReferenceExplosive::Dynamite => 1300.0,
            ReferenceExplosive::Petn => 1760.0,
        }
    }

    /// Relative effectiveness factor
    pub fn relative_effectiveness(&self) -> f64 {
        match self {
            ReferenceExplosive::Tnt => 1.0,
            ReferenceExplosive::C4 => 1.34,
            ReferenceExplosive::Anfo => 0.82,
            ReferenceExplosive::Dynamite => 0.92,
            ReferenceExplosive::Petn => 1.66,
        }
    }

    /// Build the catalog record for this explosive
    pub fn profile(&self) -> MaterialProfile {
        MaterialProfile::new(self.name(), self.density_kg_m3(), self.relative_effectiveness())
    }
}

impl std::fmt::Display for ReferenceExplosive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The built-in material list, in report order.
pub fn builtin_materials() -> Vec<MaterialProfile> {
    ReferenceExplosive::ALL.iter().map(|m| m.profile()).collect()
}
