//! # Blast-Effect Estimate
//!
//! Estimates, for every material in the catalog, what the package would
//! weigh if it were completely filled with that material and the distances
//! that follow from Hopkinson–Cranz cube-root scaling of its TNT equivalent.
//!
//! ## Method
//!
//! For a package of volume V (m³) and a material of density ρ and relative
//! effectiveness RE:
//!
//! ```text
//! mass        = V * ρ                          (kg)
//! NEQ         = mass * RE                      (kg TNT)
//! R           = cbrt(NEQ)
//! d_frag      = 100 * R                        (m)
//! d_safety    = d_frag * 1.5                   (m)
//! t_concrete  = 0.41 * R * 1.5                 (m)
//! d_damage(Z) = Z * R                          (m, per damage tier)
//! ```
//!
//! Values are kept at full `f64` precision; rounding is left to whoever
//! displays them.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::blast::calculate;
//!
//! let results = calculate("50", "40", "30").unwrap();
//! assert_eq!(results.len(), 5);
//! assert_eq!(results[0].material_name, "TNT");
//! assert!((results[0].estimated_mass_kg - 97.8).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::BlastCatalog;
use crate::damage::DamageSeverityLevel;
use crate::dimensions::PackageDimensions;
use crate::errors::CalcResult;
use crate::materials::MaterialProfile;
use crate::units::CubicMeters;

/// Scaled-distance coefficient for the reference fragmentation distance
pub const FRAGMENTATION_COEFFICIENT: f64 = 100.0;

/// Safety factor applied to the perimeter and to shielding thickness
pub const SAFETY_FACTOR: f64 = 1.5;

/// Concrete shielding coefficient (m/kg^⅓) before the safety factor
pub const SHIELDING_COEFFICIENT: f64 = 0.41;

/// Distance at which one damage tier is expected.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Light", "distance_m": 32.25 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageRadius {
    /// Damage tier label
    pub label: String,

    /// Radius in meters
    pub distance_m: f64,
}

/// Estimate for one material.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material_name": "TNT",
///   "estimated_mass_kg": 97.8,
///   "tnt_equivalent_mass_kg": 97.8,
///   "base_fragmentation_distance_m": 460.73,
///   "safety_perimeter_m": 691.09,
///   "concrete_shielding_thickness_m": 2.83,
///   "damage_radii": [
///     { "label": "Light", "distance_m": 32.25 },
///     { "label": "Moderate", "distance_m": 20.73 },
///     { "label": "Severe", "distance_m": 11.52 },
///     { "label": "Rupture", "distance_m": 5.53 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialResult {
    /// Material this estimate assumes
    pub material_name: String,

    /// Package volume times material density (kg)
    pub estimated_mass_kg: f64,

    /// Net explosive quantity, TNT-equivalent mass (kg)
    pub tnt_equivalent_mass_kg: f64,

    /// Reference fragmentation distance (m)
    pub base_fragmentation_distance_m: f64,

    /// Fragmentation distance with the safety factor applied (m)
    pub safety_perimeter_m: f64,

    /// Recommended concrete shielding thickness (m)
    pub concrete_shielding_thickness_m: f64,

    /// Damage radii in damage-tier catalog order
    pub damage_radii: Vec<DamageRadius>,
}

impl MaterialResult {
    /// Cube root of the NEQ, the common scaling quantity
    pub fn scaled_charge(&self) -> f64 {
        self.tnt_equivalent_mass_kg.cbrt()
    }

    /// Damage radius for a tier label, if the catalog had it
    pub fn damage_radius(&self, label: &str) -> Option<f64> {
        self.damage_radii
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.distance_m)
    }
}

/// Calculation engine bound to one catalog.
///
/// The engine owns only immutable data, so it can be shared freely and
/// called from any thread.
///
/// ## Example
///
/// ```rust
/// use calc_core::calculations::blast::BlastEngine;
/// use calc_core::catalog::BlastCatalog;
/// use calc_core::damage::DamageSeverity;
/// use calc_core::materials::ReferenceExplosive;
///
/// let catalog = BlastCatalog::new(
///     vec![ReferenceExplosive::Anfo.profile()],
///     vec![DamageSeverity::Light.level()],
/// ).unwrap();
/// let engine = BlastEngine::new(catalog);
///
/// let results = engine.calculate("100", "100", "100").unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].damage_radii.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlastEngine {
    catalog: BlastCatalog,
}

impl BlastEngine {
    /// Create an engine over an already validated catalog.
    pub fn new(catalog: BlastCatalog) -> Self {
        BlastEngine { catalog }
    }

    /// The catalog this engine evaluates against
    pub fn catalog(&self) -> &BlastCatalog {
        &self.catalog
    }

    /// Parse raw dimension text (cm) and run the estimate.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<MaterialResult>)` - One result per material, catalog order
    /// * `Err(CalcError::MissingOrInvalidDimension)` - If any dimension is
    ///   empty, not a number, or not positive. Nothing is computed.
    pub fn calculate(
        &self,
        length_cm: &str,
        width_cm: &str,
        height_cm: &str,
    ) -> CalcResult<Vec<MaterialResult>> {
        let dimensions = PackageDimensions::parse(length_cm, width_cm, height_cm)?;
        Ok(self.calculate_dimensions(dimensions))
    }

    /// Run the estimate for dimensions.
    ///
    /// Infallible: a `PackageDimensions` can only be obtained through
    /// validation, so every value reaching this point is finite and positive.
    pub fn calculate_dimensions(&self, dimensions: PackageDimensions) -> Vec<MaterialResult> {
        let volume = dimensions.volume();
        self.catalog
            .materials()
            .iter()
            .map(|material| evaluate_material(volume, material, self.catalog.damage_levels()))
            .collect()
    }
}

/// Run the estimate with the built-in catalog.
///
/// # Arguments
///
/// * `length_cm`, `width_cm`, `height_cm` - Raw dimension text in centimeters
///
/// # Returns
///
/// * `Ok(Vec<MaterialResult>)` - TNT, C4, ANFO, Dynamite, PETN in that order
/// * `Err(CalcError::MissingOrInvalidDimension)` - If any input is invalid
pub fn calculate(
    length_cm: &str,
    width_cm: &str,
    height_cm: &str,
) -> CalcResult<Vec<MaterialResult>> {
    BlastEngine::default().calculate(length_cm, width_cm, height_cm)
}

fn evaluate_material(
    volume: CubicMeters,
    material: &MaterialProfile,
    damage_levels: &[DamageSeverityLevel],
) -> MaterialResult {
    let mass = volume * material.density();
    let neq = mass.0 * material.relative_effectiveness;
    let cube_root = neq.cbrt();

    let base_fragmentation = FRAGMENTATION_COEFFICIENT * cube_root;

    let damage_radii = damage_levels
        .iter()
        .map(|level| DamageRadius {
            label: level.label.clone(),
            distance_m: level.scaled_distance_coefficient * cube_root,
        })
        .collect();

    MaterialResult {
        material_name: material.name.clone(),
        estimated_mass_kg: mass.0,
        tnt_equivalent_mass_kg: neq,
        base_fragmentation_distance_m: base_fragmentation,
        safety_perimeter_m: base_fragmentation * SAFETY_FACTOR,
        concrete_shielding_thickness_m: SHIELDING_COEFFICIENT * cube_root * SAFETY_FACTOR,
        damage_radii,
    }
}
