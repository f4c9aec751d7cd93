//! # Blast Catalog
//!
//! The immutable configuration the engine runs against: an ordered list of
//! material profiles and an ordered list of damage tiers. Order matters:
//! results and reports follow catalog order exactly.
//!
//! Catalogs are validated on construction, whether built in code or parsed
//! from TOML, so an engine never sees duplicate names, non-positive
//! constants, or damage tiers out of severity order.
//!
//! ## TOML Format
//!
//! ```toml
//! [[materials]]
//! name = "TNT"
//! density_kg_m3 = 1630.0
//! relative_effectiveness = 1.0
//!
//! [[damage_levels]]
//! label = "Light"
//! scaled_distance_coefficient = 7.0
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::catalog::BlastCatalog;
//! use calc_core::damage::DamageSeverity;
//! use calc_core::materials::ReferenceExplosive;
//!
//! // Reduced catalog: TNT only, two damage tiers
//! let catalog = BlastCatalog::new(
//!     vec![ReferenceExplosive::Tnt.profile()],
//!     vec![DamageSeverity::Light.level(), DamageSeverity::Rupture.level()],
//! ).unwrap();
//! assert_eq!(catalog.materials().len(), 1);
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::damage::{builtin_damage_levels, DamageSeverityLevel};
use crate::errors::{CalcError, CalcResult};
use crate::materials::{builtin_materials, MaterialProfile};

/// Ordered material and damage-tier tables.
///
/// Deserialization goes through [`BlastCatalog::new`], so a catalog read
/// from JSON or TOML is validated like one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogTables")]
pub struct BlastCatalog {
    materials: Vec<MaterialProfile>,
    damage_levels: Vec<DamageSeverityLevel>,
}

/// Unvalidated on-disk shape of a catalog
#[derive(Deserialize)]
struct CatalogTables {
    materials: Vec<MaterialProfile>,
    damage_levels: Vec<DamageSeverityLevel>,
}

impl TryFrom<CatalogTables> for BlastCatalog {
    type Error = CalcError;

    fn try_from(tables: CatalogTables) -> CalcResult<Self> {
        BlastCatalog::new(tables.materials, tables.damage_levels)
    }
}

impl BlastCatalog {
    /// Build and validate a catalog.
    ///
    /// # Errors
    ///
    /// `CalcError::InvalidCatalog` if either table is empty, a name or label
    /// repeats, a constant is not positive, or the damage coefficients do not
    /// strictly decrease.
    pub fn new(
        materials: Vec<MaterialProfile>,
        damage_levels: Vec<DamageSeverityLevel>,
    ) -> CalcResult<Self> {
        let catalog = BlastCatalog {
            materials,
            damage_levels,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(contents: &str) -> CalcResult<Self> {
        let tables: CatalogTables =
            toml::from_str(contents).map_err(|e| CalcError::serialization(e.to_string()))?;
        BlastCatalog::try_from(tables)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }

    /// Materials in catalog order
    pub fn materials(&self) -> &[MaterialProfile] {
        &self.materials
    }

    /// Damage tiers, least to most severe
    pub fn damage_levels(&self) -> &[DamageSeverityLevel] {
        &self.damage_levels
    }

    /// Look up a material by name (exact match)
    pub fn material(&self, name: &str) -> Option<&MaterialProfile> {
        self.materials.iter().find(|m| m.name == name)
    }

    fn validate(&self) -> CalcResult<()> {
        if self.materials.is_empty() {
            return Err(CalcError::invalid_catalog("At least one material is required"));
        }
        if self.damage_levels.is_empty() {
            return Err(CalcError::invalid_catalog("At least one damage level is required"));
        }

        let mut names = HashSet::new();
        for material in &self.materials {
            material.validate()?;
            if !names.insert(material.name.as_str()) {
                return Err(CalcError::invalid_catalog(format!(
                    "Duplicate material name '{}'",
                    material.name
                )));
            }
        }

        let mut labels = HashSet::new();
        for level in &self.damage_levels {
            level.validate()?;
            if !labels.insert(level.label.as_str()) {
                return Err(CalcError::invalid_catalog(format!(
                    "Duplicate damage level '{}'",
                    level.label
                )));
            }
        }

        for pair in self.damage_levels.windows(2) {
            if pair[1].scaled_distance_coefficient >= pair[0].scaled_distance_coefficient {
                return Err(CalcError::invalid_catalog(format!(
                    "Damage coefficients must strictly decrease: '{}' ({}) follows '{}' ({})",
                    pair[1].label,
                    pair[1].scaled_distance_coefficient,
                    pair[0].label,
                    pair[0].scaled_distance_coefficient
                )));
            }
        }

        Ok(())
    }
}

impl Default for BlastCatalog {
    /// The five reference explosives and four damage tiers.
    fn default() -> Self {
        BlastCatalog {
            materials: builtin_materials(),
            damage_levels: builtin_damage_levels(),
        }
    }
}

/// Load a catalog from a TOML file.
///
/// # Example
///
/// ```rust,no_run
/// use calc_core::catalog::load_catalog;
/// use std::path::Path;
///
/// let catalog = load_catalog(Path::new("catalog.toml"))?;
/// println!("{} materials", catalog.materials().len());
/// # Ok::<(), calc_core::errors::CalcError>(())
/// ```
pub fn load_catalog(path: &Path) -> CalcResult<BlastCatalog> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read catalog", path.display().to_string(), e.to_string())
    })?;

    let catalog = BlastCatalog::from_toml_str(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => {
            CalcError::serialization(format!("Invalid TOML in {}: {}", path.display(), reason))
        }
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        materials = catalog.materials.len(),
        damage_levels = catalog.damage_levels.len(),
        "loaded blast catalog"
    );
    Ok(catalog)
}
