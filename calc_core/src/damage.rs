//! # Structural Damage Tiers
//!
//! Hopkinson–Cranz scaled-distance coefficients (Z, in m/kg^⅓) for tiered
//! structural damage. A damage radius is `Z * cbrt(NEQ)`; the larger the
//! coefficient, the lighter the damage expected at that distance.
//!
//! | Tier     | Z   |
//! |----------|-----|
//! | Light    | 7.0 |
//! | Moderate | 4.5 |
//! | Severe   | 2.5 |
//! | Rupture  | 1.2 |

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One damage tier and its scaled-distance coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageSeverityLevel {
    /// Tier label shown in results and reports (e.g. "Light")
    pub label: String,

    /// Scaled-distance coefficient Z
    pub scaled_distance_coefficient: f64,
}

impl DamageSeverityLevel {
    /// Create a new damage level.
    pub fn new(label: impl Into<String>, scaled_distance_coefficient: f64) -> Self {
        DamageSeverityLevel {
            label: label.into(),
            scaled_distance_coefficient,
        }
    }

    /// Check the label is present and the coefficient positive and finite.
    pub fn validate(&self) -> CalcResult<()> {
        if self.label.trim().is_empty() {
            return Err(CalcError::invalid_catalog("Damage level label must not be empty"));
        }
        let z = self.scaled_distance_coefficient;
        if !(z.is_finite() && z > 0.0) {
            return Err(CalcError::invalid_catalog(format!(
                "Damage level '{}' coefficient must be positive, got {}",
                self.label, z
            )));
        }
        Ok(())
    }
}

/// Built-in damage tiers, least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSeverity {
    Light,
    Moderate,
    Severe,
    Rupture,
}

impl DamageSeverity {
    /// All tiers in report order
    pub const ALL: [DamageSeverity; 4] = [
        DamageSeverity::Light,
        DamageSeverity::Moderate,
        DamageSeverity::Severe,
        DamageSeverity::Rupture,
    ];

    /// Label used in results and reports
    pub fn label(&self) -> &'static str {
        match self {
            DamageSeverity::Light => "Light",
            DamageSeverity::Moderate => "Moderate",
            DamageSeverity::Severe => "Severe",
            DamageSeverity::Rupture => "Rupture",
        }
    }

    /// Scaled-distance coefficient Z
    pub fn scaled_distance_coefficient(&self) -> f64 {
        match self {
            DamageSeverity::Light => 7.0,
            DamageSeverity::Moderate => 4.5,
            DamageSeverity::Severe => 2.5,
            DamageSeverity::Rupture => 1.2,
        }
    }

    /// Build the catalog record for this tier
    pub fn level(&self) -> DamageSeverityLevel {
        DamageSeverityLevel::new(self.label(), self.scaled_distance_coefficient())
    }
}

impl std::fmt::Display for DamageSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The built-in damage tiers, in report order.
pub fn builtin_damage_levels() -> Vec<DamageSeverityLevel> {
    DamageSeverity::ALL.iter().map(|d| d.level()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_coefficients_strictly_decrease() {
        let levels = builtin_damage_levels();
        assert_eq!(levels.len(), 4);
        for pair in levels.windows(2) {
            assert!(pair[0].scaled_distance_coefficient > pair[1].scaled_distance_coefficient);
        }
    }

    #[test]
    fn test_builtin_labels() {
        let labels: Vec<&str> = DamageSeverity::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["Light", "Moderate", "Severe", "Rupture"]);
    }

    #[test]
    fn test_rejects_zero_coefficient() {
        let level = DamageSeverityLevel::new("Nothing", 0.0);
        assert!(level.validate().is_err());
    }
}
