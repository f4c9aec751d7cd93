//! # Calculation Report
//!
//! Renders a finished calculation as the plain-text field report handed to
//! EOD teams, or as JSON for machine consumers.
//!
//! A report is built from a [`CalculationRecord`]: the dimensions exactly as
//! the operator typed them, the moment of calculation, and the ordered
//! per-material results. Numbers are shown with two decimals; the record
//! itself keeps full precision.
//!
//! ## Layout
//!
//! ```text
//! ====================================================
//! INFORME TÉCNICO UNIFICADO - EOD APP
//! FECHA: 14/03/2025, 09:30:05
//! ====================================================
//!
//! DIMENSIONES: 50 x 40 x 30 cm
//! FACTOR DE SEGURIDAD: 1.5x
//!
//! TIPO: TNT
//!  - Masa Estimada: 97.80 kg
//!  - NEQ: 97.80 kg TNT
//!  - Distancia Base Fragmentación: 460.73 m
//!  - Perímetro Seguridad: 691.09 m
//!  - Blindaje Concreto: 2.83 m
//!  - Radios de Daño:
//!     * Light: 32.25 m
//!     * Moderate: 20.73 m
//!     * Severe: 11.52 m
//!     * Rupture: 5.53 m
//! ----------------------------------------------------
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::BlastEngine;
//! use calc_core::report::CalculationRecord;
//!
//! let engine = BlastEngine::default();
//! let record = CalculationRecord::from_inputs(&engine, "50", "40", "30").unwrap();
//! let text = record.render_text();
//! assert!(text.contains("TIPO: PETN"));
//! ```

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::calculations::blast::{BlastEngine, MaterialResult, SAFETY_FACTOR};
use crate::errors::{CalcError, CalcResult};

/// Heavy rule framing the report header
const HEADER_RULE: &str = "====================================================";

/// Light rule closing each material block
const BLOCK_RULE: &str = "----------------------------------------------------";

/// Report title line
pub const REPORT_TITLE: &str = "INFORME TÉCNICO UNIFICADO - EOD APP";

/// Timestamp format used in the report header
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Everything a report needs from one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    /// Length as typed by the operator (cm)
    pub length_input: String,

    /// Width as typed by the operator (cm)
    pub width_input: String,

    /// Height as typed by the operator (cm)
    pub height_input: String,

    /// When the calculation ran
    pub calculated_at: DateTime<Local>,

    /// Per-material results in catalog order
    pub results: Vec<MaterialResult>,
}

impl CalculationRecord {
    /// Record a calculation that just ran.
    pub fn new(
        length_input: impl Into<String>,
        width_input: impl Into<String>,
        height_input: impl Into<String>,
        results: Vec<MaterialResult>,
    ) -> Self {
        CalculationRecord {
            length_input: length_input.into(),
            width_input: width_input.into(),
            height_input: height_input.into(),
            calculated_at: Local::now(),
            results,
        }
    }

    /// Run the engine on raw input and record the outcome.
    ///
    /// Invalid input yields the engine's error and no record, so a report
    /// can only ever be produced from a complete result set.
    pub fn from_inputs(
        engine: &BlastEngine,
        length: &str,
        width: &str,
        height: &str,
    ) -> CalcResult<Self> {
        let results = engine.calculate(length, width, height)?;
        Ok(CalculationRecord::new(length, width, height, results))
    }

    /// Replace the calculation timestamp.
    pub fn with_timestamp(mut self, calculated_at: DateTime<Local>) -> Self {
        self.calculated_at = calculated_at;
        self
    }

    /// Render the plain-text report.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", HEADER_RULE);
        let _ = writeln!(out, "{}", REPORT_TITLE);
        let _ = writeln!(out, "FECHA: {}", self.calculated_at.format(REPORT_DATE_FORMAT));
        let _ = writeln!(out, "{}", HEADER_RULE);
        out.push('\n');
        let _ = writeln!(
            out,
            "DIMENSIONES: {} x {} x {} cm",
            self.length_input, self.width_input, self.height_input
        );
        let _ = writeln!(out, "FACTOR DE SEGURIDAD: {}x", SAFETY_FACTOR);
        out.push('\n');

        for result in &self.results {
            render_material(&mut out, result);
        }

        out
    }

    /// Serialize the record to pretty JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }
}

fn render_material(out: &mut String, r: &MaterialResult) {
    let _ = writeln!(out, "TIPO: {}", r.material_name);
    let _ = writeln!(out, " - Masa Estimada: {:.2} kg", r.estimated_mass_kg);
    let _ = writeln!(out, " - NEQ: {:.2} kg TNT", r.tnt_equivalent_mass_kg);
    let _ = writeln!(
        out,
        " - Distancia Base Fragmentación: {:.2} m",
        r.base_fragmentation_distance_m
    );
    let _ = writeln!(out, " - Perímetro Seguridad: {:.2} m", r.safety_perimeter_m);
    let _ = writeln!(out, " - Blindaje Concreto: {:.2} m", r.concrete_shielding_thickness_m);
    let _ = writeln!(out, " - Radios de Daño:");
    for radius in &r.damage_radii {
        let _ = writeln!(out, "    * {}: {:.2} m", radius.label, radius.distance_m);
    }
    let _ = writeln!(out, "{}", BLOCK_RULE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_record() -> CalculationRecord {
        let timestamp = Local.with_ymd_and_hms(2025, 3, 14, 9, 30, 5).unwrap();
        CalculationRecord::from_inputs(&BlastEngine::default(), "50", "40", "30")
            .unwrap()
            .with_timestamp(timestamp)
    }

    #[test]
    fn test_header() {
        let text = test_record().render_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], HEADER_RULE);
        assert_eq!(lines[1], "INFORME TÉCNICO UNIFICADO - EOD APP");
        assert_eq!(lines[2], "FECHA: 14/03/2025, 09:30:05");
        assert_eq!(lines[3], HEADER_RULE);
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "DIMENSIONES: 50 x 40 x 30 cm");
        assert_eq!(lines[6], "FACTOR DE SEGURIDAD: 1.5x");
        assert_eq!(lines[7], "");
    }

    #[test]
    fn test_tnt_block() {
        let text = test_record().render_text();
        let expected = "\
TIPO: TNT
 - Masa Estimada: 97.80 kg
 - NEQ: 97.80 kg TNT
 - Distancia Base Fragmentación: 460.73 m
 - Perímetro Seguridad: 691.09 m
 - Blindaje Concreto: 2.83 m
 - Radios de Daño:
    * Light: 32.25 m
    * Moderate: 20.73 m
    * Severe: 11.52 m
    * Rupture: 5.53 m
----------------------------------------------------
";
        assert!(text.contains(expected), "report was:\n{text}");
    }

    #[test]
    fn test_one_block_per_material_in_order() {
        let text = test_record().render_text();
        let materials: Vec<&str> = text
            .lines()
            .filter_map(|l| l.strip_prefix("TIPO: "))
            .collect();
        assert_eq!(materials, vec!["TNT", "C4", "ANFO", "Dynamite", "PETN"]);

        let damage_lines = text.lines().filter(|l| l.starts_with("    * ")).count();
        assert_eq!(damage_lines, 5 * 4);
        assert_eq!(text.lines().filter(|l| *l == BLOCK_RULE).count(), 5);
    }

    #[test]
    fn test_raw_dimensions_are_echoed() {
        let record =
            CalculationRecord::from_inputs(&BlastEngine::default(), " 50.0", "40", "3e1").unwrap();
        assert!(record.render_text().contains("DIMENSIONES:  50.0 x 40 x 3e1 cm"));
    }

    #[test]
    fn test_invalid_input_yields_no_record() {
        let err =
            CalculationRecord::from_inputs(&BlastEngine::default(), "50", "", "30").unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_json_roundtrip() {
        let record = test_record();
        let json = record.to_json().unwrap();
        let roundtrip: CalculationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.results, record.results);
        assert_eq!(roundtrip.calculated_at, record.calculated_at);
    }
}
