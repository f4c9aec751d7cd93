//! # Blast Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` / input record - parameters (JSON-serializable)
//! - `*Result` - results (JSON-serializable)
//! - `calculate(...) -> CalcResult<...>` - pure calculation function
//!
//! ## Available Calculations
//!
//! - [`blast`] - Per-material blast-effect estimate for a package

pub mod blast;

// Re-export commonly used types
pub use blast::{
    calculate, BlastEngine, DamageRadius, MaterialResult, FRAGMENTATION_COEFFICIENT,
    SAFETY_FACTOR, SHIELDING_COEFFICIENT,
};
