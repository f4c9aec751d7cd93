//! # calc_core - Blast-Effect Estimation Engine
//!
//! `calc_core` estimates what a rectangular package of unknown contents
//! could do if it held an explosive: charge mass, TNT equivalent,
//! fragmentation distance, safety perimeter, concrete shielding thickness,
//! and tiered structural-damage radii, evaluated against several reference
//! explosives at once.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Configurable catalog**: Materials and damage tiers are a value owned
//!   by the engine, not global state
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::calculate;
//!
//! // 50 x 40 x 30 cm package
//! let results = calculate("50", "40", "30").unwrap();
//! for r in &results {
//!     println!("{}: safety perimeter {:.2} m", r.material_name, r.safety_perimeter_m);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The blast-effect engine
//! - [`catalog`] - Material and damage-tier tables, TOML loading
//! - [`materials`] - Reference explosive profiles
//! - [`damage`] - Structural damage tiers
//! - [`dimensions`] - Package dimension input record
//! - [`report`] - Plain-text and JSON report rendering
//! - [`file_io`] - Report files with collision-free naming and export locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod damage;
pub mod dimensions;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod report;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, BlastEngine, DamageRadius, MaterialResult};
pub use catalog::{load_catalog, BlastCatalog};
pub use dimensions::PackageDimensions;
pub use errors::{CalcError, CalcResult};
pub use file_io::{save_report, PendingExport};
pub use report::CalculationRecord;
