//! # chem_core - Chemistry Calculation Engine
//!
//! `chem_core` is the computational heart of Beaker: formula parsing, molar
//! mass and stoichiometry, plus the everyday calculators of a chemistry
//! course. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Forgiving Input**: Unicode subscripts, charges, state annotations and
//!   hydrate dots are all accepted in formulas
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! let counts = chem_core::parse_to_counts("Ca(OH)₂");
//! assert_eq!(counts["H"], 2);
//!
//! let water = chem_core::molar_mass("H₂O").unwrap();
//! assert!((water.molar_mass - 18.015).abs() < 1e-3);
//!
//! let masses = BTreeMap::from([("H2".to_string(), 4.032), ("O2".to_string(), 32.0)]);
//! let result = chem_core::stoichiometry("2H2 + O2 -> 2H2O", &masses);
//! assert_eq!(result.limiting_reagent, "H2");
//! ```
//!
//! ## Modules
//!
//! - [`formula`] - Normalization and parsing of formula text
//! - [`equation`] - Splitting reaction text into terms
//! - [`elements`] - Atomic mass table
//! - [`engine`] - Table plus parse mode, shared by all formula calculations
//! - [`calculations`] - Every calculation type
//! - [`units`] - Type-safe unit wrappers and unit conversion
//! - [`config`] - Config and mass table files with atomic saves
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod elements;
pub mod engine;
pub mod equation;
pub mod errors;
pub mod formula;
pub mod units;

use std::collections::BTreeMap;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, MolarMassResult, StoichiometryResult};
pub use config::EngineConfig;
pub use elements::AtomicMassTable;
pub use engine::ChemEngine;
pub use errors::{CalcError, CalcResult};
pub use formula::{normalize, parse_to_counts, FormulaCounts, ParseMode};

/// Molar mass on the standard engine. Fails on unknown elements.
pub fn molar_mass(formula: &str) -> CalcResult<MolarMassResult> {
    ChemEngine::standard().molar_mass(formula)
}

/// Stoichiometry on the standard engine. Never fails.
pub fn stoichiometry(equation: &str, reactant_masses: &BTreeMap<String, f64>) -> StoichiometryResult {
    ChemEngine::standard().stoichiometry(equation, reactant_masses)
}
