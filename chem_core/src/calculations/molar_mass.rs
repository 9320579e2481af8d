//! # Molar Mass
//!
//! Total molar mass of a formula plus a per-element breakdown.
//!
//! Unknown element symbols are a hard error: this calculation is normally run
//! on its own, and the user needs to know which symbol was wrong.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::molar_mass::calculate;
//! use chem_core::engine::ChemEngine;
//!
//! let glucose = calculate(ChemEngine::standard(), "C6H12O6").unwrap();
//! assert!((glucose.molar_mass - 180.156).abs() < 1e-3);
//! assert_eq!(glucose.breakdown["C"].count, 6);
//! assert_eq!(glucose.breakdown["H"].atomic_mass, 1.008);
//! ```

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::ChemEngine;
use crate::errors::CalcResult;
use crate::formula::symbols_in_order;

/// Input for a molar mass calculation.
///
/// ## JSON Example
///
/// ```json
/// { "formula": "Ca(OH)2" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolarMassInput {
    /// Formula as typed (Unicode subscripts, charges, states allowed)
    pub formula: String,
}

/// One element's share of a molar mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementContribution {
    /// Number of atoms in the formula
    pub count: u32,
    /// Atomic mass used (g/mol)
    pub atomic_mass: f64,
}

impl ElementContribution {
    /// count × atomic mass (g/mol)
    pub fn subtotal(&self) -> f64 {
        f64::from(self.count) * self.atomic_mass
    }
}

/// Result of a molar mass calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "formula": "H2O",
///   "molar_mass": 18.015,
///   "breakdown": {
///     "H": { "count": 2, "atomic_mass": 1.008 },
///     "O": { "count": 1, "atomic_mass": 15.999 }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolarMassResult {
    /// The formula exactly as given
    pub formula: String,
    /// Total molar mass (g/mol)
    pub molar_mass: f64,
    /// Per-element count and atomic mass
    pub breakdown: BTreeMap<String, ElementContribution>,
}

impl MolarMassResult {
    /// Mass fraction of one element (0..=1), if present.
    pub fn mass_fraction(&self, symbol: &str) -> Option<f64> {
        if self.molar_mass <= 0.0 {
            return None;
        }
        self.breakdown
            .get(symbol)
            .map(|c| c.subtotal() / self.molar_mass)
    }
}

/// Calculate the molar mass of a formula.
///
/// # Returns
///
/// * `Ok(MolarMassResult)` - Total and breakdown
/// * `Err(CalcError::UnknownElement)` - A symbol is missing from the engine's table
/// * `Err(CalcError::MalformedFormula | UnbalancedParentheses)` - Strict engines only
pub fn calculate(engine: &ChemEngine, formula: &str) -> CalcResult<MolarMassResult> {
    let counts = engine.parse_to_counts(formula)?;

    // Report the first unknown symbol as written, not in map order.
    for symbol in symbols_in_order(formula) {
        if counts.contains_key(&symbol) {
            engine.table().require(&symbol)?;
        }
    }

    let mut breakdown = BTreeMap::new();
    let mut molar_mass = 0.0;
    for (symbol, count) in counts {
        let atomic_mass = engine.table().require(&symbol)?;
        let contribution = ElementContribution { count, atomic_mass };
        molar_mass += contribution.subtotal();
        breakdown.insert(symbol, contribution);
    }

    debug!("molar mass of {:?} = {:.4} g/mol", formula, molar_mass);

    Ok(MolarMassResult {
        formula: formula.to_string(),
        molar_mass,
        breakdown,
    })
}
