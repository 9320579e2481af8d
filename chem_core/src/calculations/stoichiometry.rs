//! # Stoichiometry
//!
//! Given a balanced equation and reactant masses, find the moles of each
//! reactant, the limiting reagent and the theoretical mass of each product.
//!
//! ## Method
//!
//! - moles = mass / molar mass, for reactants with a positive mass
//! - extent = moles / coefficient
//! - limiting reagent = reactant with the smallest positive extent; on a tie
//!   the one written first wins
//! - product mass = extent × coefficient × molar mass
//!
//! ## Failure Behavior
//!
//! This calculation never fails. An equation without an arrow, an unknown
//! element in any term, or any other internal error produces an empty
//! [`StoichiometryResult`], so a multi-field form can show "no data" without
//! an error path.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use chem_core::calculations::stoichiometry::calculate;
//! use chem_core::engine::ChemEngine;
//!
//! let masses = BTreeMap::from([("H2".to_string(), 4.032), ("O2".to_string(), 32.0)]);
//! let result = calculate(ChemEngine::standard(), "2H2 + O2 -> 2H2O", &masses);
//!
//! assert_eq!(result.limiting_reagent, "H2");
//! assert!((result.products["H2O"] - 36.03).abs() < 0.01);
//! ```

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::calculations::molar_mass;
use crate::engine::ChemEngine;
use crate::equation::{split_reaction, ReactionTerm};
use crate::errors::{CalcError, CalcResult};

/// Input for a stoichiometry calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "equation": "2H2 + O2 -> 2H2O",
///   "reactant_masses": { "H2": 4.032, "O2": 32.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoichiometryInput {
    /// Balanced reaction text
    pub equation: String,
    /// Grams of each reactant, keyed by the reactant text as written in the
    /// equation (normalized text is accepted as a fallback)
    #[serde(default)]
    pub reactant_masses: BTreeMap<String, f64>,
}

/// Result of a stoichiometry calculation. Always populated; empty maps and
/// an empty limiting reagent mean "nothing to show".
///
/// ## JSON Example
///
/// ```json
/// {
///   "moles": { "H2": 2.0, "O2": 1.0 },
///   "limiting_reagent": "H2",
///   "products": { "H2O": 36.03 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoichiometryResult {
    /// Moles of each reactant, keyed by reactant text (0 when no mass given)
    pub moles: BTreeMap<String, f64>,
    /// Reactant text of the limiting reagent, or "" when none
    pub limiting_reagent: String,
    /// Theoretical grams of each product, keyed by product text
    pub products: BTreeMap<String, f64>,
}

impl StoichiometryResult {
    /// True when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.moles.is_empty() && self.limiting_reagent.is_empty() && self.products.is_empty()
    }

    pub fn has_limiting_reagent(&self) -> bool {
        !self.limiting_reagent.is_empty()
    }
}

/// Run a stoichiometry calculation. See the module docs for failure behavior.
pub fn calculate(
    engine: &ChemEngine,
    equation: &str,
    reactant_masses: &BTreeMap<String, f64>,
) -> StoichiometryResult {
    match try_calculate(engine, equation, reactant_masses) {
        Ok(result) => result,
        Err(e) => {
            warn!("stoichiometry for {:?} abandoned: {}", equation, e);
            StoichiometryResult::default()
        }
    }
}

/// Convenience wrapper taking a [`StoichiometryInput`].
pub fn calculate_input(engine: &ChemEngine, input: &StoichiometryInput) -> StoichiometryResult {
    calculate(engine, &input.equation, &input.reactant_masses)
}

fn try_calculate(
    engine: &ChemEngine,
    equation: &str,
    reactant_masses: &BTreeMap<String, f64>,
) -> CalcResult<StoichiometryResult> {
    let Some(reaction) = split_reaction(equation) else {
        debug!("no reaction arrow in {:?}", equation);
        return Ok(StoichiometryResult::default());
    };

    let mut moles = BTreeMap::new();
    for term in &reaction.reactants {
        let mass = reactant_masses
            .get(&term.raw_text)
            .or_else(|| reactant_masses.get(&term.normalized_formula))
            .copied()
            .unwrap_or(0.0);
        let n = if mass > 0.0 {
            mass / reactant_molar_mass(engine, term)?
        } else {
            0.0
        };
        moles.insert(term.raw_text.clone(), n);
    }

    // First minimum wins: keep the current pick unless a later extent is
    // strictly smaller.
    let limiting = reaction
        .reactants
        .iter()
        .map(|term| {
            let n = moles.get(&term.raw_text).copied().unwrap_or(0.0);
            (term, n / f64::from(term.coefficient))
        })
        .filter(|(_, extent)| *extent > 0.0)
        .reduce(|best, next| if best.1 <= next.1 { best } else { next });

    let Some((limiting_term, extent)) = limiting else {
        return Ok(StoichiometryResult {
            moles,
            ..StoichiometryResult::default()
        });
    };

    let mut products = BTreeMap::new();
    for term in &reaction.products {
        let molar_mass = molar_mass::calculate(engine, &term.normalized_formula)?.molar_mass;
        let grams = extent * f64::from(term.coefficient) * molar_mass;
        products.insert(term.raw_text.clone(), grams);
    }

    debug!(
        "limiting reagent {:?} with extent {:.6} mol",
        limiting_term.raw_text, extent
    );

    Ok(StoichiometryResult {
        moles,
        limiting_reagent: limiting_term.raw_text.clone(),
        products,
    })
}

/// Molar mass of a reactant; a formula with no atoms cannot be divided by.
fn reactant_molar_mass(engine: &ChemEngine, term: &ReactionTerm) -> CalcResult<f64> {
    let result = molar_mass::calculate(engine, &term.normalized_formula)?;
    if result.molar_mass > 0.0 {
        Ok(result.molar_mass)
    } else {
        Err(CalcError::invalid_input(
            "formula",
            term.raw_text.clone(),
            "Formula contains no element symbols",
        ))
    }
}
