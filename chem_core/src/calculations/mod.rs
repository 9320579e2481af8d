//! # Chemistry Calculations
//!
//! Each calculation follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(...) -> CalcResult<*Result>` - Pure calculation function
//!
//! Formula-based calculations also take a [`ChemEngine`] for the atomic mass
//! table and parse mode. Stoichiometry is the one calculation that never
//! fails; see its module docs.
//!
//! ## Available Calculations
//!
//! - [`molar_mass`] - Molar mass with per-element breakdown
//! - [`stoichiometry`] - Limiting reagent and theoretical product masses
//! - [`ph`] - pH, pOH, [H⁺], [OH⁻]
//! - [`gas_law`] - Ideal and combined gas laws
//! - [`concentration`] - Molarity, moles, volume
//! - [`percent_yield`] - Percent, actual and theoretical yield
//! - [`empirical_formula`] - Empirical and molecular formula from composition
//! - [`acid_base`] - Conjugate acid/base pairs in a reaction
//!
//! ## Generic Dispatch
//!
//! [`CalculationItem`] wraps every input in one tagged enum so a JSON request
//! can be run without knowing its type in advance:
//!
//! ```rust
//! use chem_core::calculations::CalculationItem;
//! use chem_core::engine::ChemEngine;
//!
//! let item: CalculationItem = serde_json::from_str(r#"{"type":"MolarMass","formula":"NaCl"}"#).unwrap();
//! let output = item.run(ChemEngine::standard()).unwrap();
//! assert!((output["molar_mass"].as_f64().unwrap() - 58.443).abs() < 1e-3);
//! ```

pub mod acid_base;
pub mod concentration;
pub mod empirical_formula;
pub mod gas_law;
pub mod molar_mass;
pub mod percent_yield;
pub mod ph;
pub mod stoichiometry;

use serde::{Deserialize, Serialize};

use crate::engine::ChemEngine;
use crate::errors::CalcResult;
use crate::units::ConversionInput;

// Re-export commonly used types
pub use acid_base::{ConjugatePair, ConjugatePairsInput, ProtonRole};
pub use concentration::{ConcentrationInput, ConcentrationResult, Solute};
pub use empirical_formula::{ElementPercentage, EmpiricalFormulaInput, EmpiricalFormulaResult};
pub use gas_law::{CombinedGasInput, GasLawInput, GasLawResult, IdealGasInput};
pub use molar_mass::{MolarMassInput, MolarMassResult};
pub use percent_yield::{YieldInput, YieldResult};
pub use ph::{PhInput, PhResult};
pub use stoichiometry::{StoichiometryInput, StoichiometryResult};

/// Enum wrapper for all calculation types.
///
/// ## JSON Example
///
/// ```json
/// { "type": "Ph", "kind": "ph", "value": 4.2 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    MolarMass(MolarMassInput),
    Stoichiometry(StoichiometryInput),
    Ph(PhInput),
    GasLaw(GasLawInput),
    Concentration(ConcentrationInput),
    PercentYield(YieldInput),
    EmpiricalFormula(EmpiricalFormulaInput),
    UnitConversion(ConversionInput),
    ConjugatePairs(ConjugatePairsInput),
}

impl CalculationItem {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::MolarMass(_) => "MolarMass",
            CalculationItem::Stoichiometry(_) => "Stoichiometry",
            CalculationItem::Ph(_) => "Ph",
            CalculationItem::GasLaw(_) => "GasLaw",
            CalculationItem::Concentration(_) => "Concentration",
            CalculationItem::PercentYield(_) => "PercentYield",
            CalculationItem::EmpiricalFormula(_) => "EmpiricalFormula",
            CalculationItem::UnitConversion(_) => "UnitConversion",
            CalculationItem::ConjugatePairs(_) => "ConjugatePairs",
        }
    }

    /// Run the calculation and serialize its result.
    pub fn run(&self, engine: &ChemEngine) -> CalcResult<serde_json::Value> {
        let value = match self {
            CalculationItem::MolarMass(input) => {
                serde_json::to_value(molar_mass::calculate(engine, &input.formula)?)?
            }
            CalculationItem::Stoichiometry(input) => {
                serde_json::to_value(stoichiometry::calculate_input(engine, input))?
            }
            CalculationItem::Ph(input) => serde_json::to_value(ph::calculate(input)?)?,
            CalculationItem::GasLaw(input) => serde_json::to_value(gas_law::calculate(input)?)?,
            CalculationItem::Concentration(input) => {
                serde_json::to_value(concentration::calculate(engine, input)?)?
            }
            CalculationItem::PercentYield(input) => {
                serde_json::to_value(percent_yield::calculate(input)?)?
            }
            CalculationItem::EmpiricalFormula(input) => {
                serde_json::to_value(empirical_formula::calculate(engine, input)?)?
            }
            CalculationItem::UnitConversion(input) => serde_json::to_value(input.convert()?)?,
            CalculationItem::ConjugatePairs(input) => {
                serde_json::to_value(acid_base::conjugate_pairs(&input.equation))?
            }
        };
        Ok(value)
    }
}
