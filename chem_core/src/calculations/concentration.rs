//! # Solution Concentration
//!
//! Molarity relations for a solute in solution:
//!
//! - M = n / V
//! - n = M × V
//! - V = n / M
//! - M = (mass / MM) / V, where MM is given directly or computed from a formula
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::concentration::{calculate, ConcentrationInput, Solute};
//! use chem_core::engine::ChemEngine;
//!
//! let input = ConcentrationInput::MassToMolarity {
//!     mass_g: 58.443,
//!     solute: Solute::Formula("NaCl".to_string()),
//!     volume_l: 2.0,
//! };
//! let result = calculate(ChemEngine::standard(), &input).unwrap();
//! assert!((result.value - 0.5).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::engine::ChemEngine;
use crate::errors::{CalcError, CalcResult};

/// Where the solute's molar mass comes from. Deserializes from either a
/// number (g/mol) or a formula string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Solute {
    MolarMass(f64),
    Formula(String),
}

impl Solute {
    /// Molar mass in g/mol, looked up through the engine for a formula.
    pub fn molar_mass(&self, engine: &ChemEngine) -> CalcResult<f64> {
        let mass = match self {
            Solute::MolarMass(mass) => *mass,
            Solute::Formula(formula) => engine.molar_mass(formula)?.molar_mass,
        };
        positive("molar_mass", mass)
    }
}

/// What to solve for, tagged by `solve_for`.
///
/// ## JSON Example
///
/// ```json
/// { "solve_for": "mass_to_molarity", "mass_g": 40.0, "solute": "NaOH", "volume_l": 1.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solve_for", rename_all = "snake_case")]
pub enum ConcentrationInput {
    Molarity { moles: f64, volume_l: f64 },
    Moles { molarity: f64, volume_l: f64 },
    Volume { moles: f64, molarity: f64 },
    MassToMolarity { mass_g: f64, solute: Solute, volume_l: f64 },
}

/// Result of a concentration calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "value": 0.5,
///   "unit": "M",
///   "formula": "M = (mass / MM) / V",
///   "moles": 1.0,
///   "molar_mass": 58.443
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationResult {
    pub value: f64,
    pub unit: String,
    pub formula: String,
    /// Intermediate moles, mass-to-molarity only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moles: Option<f64>,
    /// Molar mass used, mass-to-molarity only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub molar_mass: Option<f64>,
}

impl ConcentrationResult {
    fn simple(value: f64, unit: &str, formula: &str) -> Self {
        ConcentrationResult {
            value,
            unit: unit.to_string(),
            formula: formula.to_string(),
            moles: None,
            molar_mass: None,
        }
    }
}

/// Run a concentration calculation.
pub fn calculate(engine: &ChemEngine, input: &ConcentrationInput) -> CalcResult<ConcentrationResult> {
    let result = match input {
        ConcentrationInput::Molarity { moles, volume_l } => {
            let n = non_negative("moles", *moles)?;
            let v = positive("volume_l", *volume_l)?;
            ConcentrationResult::simple(n / v, "M", "M = n / V")
        }
        ConcentrationInput::Moles { molarity, volume_l } => {
            let m = non_negative("molarity", *molarity)?;
            let v = non_negative("volume_l", *volume_l)?;
            ConcentrationResult::simple(m * v, "mol", "n = M × V")
        }
        ConcentrationInput::Volume { moles, molarity } => {
            let n = non_negative("moles", *moles)?;
            let m = positive("molarity", *molarity)?;
            ConcentrationResult::simple(n / m, "L", "V = n / M")
        }
        ConcentrationInput::MassToMolarity {
            mass_g,
            solute,
            volume_l,
        } => {
            let mass = non_negative("mass_g", *mass_g)?;
            let v = positive("volume_l", *volume_l)?;
            let molar_mass = solute.molar_mass(engine)?;
            let moles = mass / molar_mass;
            ConcentrationResult {
                value: moles / v,
                unit: "M".to_string(),
                formula: "M = (mass / MM) / V".to_string(),
                moles: Some(moles),
                molar_mass: Some(molar_mass),
            }
        }
    };
    Ok(result)
}

fn positive(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be positive",
        ));
    }
    Ok(value)
}

fn non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value cannot be negative",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn run(input: ConcentrationInput) -> CalcResult<ConcentrationResult> {
        calculate(ChemEngine::standard(), &input)
    }

    #[test]
    fn test_basic_relations() {
        let m = run(ConcentrationInput::Molarity { moles: 0.5, volume_l: 0.25 }).unwrap();
        assert_abs_diff_eq!(m.value, 2.0, epsilon = 1e-12);
        assert_eq!(m.unit, "M");

        let n = run(ConcentrationInput::Moles { molarity: 2.0, volume_l: 0.25 }).unwrap();
        assert_abs_diff_eq!(n.value, 0.5, epsilon = 1e-12);
        assert_eq!(n.unit, "mol");

        let v = run(ConcentrationInput::Volume { moles: 0.5, molarity: 2.0 }).unwrap();
        assert_abs_diff_eq!(v.value, 0.25, epsilon = 1e-12);
        assert!(v.moles.is_none());
    }

    #[test]
    fn test_mass_to_molarity_with_molar_mass() {
        let result = run(ConcentrationInput::MassToMolarity {
            mass_g: 40.0,
            solute: Solute::MolarMass(40.0),
            volume_l: 0.5,
        })
        .unwrap();
        assert_abs_diff_eq!(result.value, 2.0, epsilon = 1e-12);
        assert_eq!(result.moles, Some(1.0));
    }

    #[test]
    fn test_mass_to_molarity_with_formula() {
        let result = run(ConcentrationInput::MassToMolarity {
            mass_g: 58.443,
            solute: Solute::Formula("NaCl".to_string()),
            volume_l: 1.0,
        })
        .unwrap();
        assert_abs_diff_eq!(result.value, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.molar_mass.unwrap(), 58.443, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_divisors_rejected() {
        assert!(run(ConcentrationInput::Molarity { moles: 1.0, volume_l: 0.0 }).is_err());
        assert!(run(ConcentrationInput::Volume { moles: 1.0, molarity: 0.0 }).is_err());
        assert!(run(ConcentrationInput::MassToMolarity {
            mass_g: 1.0,
            solute: Solute::MolarMass(0.0),
            volume_l: 1.0,
        })
        .is_err());
    }

    #[test]
    fn test_unknown_solute_element() {
        let err = run(ConcentrationInput::MassToMolarity {
            mass_g: 1.0,
            solute: Solute::Formula("Xx".to_string()),
            volume_l: 1.0,
        })
        .unwrap_err();
        assert_eq!(err, CalcError::unknown_element("Xx"));
    }

    #[test]
    fn test_solute_deserializes_number_or_formula() {
        let json = r#"{"solve_for":"mass_to_molarity","mass_g":18.015,"solute":"H2O","volume_l":1.0}"#;
        let input: ConcentrationInput = serde_json::from_str(json).unwrap();
        assert!(matches!(
            input,
            ConcentrationInput::MassToMolarity { solute: Solute::Formula(_), .. }
        ));

        let json = r#"{"solve_for":"mass_to_molarity","mass_g":18.015,"solute":18.015,"volume_l":1.0}"#;
        let input: ConcentrationInput = serde_json::from_str(json).unwrap();
        assert!(matches!(
            input,
            ConcentrationInput::MassToMolarity { solute: Solute::MolarMass(_), .. }
        ));
    }
}
