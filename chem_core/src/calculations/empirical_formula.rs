//! # Empirical and Molecular Formula
//!
//! Derives the simplest whole-number formula from percent composition, and
//! the molecular formula when the compound's molar mass is known.
//!
//! ## Method
//!
//! 1. moles of each element = percentage / atomic mass (100 g basis)
//! 2. ratio = moles / smallest moles
//! 3. smallest multiplier in 1..=10 that brings every ratio within 0.1 of a
//!    whole number (1 if none does); counts are the rounded products
//! 4. molecular multiplier = round(molecular mass / empirical mass)
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::empirical_formula::{calculate, ElementPercentage, EmpiricalFormulaInput};
//! use chem_core::engine::ChemEngine;
//!
//! let input = EmpiricalFormulaInput {
//!     elements: vec![
//!         ElementPercentage::new("C", 40.0),
//!         ElementPercentage::new("H", 6.7),
//!         ElementPercentage::new("O", 53.3),
//!     ],
//!     molecular_mass: Some(180.0),
//! };
//! let result = calculate(ChemEngine::standard(), &input).unwrap();
//! assert_eq!(result.empirical_formula, "CH2O");
//! assert_eq!(result.molecular_formula, "C6H12O6");
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::ChemEngine;
use crate::errors::{CalcError, CalcResult};

/// Largest whole-number multiplier tried when clearing fractional ratios
pub const MAX_MULTIPLIER: u32 = 10;

/// How far a scaled ratio may sit from a whole number
pub const RATIO_TOLERANCE: f64 = 0.1;

/// One element's share of the composition.
///
/// ## JSON Example
///
/// ```json
/// { "element": "C", "percentage": 40.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementPercentage {
    pub element: String,
    /// Mass percent (any positive scale; only ratios matter)
    pub percentage: f64,
    /// Overrides the engine's atomic mass for this element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic_mass: Option<f64>,
}

impl ElementPercentage {
    pub fn new(element: impl Into<String>, percentage: f64) -> Self {
        ElementPercentage {
            element: element.into(),
            percentage,
            atomic_mass: None,
        }
    }

    pub fn with_atomic_mass(mut self, atomic_mass: f64) -> Self {
        self.atomic_mass = Some(atomic_mass);
        self
    }
}

/// Input for an empirical formula calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalFormulaInput {
    pub elements: Vec<ElementPercentage>,
    /// Molar mass of the compound (g/mol), for the molecular formula
    #[serde(default)]
    pub molecular_mass: Option<f64>,
}

/// Per-element working values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRatio {
    pub element: String,
    pub atomic_mass: f64,
    /// Moles per 100 g of compound
    pub moles: f64,
    /// Moles relative to the smallest
    pub ratio: f64,
    /// Whole-number count in the empirical formula
    pub count: u32,
}

/// Result of an empirical formula calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "empirical_formula": "CH2O",
///   "empirical_mass": 30.026,
///   "molecular_formula": "C6H12O6",
///   "molecular_multiplier": 6,
///   "ratios": []
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalFormulaResult {
    pub empirical_formula: String,
    /// Σ count × atomic mass (g/mol)
    pub empirical_mass: f64,
    /// Same as the empirical formula unless a molecular mass was given
    pub molecular_formula: String,
    pub molecular_multiplier: u32,
    pub ratios: Vec<ElementRatio>,
}

/// Run an empirical formula calculation.
pub fn calculate(engine: &ChemEngine, input: &EmpiricalFormulaInput) -> CalcResult<EmpiricalFormulaResult> {
    if input.elements.is_empty() {
        return Err(CalcError::missing_field("elements"));
    }

    let mut ratios = Vec::with_capacity(input.elements.len());
    for entry in &input.elements {
        let element = entry.element.trim();
        if element.is_empty() {
            return Err(CalcError::missing_field("element"));
        }
        if !entry.percentage.is_finite() || entry.percentage <= 0.0 {
            return Err(CalcError::invalid_input(
                format!("percentage[{}]", element),
                entry.percentage.to_string(),
                "Percentage must be positive",
            ));
        }
        let atomic_mass = match entry.atomic_mass {
            Some(mass) if mass.is_finite() && mass > 0.0 => mass,
            Some(mass) => {
                return Err(CalcError::invalid_input(
                    format!("atomic_mass[{}]", element),
                    mass.to_string(),
                    "Atomic mass must be positive",
                ))
            }
            None => engine.table().require(element)?,
        };
        ratios.push(ElementRatio {
            element: element.to_string(),
            atomic_mass,
            moles: entry.percentage / atomic_mass,
            ratio: 0.0,
            count: 0,
        });
    }

    let min_moles = ratios
        .iter()
        .map(|r| r.moles)
        .fold(f64::INFINITY, f64::min);
    for r in &mut ratios {
        r.ratio = r.moles / min_moles;
    }

    let multiplier = whole_number_multiplier(&ratios);
    for r in &mut ratios {
        r.count = (r.ratio * f64::from(multiplier)).round() as u32;
    }
    debug!("empirical multiplier {} for {} elements", multiplier, ratios.len());

    let empirical_formula = format_formula(&ratios, 1);
    let empirical_mass: f64 = ratios
        .iter()
        .map(|r| f64::from(r.count) * r.atomic_mass)
        .sum();

    let molecular_multiplier = match input.molecular_mass {
        Some(mass) if mass.is_finite() && mass > 0.0 => {
            ((mass / empirical_mass).round() as u32).max(1)
        }
        Some(mass) => {
            return Err(CalcError::invalid_input(
                "molecular_mass",
                mass.to_string(),
                "Molecular mass must be positive",
            ))
        }
        None => 1,
    };

    Ok(EmpiricalFormulaResult {
        empirical_formula,
        empirical_mass,
        molecular_formula: format_formula(&ratios, molecular_multiplier),
        molecular_multiplier,
        ratios,
    })
}

fn whole_number_multiplier(ratios: &[ElementRatio]) -> u32 {
    (1..=MAX_MULTIPLIER)
        .find(|&m| {
            ratios.iter().all(|r| {
                let scaled = r.ratio * f64::from(m);
                (scaled - scaled.round()).abs() < RATIO_TOLERANCE
            })
        })
        .unwrap_or(1)
}

/// Element symbols in input order; a count of 1 is omitted.
fn format_formula(ratios: &[ElementRatio], multiplier: u32) -> String {
    let mut formula = String::new();
    for r in ratios {
        formula.push_str(&r.element);
        let count = r.count.saturating_mul(multiplier);
        if count > 1 {
            formula.push_str(&count.to_string());
        }
    }
    formula
}
