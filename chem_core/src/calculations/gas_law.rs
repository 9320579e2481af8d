//! # Gas Laws
//!
//! Solves the ideal gas law and the combined gas law for the single quantity
//! left unknown.
//!
//! ## Ideal Gas Law
//!
//! PV = nRT with R = 0.0821 L·atm/(mol·K). Leave exactly one of pressure
//! (atm), volume (L), moles or temperature (K) as `None`.
//!
//! ## Combined Gas Law
//!
//! P₁V₁/T₁ = P₂V₂/T₂. Initial conditions are always known; leave exactly one
//! of P₂, V₂, T₂ as `None`.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::gas_law::{calculate_ideal, GasQuantity, IdealGasInput};
//!
//! let input = IdealGasInput {
//!     pressure_atm: Some(1.0),
//!     volume_l: None,
//!     moles: Some(1.0),
//!     temperature_k: Some(273.15),
//! };
//! let result = calculate_ideal(&input).unwrap();
//! assert_eq!(result.solved_for, GasQuantity::Volume);
//! assert!((result.value - 22.43).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Gas constant in L·atm/(mol·K)
pub const GAS_CONSTANT: f64 = 0.0821;

/// Offset between kelvin and degrees Celsius
pub const KELVIN_OFFSET: f64 = 273.15;

/// Ideal gas law input. Exactly one field must be `None`.
///
/// ## JSON Example
///
/// ```json
/// { "pressure_atm": 2.0, "volume_l": 10.0, "moles": null, "temperature_k": 300.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IdealGasInput {
    #[serde(default)]
    pub pressure_atm: Option<f64>,
    #[serde(default)]
    pub volume_l: Option<f64>,
    #[serde(default)]
    pub moles: Option<f64>,
    #[serde(default)]
    pub temperature_k: Option<f64>,
}

/// Combined gas law input. Exactly one of the final conditions must be `None`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "initial_pressure_atm": 1.0,
///   "initial_volume_l": 2.0,
///   "initial_temperature_k": 300.0,
///   "final_pressure_atm": 2.0,
///   "final_volume_l": null,
///   "final_temperature_k": 300.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedGasInput {
    pub initial_pressure_atm: f64,
    pub initial_volume_l: f64,
    pub initial_temperature_k: f64,
    #[serde(default)]
    pub final_pressure_atm: Option<f64>,
    #[serde(default)]
    pub final_volume_l: Option<f64>,
    #[serde(default)]
    pub final_temperature_k: Option<f64>,
}

/// Either gas law, tagged by `law`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum GasLawInput {
    Ideal(IdealGasInput),
    Combined(CombinedGasInput),
}

/// The quantity a gas law calculation solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasQuantity {
    Pressure,
    Volume,
    Moles,
    Temperature,
    FinalPressure,
    FinalVolume,
    FinalTemperature,
}

impl GasQuantity {
    pub fn unit(self) -> &'static str {
        match self {
            GasQuantity::Pressure | GasQuantity::FinalPressure => "atm",
            GasQuantity::Volume | GasQuantity::FinalVolume => "L",
            GasQuantity::Moles => "mol",
            GasQuantity::Temperature | GasQuantity::FinalTemperature => "K",
        }
    }

    pub fn is_temperature(self) -> bool {
        matches!(self, GasQuantity::Temperature | GasQuantity::FinalTemperature)
    }
}

/// Result of a gas law calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "solved_for": "temperature",
///   "value": 304.5,
///   "unit": "K",
///   "formula": "T = PV/nR",
///   "celsius": 31.35
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasLawResult {
    pub solved_for: GasQuantity,
    pub value: f64,
    pub unit: String,
    /// Rearranged equation used
    pub formula: String,
    /// Only present when solving for a temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub celsius: Option<f64>,
}

impl GasLawResult {
    fn new(solved_for: GasQuantity, value: f64, formula: &str) -> Self {
        GasLawResult {
            solved_for,
            value,
            unit: solved_for.unit().to_string(),
            formula: formula.to_string(),
            celsius: solved_for
                .is_temperature()
                .then(|| value - KELVIN_OFFSET),
        }
    }
}

/// Dispatch on the gas law variant.
pub fn calculate(input: &GasLawInput) -> CalcResult<GasLawResult> {
    match input {
        GasLawInput::Ideal(ideal) => calculate_ideal(ideal),
        GasLawInput::Combined(combined) => calculate_combined(combined),
    }
}

/// Solve PV = nRT for the one unknown.
pub fn calculate_ideal(input: &IdealGasInput) -> CalcResult<GasLawResult> {
    let fields = [
        ("pressure_atm", input.pressure_atm),
        ("volume_l", input.volume_l),
        ("moles", input.moles),
        ("temperature_k", input.temperature_k),
    ];
    check_one_unknown(&fields)?;
    for (field, value) in fields {
        if let Some(v) = value {
            check_positive(field, v)?;
        }
    }

    let r = GAS_CONSTANT;
    let result = match (input.pressure_atm, input.volume_l, input.moles, input.temperature_k) {
        (None, Some(v), Some(n), Some(t)) => {
            GasLawResult::new(GasQuantity::Pressure, n * r * t / v, "P = nRT/V")
        }
        (Some(p), None, Some(n), Some(t)) => {
            GasLawResult::new(GasQuantity::Volume, n * r * t / p, "V = nRT/P")
        }
        (Some(p), Some(v), None, Some(t)) => {
            GasLawResult::new(GasQuantity::Moles, p * v / (r * t), "n = PV/RT")
        }
        (Some(p), Some(v), Some(n), None) => {
            GasLawResult::new(GasQuantity::Temperature, p * v / (n * r), "T = PV/nR")
        }
        _ => return Err(one_unknown_error()),
    };
    Ok(result)
}

/// Solve P₁V₁/T₁ = P₂V₂/T₂ for the one unknown final condition.
pub fn calculate_combined(input: &CombinedGasInput) -> CalcResult<GasLawResult> {
    let p1 = input.initial_pressure_atm;
    let v1 = input.initial_volume_l;
    let t1 = input.initial_temperature_k;
    check_positive("initial_pressure_atm", p1)?;
    check_positive("initial_volume_l", v1)?;
    check_positive("initial_temperature_k", t1)?;

    let finals = [
        ("final_pressure_atm", input.final_pressure_atm),
        ("final_volume_l", input.final_volume_l),
        ("final_temperature_k", input.final_temperature_k),
    ];
    check_one_unknown(&finals)?;
    for (field, value) in finals {
        if let Some(v) = value {
            check_positive(field, v)?;
        }
    }

    let result = match (input.final_pressure_atm, input.final_volume_l, input.final_temperature_k) {
        (None, Some(v2), Some(t2)) => GasLawResult::new(
            GasQuantity::FinalPressure,
            p1 * v1 * t2 / (t1 * v2),
            "P₂ = (P₁V₁T₂)/(T₁V₂)",
        ),
        (Some(p2), None, Some(t2)) => GasLawResult::new(
            GasQuantity::FinalVolume,
            p1 * v1 * t2 / (t1 * p2),
            "V₂ = (P₁V₁T₂)/(T₁P₂)",
        ),
        (Some(p2), Some(v2), None) => GasLawResult::new(
            GasQuantity::FinalTemperature,
            p2 * v2 * t1 / (p1 * v1),
            "T₂ = (P₂V₂T₁)/(P₁V₁)",
        ),
        _ => return Err(one_unknown_error()),
    };
    Ok(result)
}

fn check_one_unknown(fields: &[(&str, Option<f64>)]) -> CalcResult<()> {
    let unknowns = fields.iter().filter(|(_, v)| v.is_none()).count();
    if unknowns != 1 {
        return Err(one_unknown_error());
    }
    Ok(())
}

fn one_unknown_error() -> CalcError {
    CalcError::invalid_input(
        "unknown",
        "",
        "Exactly one quantity must be left empty",
    )
}

fn check_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ideal(p: Option<f64>, v: Option<f64>, n: Option<f64>, t: Option<f64>) -> IdealGasInput {
        IdealGasInput {
            pressure_atm: p,
            volume_l: v,
            moles: n,
            temperature_k: t,
        }
    }

    #[test]
    fn test_ideal_each_unknown() {
        let p = calculate_ideal(&ideal(None, Some(22.4), Some(1.0), Some(273.0))).unwrap();
        assert_eq!(p.solved_for, GasQuantity::Pressure);
        assert_abs_diff_eq!(p.value, 0.0821 * 273.0 / 22.4, epsilon = 1e-12);
        assert_eq!(p.unit, "atm");
        assert!(p.celsius.is_none());

        let n = calculate_ideal(&ideal(Some(2.0), Some(10.0), None, Some(300.0))).unwrap();
        assert_eq!(n.formula, "n = PV/RT");
        assert_abs_diff_eq!(n.value, 20.0 / (0.0821 * 300.0), epsilon = 1e-12);

        let t = calculate_ideal(&ideal(Some(1.0), Some(24.63), Some(1.0), None)).unwrap();
        assert_eq!(t.solved_for, GasQuantity::Temperature);
        assert_abs_diff_eq!(t.value, 300.0, epsilon = 0.01);
        assert_abs_diff_eq!(t.celsius.unwrap(), 26.85, epsilon = 0.01);
    }

    #[test]
    fn test_ideal_requires_exactly_one_unknown() {
        assert!(calculate_ideal(&ideal(None, None, Some(1.0), Some(300.0))).is_err());
        assert!(calculate_ideal(&ideal(Some(1.0), Some(1.0), Some(1.0), Some(300.0))).is_err());
        assert!(calculate_ideal(&IdealGasInput::default()).is_err());
    }

    #[test]
    fn test_ideal_rejects_non_positive() {
        assert!(calculate_ideal(&ideal(None, Some(0.0), Some(1.0), Some(300.0))).is_err());
        assert!(calculate_ideal(&ideal(Some(1.0), None, Some(-1.0), Some(300.0))).is_err());
    }

    #[test]
    fn test_combined_boyle() {
        let input = CombinedGasInput {
            initial_pressure_atm: 1.0,
            initial_volume_l: 2.0,
            initial_temperature_k: 300.0,
            final_pressure_atm: Some(2.0),
            final_volume_l: None,
            final_temperature_k: Some(300.0),
        };
        let result = calculate_combined(&input).unwrap();
        assert_eq!(result.solved_for, GasQuantity::FinalVolume);
        assert_abs_diff_eq!(result.value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_combined_final_temperature() {
        let input = CombinedGasInput {
            initial_pressure_atm: 1.0,
            initial_volume_l: 1.0,
            initial_temperature_k: 300.0,
            final_pressure_atm: Some(2.0),
            final_volume_l: Some(1.0),
            final_temperature_k: None,
        };
        let result = calculate(&GasLawInput::Combined(input)).unwrap();
        assert_abs_diff_eq!(result.value, 600.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.celsius.unwrap(), 326.85, epsilon = 1e-9);
    }

    #[test]
    fn test_combined_rejects_bad_initial() {
        let input = CombinedGasInput {
            initial_pressure_atm: 0.0,
            initial_volume_l: 1.0,
            initial_temperature_k: 300.0,
            final_pressure_atm: None,
            final_volume_l: Some(1.0),
            final_temperature_k: Some(300.0),
        };
        assert!(calculate_combined(&input).is_err());
    }

    #[test]
    fn test_tagged_serialization() {
        let json = r#"{"law":"ideal","pressure_atm":1.0,"volume_l":null,"moles":1.0,"temperature_k":273.15}"#;
        let input: GasLawInput = serde_json::from_str(json).unwrap();
        let result = calculate(&input).unwrap();
        assert_eq!(result.solved_for, GasQuantity::Volume);

        let out = serde_json::to_value(&result).unwrap();
        assert_eq!(out["solved_for"], "volume");
        assert!(out.get("celsius").is_none());
    }
}
