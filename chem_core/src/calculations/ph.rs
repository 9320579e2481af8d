//! # pH / pOH
//!
//! Solves the four quantities of aqueous acidity from any one of them, at
//! 25 °C (pKw = 14):
//!
//! - pH + pOH = 14
//! - [H⁺] = 10^-pH, [OH⁻] = 10^-pOH
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::ph::{calculate, Classification, PhInput};
//!
//! let result = calculate(&PhInput::HydrogenConcentration(1.0e-3)).unwrap();
//! assert!((result.ph - 3.0).abs() < 1e-9);
//! assert_eq!(result.classification, Classification::Acidic);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// pKw of water at 25 °C
pub const PKW: f64 = 14.0;

/// The one known quantity.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "hydrogen_concentration", "value": 1.0e-7 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PhInput {
    /// pH, 0 to 14
    Ph(f64),
    /// pOH, 0 to 14
    Poh(f64),
    /// [H⁺] in mol/L, positive
    HydrogenConcentration(f64),
    /// [OH⁻] in mol/L, positive
    HydroxideConcentration(f64),
}

impl PhInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            PhInput::Ph(v) => check_scale("ph", v),
            PhInput::Poh(v) => check_scale("poh", v),
            PhInput::HydrogenConcentration(c) => check_concentration("h_concentration", c),
            PhInput::HydroxideConcentration(c) => check_concentration("oh_concentration", c),
        }
    }
}

fn check_scale(field: &str, value: f64) -> CalcResult<()> {
    if !(0.0..=PKW).contains(&value) {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be between 0 and 14",
        ));
    }
    Ok(())
}

fn check_concentration(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Concentration must be positive",
        ));
    }
    Ok(())
}

/// Acidic below pH 7, basic above, neutral at exactly 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Acidic,
    Neutral,
    Basic,
}

impl Classification {
    pub fn from_ph(ph: f64) -> Self {
        if ph < 7.0 {
            Classification::Acidic
        } else if ph > 7.0 {
            Classification::Basic
        } else {
            Classification::Neutral
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Classification::Acidic => "Acidic",
            Classification::Neutral => "Neutral",
            Classification::Basic => "Basic",
        };
        write!(f, "{}", name)
    }
}

/// All four quantities plus classification.
///
/// ## JSON Example
///
/// ```json
/// {
///   "ph": 3.0,
///   "poh": 11.0,
///   "h_concentration": 0.001,
///   "oh_concentration": 1.0e-11,
///   "classification": "Acidic"
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhResult {
    pub ph: f64,
    pub poh: f64,
    /// [H⁺] (mol/L)
    pub h_concentration: f64,
    /// [OH⁻] (mol/L)
    pub oh_concentration: f64,
    pub classification: Classification,
}

/// Solve for pH, pOH, [H⁺] and [OH⁻].
pub fn calculate(input: &PhInput) -> CalcResult<PhResult> {
    input.validate()?;

    let ph = match *input {
        PhInput::Ph(ph) => ph,
        PhInput::Poh(poh) => PKW - poh,
        PhInput::HydrogenConcentration(h) => -h.log10(),
        PhInput::HydroxideConcentration(oh) => PKW + oh.log10(),
    };
    let poh = PKW - ph;

    // Echo concentrations that were given rather than recomputing them.
    let h_concentration = match *input {
        PhInput::HydrogenConcentration(h) => h,
        _ => 10f64.powf(-ph),
    };
    let oh_concentration = match *input {
        PhInput::HydroxideConcentration(oh) => oh,
        _ => 10f64.powf(-poh),
    };

    Ok(PhResult {
        ph,
        poh,
        h_concentration,
        oh_concentration,
        classification: Classification::from_ph(ph),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_from_ph() {
        let result = calculate(&PhInput::Ph(7.4)).unwrap();
        assert_abs_diff_eq!(result.poh, 6.6, epsilon = 1e-12);
        assert_relative_eq!(result.h_concentration, 3.981e-8, max_relative = 1e-3);
        assert_eq!(result.classification, Classification::Basic);
    }

    #[test]
    fn test_from_poh() {
        let result = calculate(&PhInput::Poh(4.0)).unwrap();
        assert_abs_diff_eq!(result.ph, 10.0, epsilon = 1e-12);
        assert_relative_eq!(result.oh_concentration, 1.0e-4, max_relative = 1e-9);
    }

    #[test]
    fn test_from_concentrations() {
        let result = calculate(&PhInput::HydrogenConcentration(1.0e-7)).unwrap();
        assert_abs_diff_eq!(result.ph, 7.0, epsilon = 1e-9);

        let result = calculate(&PhInput::HydroxideConcentration(0.01)).unwrap();
        assert_abs_diff_eq!(result.poh, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.ph, 12.0, epsilon = 1e-9);
        assert_eq!(result.oh_concentration, 0.01);
        assert_eq!(result.classification, Classification::Basic);
    }

    #[test]
    fn test_neutral() {
        assert_eq!(calculate(&PhInput::Ph(7.0)).unwrap().classification, Classification::Neutral);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(calculate(&PhInput::Ph(-0.5)).is_err());
        assert!(calculate(&PhInput::Poh(14.5)).is_err());
        assert!(calculate(&PhInput::Ph(f64::NAN)).is_err());
        assert!(calculate(&PhInput::HydrogenConcentration(0.0)).is_err());
        assert!(calculate(&PhInput::HydroxideConcentration(-1.0)).is_err());
    }

    #[test]
    fn test_serialization() {
        let input = PhInput::HydrogenConcentration(1.0e-7);
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"kind":"hydrogen_concentration","value":1e-7}"#);
        let roundtrip: PhInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, input);
    }
}
