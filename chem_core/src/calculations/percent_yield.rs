//! # Percent Yield
//!
//! percent = actual / theoretical × 100, rearranged for whichever of the
//! three is unknown. Masses may be in any unit as long as both use the same.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::percent_yield::{calculate, YieldEfficiency, YieldInput};
//!
//! let result = calculate(&YieldInput::Percent { actual: 8.5, theoretical: 10.0 }).unwrap();
//! assert!((result.value - 85.0).abs() < 1e-9);
//! assert_eq!(result.efficiency, Some(YieldEfficiency::Good));
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// What to solve for, tagged by `solve_for`.
///
/// ## JSON Example
///
/// ```json
/// { "solve_for": "theoretical", "actual": 4.5, "percent": 90.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solve_for", rename_all = "snake_case")]
pub enum YieldInput {
    Percent { actual: f64, theoretical: f64 },
    Actual { percent: f64, theoretical: f64 },
    Theoretical { actual: f64, percent: f64 },
}

/// Qualitative band for a percent yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldEfficiency {
    Excellent,
    Good,
    Moderate,
    Low,
    VeryLow,
}

impl YieldEfficiency {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            YieldEfficiency::Excellent
        } else if percent >= 70.0 {
            YieldEfficiency::Good
        } else if percent >= 50.0 {
            YieldEfficiency::Moderate
        } else if percent >= 30.0 {
            YieldEfficiency::Low
        } else {
            YieldEfficiency::VeryLow
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            YieldEfficiency::Excellent => "Excellent yield, very efficient reaction",
            YieldEfficiency::Good => "Good yield, reasonably efficient",
            YieldEfficiency::Moderate => "Moderate yield, some losses occurred",
            YieldEfficiency::Low => "Low yield, significant losses",
            YieldEfficiency::VeryLow => "Very low yield, check the procedure",
        }
    }
}

/// Result of a percent yield calculation.
///
/// ## JSON Example
///
/// ```json
/// { "value": 85.0, "unit": "%", "formula": "% yield = (actual / theoretical) × 100", "efficiency": "good" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    pub value: f64,
    /// "%" for a percent, "g" for a mass
    pub unit: String,
    pub formula: String,
    /// Only set when solving for the percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<YieldEfficiency>,
}

/// Run a percent yield calculation.
pub fn calculate(input: &YieldInput) -> CalcResult<YieldResult> {
    let result = match *input {
        YieldInput::Percent { actual, theoretical } => {
            let actual = non_negative("actual", actual)?;
            let theoretical = positive("theoretical", theoretical)?;
            let percent = actual / theoretical * 100.0;
            YieldResult {
                value: percent,
                unit: "%".to_string(),
                formula: "% yield = (actual / theoretical) × 100".to_string(),
                efficiency: Some(YieldEfficiency::from_percent(percent)),
            }
        }
        YieldInput::Actual { percent, theoretical } => {
            let percent = non_negative("percent", percent)?;
            let theoretical = non_negative("theoretical", theoretical)?;
            YieldResult {
                value: percent / 100.0 * theoretical,
                unit: "g".to_string(),
                formula: "actual = (% yield / 100) × theoretical".to_string(),
                efficiency: None,
            }
        }
        YieldInput::Theoretical { actual, percent } => {
            let actual = non_negative("actual", actual)?;
            let percent = positive("percent", percent)?;
            YieldResult {
                value: actual * 100.0 / percent,
                unit: "g".to_string(),
                formula: "theoretical = (actual × 100) / % yield".to_string(),
                efficiency: None,
            }
        }
    };
    Ok(result)
}

fn positive(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(value)
}

fn non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_percent() {
        let result = calculate(&YieldInput::Percent { actual: 4.5, theoretical: 5.0 }).unwrap();
        assert_abs_diff_eq!(result.value, 90.0, epsilon = 1e-9);
        assert_eq!(result.efficiency, Some(YieldEfficiency::Excellent));
    }

    #[test]
    fn test_actual_and_theoretical() {
        let actual = calculate(&YieldInput::Actual { percent: 75.0, theoretical: 20.0 }).unwrap();
        assert_abs_diff_eq!(actual.value, 15.0, epsilon = 1e-12);
        assert!(actual.efficiency.is_none());

        let theoretical = calculate(&YieldInput::Theoretical { actual: 15.0, percent: 75.0 }).unwrap();
        assert_abs_diff_eq!(theoretical.value, 20.0, epsilon = 1e-12);
        assert_eq!(theoretical.unit, "g");
    }

    #[test]
    fn test_efficiency_bands() {
        assert_eq!(YieldEfficiency::from_percent(100.0), YieldEfficiency::Excellent);
        assert_eq!(YieldEfficiency::from_percent(70.0), YieldEfficiency::Good);
        assert_eq!(YieldEfficiency::from_percent(69.9), YieldEfficiency::Moderate);
        assert_eq!(YieldEfficiency::from_percent(30.0), YieldEfficiency::Low);
        assert_eq!(YieldEfficiency::from_percent(12.0), YieldEfficiency::VeryLow);
    }

    #[test]
    fn test_zero_divisors_rejected() {
        assert!(calculate(&YieldInput::Percent { actual: 1.0, theoretical: 0.0 }).is_err());
        assert!(calculate(&YieldInput::Theoretical { actual: 1.0, percent: 0.0 }).is_err());
        assert!(calculate(&YieldInput::Actual { percent: -5.0, theoretical: 1.0 }).is_err());
    }
}
