//! # Unit Types
//!
//! Type-safe wrappers for the quantities chemistry calculations pass around,
//! plus a general [`convert`] between mass, amount, volume and particle
//! count units.
//!
//! ## Conversions
//!
//! - mass ↔ mass and volume ↔ volume: fixed factors
//! - mass ↔ moles: molar mass (g/mol) required
//! - moles ↔ volume: ideal gas at STP, 22.4 L/mol
//! - moles ↔ particles: Avogadro's number, 6.022 × 10²³
//! - mass ↔ particles: through moles, molar mass required
//!
//! Volume ↔ mass and volume ↔ particles are not supported.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::units::{convert, Grams, Kilograms, Unit};
//!
//! let kg: Kilograms = Grams(2500.0).into();
//! assert_eq!(kg.0, 2.5);
//!
//! let litres = convert(2.0, Unit::Moles, Unit::Liters, None).unwrap();
//! assert!((litres - 44.8).abs() < 1e-9);
//!
//! assert!(convert(10.0, Unit::Grams, Unit::Moles, None).is_err());
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Avogadro's number (particles per mole)
pub const AVOGADRO: f64 = 6.022e23;

/// Molar volume of an ideal gas at STP (L/mol)
pub const STP_MOLAR_VOLUME: f64 = 22.4;

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl From<Grams> for Kilograms {
    fn from(g: Grams) -> Self {
        Kilograms(g.0 / 1000.0)
    }
}

impl From<Kilograms> for Grams {
    fn from(kg: Kilograms) -> Self {
        Grams(kg.0 * 1000.0)
    }
}

// ============================================================================
// Amount Units
// ============================================================================

/// Amount of substance in moles
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Moles(pub f64);

/// Count of atoms, molecules or formula units
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Particles(pub f64);

impl From<Moles> for Particles {
    fn from(mol: Moles) -> Self {
        Particles(mol.0 * AVOGADRO)
    }
}

impl From<Particles> for Moles {
    fn from(n: Particles) -> Self {
        Moles(n.0 / AVOGADRO)
    }
}

impl Moles {
    /// n = m / M
    pub fn from_mass(mass: Grams, molar_mass: f64) -> Self {
        Moles(mass.0 / molar_mass)
    }

    /// m = n × M
    pub fn to_mass(self, molar_mass: f64) -> Grams {
        Grams(self.0 * molar_mass)
    }

    /// Volume of this much ideal gas at STP
    pub fn stp_volume(self) -> Liters {
        Liters(self.0 * STP_MOLAR_VOLUME)
    }

    /// Moles of ideal gas occupying a volume at STP
    pub fn from_stp_volume(volume: Liters) -> Self {
        Moles(volume.0 / STP_MOLAR_VOLUME)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

/// Volume in milliliters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliliters(pub f64);

impl From<Liters> for Milliliters {
    fn from(l: Liters) -> Self {
        Milliliters(l.0 * 1000.0)
    }
}

impl From<Milliliters> for Liters {
    fn from(ml: Milliliters) -> Self {
        Liters(ml.0 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Grams);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Moles);
impl_arithmetic!(Particles);
impl_arithmetic!(Liters);
impl_arithmetic!(Milliliters);

// ============================================================================
// General Conversion
// ============================================================================

/// A unit accepted by [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Grams,
    Kilograms,
    Moles,
    Liters,
    Milliliters,
    CubicMeters,
    CubicDecimeters,
    CubicCentimeters,
    CubicMillimeters,
    Particles,
}

/// What a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Mass,
    Amount,
    Volume,
    Count,
}

impl Unit {
    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Grams | Unit::Kilograms => Dimension::Mass,
            Unit::Moles => Dimension::Amount,
            Unit::Particles => Dimension::Count,
            Unit::Liters
            | Unit::Milliliters
            | Unit::CubicMeters
            | Unit::CubicDecimeters
            | Unit::CubicCentimeters
            | Unit::CubicMillimeters => Dimension::Volume,
        }
    }

    /// Short symbol, e.g. "mL"
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Kilograms => "kg",
            Unit::Moles => "mol",
            Unit::Liters => "L",
            Unit::Milliliters => "mL",
            Unit::CubicMeters => "m³",
            Unit::CubicDecimeters => "dm³",
            Unit::CubicCentimeters => "cm³",
            Unit::CubicMillimeters => "mm³",
            Unit::Particles => "particles",
        }
    }

    /// Size of one unit in the base of its dimension (g, mol, L, particles).
    fn base_factor(self) -> f64 {
        match self {
            Unit::Grams | Unit::Moles | Unit::Liters | Unit::Particles => 1.0,
            Unit::Kilograms => 1000.0,
            Unit::Milliliters => 1.0e-3,
            Unit::CubicMeters => 1000.0,
            Unit::CubicDecimeters => 1.0,
            Unit::CubicCentimeters => 1.0e-3,
            Unit::CubicMillimeters => 1.0e-6,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Unit {
    type Err = CalcError;

    /// Accepts symbols and names, case-insensitively ("mL", "ml",
    /// "milliliters", "cm3", "cm³", "atoms", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('³', "3");
        let unit = match key.as_str() {
            "g" | "gram" | "grams" => Unit::Grams,
            "kg" | "kilogram" | "kilograms" => Unit::Kilograms,
            "mol" | "mole" | "moles" => Unit::Moles,
            "l" | "liter" | "liters" | "litre" | "litres" => Unit::Liters,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => Unit::Milliliters,
            "m3" | "cubic_meters" => Unit::CubicMeters,
            "dm3" | "cubic_decimeters" => Unit::CubicDecimeters,
            "cm3" | "cc" | "cubic_centimeters" => Unit::CubicCentimeters,
            "mm3" | "cubic_millimeters" => Unit::CubicMillimeters,
            "particles" | "atoms" | "molecules" => Unit::Particles,
            _ => {
                return Err(CalcError::invalid_input(
                    "unit",
                    s,
                    "Unknown unit",
                ))
            }
        };
        Ok(unit)
    }
}

/// Convert a value between units.
///
/// # Arguments
///
/// * `molar_mass` - g/mol, required whenever mass meets moles or particles
///
/// # Returns
///
/// * `Err(CalcError::MissingField)` - Molar mass needed but not given
/// * `Err(CalcError::UnsupportedConversion)` - Volume paired with mass or particles
pub fn convert(value: f64, from: Unit, to: Unit, molar_mass: Option<f64>) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input("value", value.to_string(), "Value must be a finite number"));
    }
    if from == to {
        return Ok(value);
    }

    let base = value * from.base_factor();
    let converted = match (from.dimension(), to.dimension()) {
        (a, b) if a == b => base,
        (Dimension::Mass, Dimension::Amount) => Moles::from_mass(Grams(base), require_molar_mass(molar_mass)?).0,
        (Dimension::Amount, Dimension::Mass) => Moles(base).to_mass(require_molar_mass(molar_mass)?).0,
        (Dimension::Amount, Dimension::Volume) => Moles(base).stp_volume().0,
        (Dimension::Volume, Dimension::Amount) => Moles::from_stp_volume(Liters(base)).0,
        (Dimension::Amount, Dimension::Count) => Particles::from(Moles(base)).0,
        (Dimension::Count, Dimension::Amount) => Moles::from(Particles(base)).0,
        (Dimension::Mass, Dimension::Count) => {
            let moles = Moles::from_mass(Grams(base), require_molar_mass(molar_mass)?);
            Particles::from(moles).0
        }
        (Dimension::Count, Dimension::Mass) => {
            let moles = Moles::from(Particles(base));
            moles.to_mass(require_molar_mass(molar_mass)?).0
        }
        _ => {
            return Err(CalcError::unsupported_conversion(
                from.symbol(),
                to.symbol(),
            ))
        }
    };

    Ok(converted / to.base_factor())
}

fn require_molar_mass(molar_mass: Option<f64>) -> CalcResult<f64> {
    match molar_mass {
        Some(m) if m.is_finite() && m > 0.0 => Ok(m),
        Some(m) => Err(CalcError::invalid_input("molar_mass", m.to_string(), "Molar mass must be positive")),
        None => Err(CalcError::missing_field("molar_mass")),
    }
}

/// Input for a unit conversion.
///
/// ## JSON Example
///
/// ```json
/// { "value": 36.03, "from": "grams", "to": "moles", "molar_mass": 18.015 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionInput {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
    #[serde(default)]
    pub molar_mass: Option<f64>,
}

/// Result of a unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub value: f64,
    pub unit: Unit,
}

impl ConversionInput {
    pub fn convert(&self) -> CalcResult<ConversionResult> {
        Ok(ConversionResult {
            value: convert(self.value, self.from, self.to, self.molar_mass)?,
            unit: self.to,
        })
    }
}
