//! # Atomic Mass Table
//!
//! Element symbol → standard atomic mass (g/mol). The table is plain data
//! handed to the engine at construction, so a caller can swap in a larger
//! periodic table or a classroom table with rounded masses.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::elements::AtomicMassTable;
//!
//! let table = AtomicMassTable::standard();
//! assert_eq!(table.get("O"), Some(15.999));
//! assert!(table.get("Xx").is_none());
//!
//! // Extend a copy with an element the default table lacks
//! let extended = table.clone().with_mass("Au", 196.967).unwrap();
//! assert_eq!(extended.get("Au"), Some(196.967));
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default atomic masses, hydrogen through barium.
const STANDARD_MASSES: [(&str, f64); 56] = [
    ("H", 1.008), ("He", 4.003), ("Li", 6.941), ("Be", 9.012),
    ("B", 10.811), ("C", 12.011), ("N", 14.007), ("O", 15.999),
    ("F", 18.998), ("Ne", 20.180), ("Na", 22.990), ("Mg", 24.305),
    ("Al", 26.982), ("Si", 28.086), ("P", 30.974), ("S", 32.065),
    ("Cl", 35.453), ("Ar", 39.948), ("K", 39.098), ("Ca", 40.078),
    ("Sc", 44.956), ("Ti", 47.867), ("V", 50.942), ("Cr", 51.996),
    ("Mn", 54.938), ("Fe", 55.845), ("Co", 58.933), ("Ni", 58.693),
    ("Cu", 63.546), ("Zn", 65.38), ("Ga", 69.723), ("Ge", 72.64),
    ("As", 74.922), ("Se", 78.96), ("Br", 79.904), ("Kr", 83.798),
    ("Rb", 85.468), ("Sr", 87.62), ("Y", 88.906), ("Zr", 91.224),
    ("Nb", 92.906), ("Mo", 95.96), ("Tc", 98.0), ("Ru", 101.07),
    ("Rh", 102.906), ("Pd", 106.42), ("Ag", 107.868), ("Cd", 112.411),
    ("In", 114.818), ("Sn", 118.71), ("Sb", 121.76), ("Te", 127.6),
    ("I", 126.904), ("Xe", 131.293), ("Cs", 132.905), ("Ba", 137.327),
];

static STANDARD_TABLE: Lazy<AtomicMassTable> = Lazy::new(|| AtomicMassTable {
    masses: STANDARD_MASSES
        .iter()
        .map(|(symbol, mass)| (symbol.to_string(), *mass))
        .collect(),
});

/// Check that a string is a well-formed element symbol (`[A-Z][a-z]?`).
pub fn is_element_symbol(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), None, None) => first.is_ascii_uppercase(),
        (Some(first), Some(second), None) => first.is_ascii_uppercase() && second.is_ascii_lowercase(),
        _ => false,
    }
}

/// Read-only mapping from element symbol to atomic mass (g/mol).
///
/// Serializes as a flat JSON object: `{ "H": 1.008, "O": 15.999 }`.
/// Deserialization runs the same validation as [`AtomicMassTable::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct AtomicMassTable {
    masses: BTreeMap<String, f64>,
}

impl AtomicMassTable {
    /// The built-in table, shared process-wide.
    pub fn standard() -> &'static AtomicMassTable {
        &STANDARD_TABLE
    }

    /// Build a custom table.
    ///
    /// Every key must be a well-formed element symbol and every mass finite
    /// and positive.
    pub fn new(masses: BTreeMap<String, f64>) -> CalcResult<Self> {
        for (symbol, mass) in &masses {
            validate_entry(symbol, *mass)?;
        }
        Ok(AtomicMassTable { masses })
    }

    /// Return a copy of this table with one element added or replaced.
    pub fn with_mass(mut self, symbol: impl Into<String>, mass: f64) -> CalcResult<Self> {
        let symbol = symbol.into();
        validate_entry(&symbol, mass)?;
        self.masses.insert(symbol, mass);
        Ok(self)
    }

    /// Atomic mass for a symbol, if the table has it.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.masses.get(symbol).copied()
    }

    /// Atomic mass for a symbol, or `UnknownElement`.
    pub fn require(&self, symbol: &str) -> CalcResult<f64> {
        self.get(symbol)
            .ok_or_else(|| CalcError::unknown_element(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.masses.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.masses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// All symbols in alphabetical order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.masses.keys().map(String::as_str)
    }

    /// `(symbol, mass)` pairs in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.masses.iter().map(|(symbol, mass)| (symbol.as_str(), *mass))
    }
}

impl Default for AtomicMassTable {
    fn default() -> Self {
        AtomicMassTable::standard().clone()
    }
}

impl TryFrom<BTreeMap<String, f64>> for AtomicMassTable {
    type Error = CalcError;

    fn try_from(masses: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        AtomicMassTable::new(masses)
    }
}

impl From<AtomicMassTable> for BTreeMap<String, f64> {
    fn from(table: AtomicMassTable) -> Self {
        table.masses
    }
}

fn validate_entry(symbol: &str, mass: f64) -> CalcResult<()> {
    if !is_element_symbol(symbol) {
        return Err(CalcError::invalid_input(
            "symbol",
            symbol,
            "Element symbols are one uppercase letter, optionally followed by one lowercase letter",
        ));
    }
    if !mass.is_finite() || mass <= 0.0 {
        return Err(CalcError::invalid_input(
            format!("atomic_mass[{}]", symbol),
            mass.to_string(),
            "Atomic mass must be a positive number",
        ));
    }
    Ok(())
}
