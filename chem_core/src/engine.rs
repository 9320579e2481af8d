//! # Chemistry Engine
//!
//! [`ChemEngine`] bundles the read-only data every formula-based calculation
//! needs: the atomic mass table and the parse mode. Engines hold no mutable
//! state, so one instance can serve any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use chem_core::engine::ChemEngine;
//!
//! let engine = ChemEngine::standard();
//!
//! let water = engine.molar_mass("H2O").unwrap();
//! assert!((water.molar_mass - 18.015).abs() < 1e-3);
//!
//! let masses = BTreeMap::from([("H2".to_string(), 4.032), ("O2".to_string(), 32.0)]);
//! let result = engine.stoichiometry("2H2 + O2 -> 2H2O", &masses);
//! assert_eq!(result.limiting_reagent, "H2");
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::calculations::molar_mass::{self, MolarMassResult};
use crate::calculations::stoichiometry::{self, StoichiometryResult};
use crate::config::{self, EngineConfig};
use crate::elements::AtomicMassTable;
use crate::errors::CalcResult;
use crate::formula::{self, FormulaCounts, ParseMode};

static STANDARD_ENGINE: Lazy<ChemEngine> = Lazy::new(ChemEngine::default);

/// Atomic mass table plus parse mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChemEngine {
    table: AtomicMassTable,
    parse_mode: ParseMode,
}

impl ChemEngine {
    /// Engine over a custom table, lenient parsing.
    pub fn new(table: AtomicMassTable) -> Self {
        ChemEngine {
            table,
            parse_mode: ParseMode::Lenient,
        }
    }

    /// Shared engine over the built-in table, lenient parsing.
    pub fn standard() -> &'static ChemEngine {
        &STANDARD_ENGINE
    }

    /// Build an engine from configuration, loading the mass table file if
    /// one is named.
    pub fn from_config(config: &EngineConfig) -> CalcResult<Self> {
        let table = match &config.atomic_mass_table {
            Some(path) => config::load_mass_table(path)?,
            None => AtomicMassTable::default(),
        };
        Ok(ChemEngine::new(table).with_parse_mode(config.parse_mode))
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    pub fn table(&self) -> &AtomicMassTable {
        &self.table
    }

    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    /// Normalize and parse a formula under this engine's parse mode.
    ///
    /// Only strict mode can fail; symbols are not checked against the table.
    pub fn parse_to_counts(&self, formula: &str) -> CalcResult<FormulaCounts> {
        formula::parse_to_counts_with(formula, self.parse_mode)
    }

    /// Molar mass with per-element breakdown. Fails on unknown elements.
    pub fn molar_mass(&self, formula: &str) -> CalcResult<MolarMassResult> {
        molar_mass::calculate(self, formula)
    }

    /// Moles, limiting reagent and product masses. Never fails; a malformed
    /// equation or bad term gives an empty result.
    pub fn stoichiometry(&self, equation: &str, reactant_masses: &BTreeMap<String, f64>) -> StoichiometryResult {
        stoichiometry::calculate(self, equation, reactant_masses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_standard_engine_defaults() {
        let engine = ChemEngine::standard();
        assert_eq!(engine.parse_mode(), ParseMode::Lenient);
        assert_eq!(engine.table().len(), 56);
    }

    #[test]
    fn test_injected_table() {
        let masses = BTreeMap::from([("H".to_string(), 1.0), ("O".to_string(), 16.0)]);
        let engine = ChemEngine::new(AtomicMassTable::new(masses).unwrap());

        let water = engine.molar_mass("H2O").unwrap();
        assert_eq!(water.molar_mass, 18.0);

        // Carbon is not in this table
        assert_eq!(engine.molar_mass("CO2").unwrap_err(), CalcError::unknown_element("C"));
    }

    #[test]
    fn test_strict_engine() {
        let engine = ChemEngine::default().with_parse_mode(ParseMode::Strict);
        assert!(engine.parse_to_counts("H2O").is_ok());
        assert!(engine.parse_to_counts("H2O!").is_err());
        assert!(engine.molar_mass("Ca(OH").is_err());
        assert!(ChemEngine::standard().molar_mass("Ca(OH").is_ok());
    }

    #[test]
    fn test_from_default_config() {
        let engine = ChemEngine::from_config(&EngineConfig::default()).unwrap();
        assert_eq!(engine, ChemEngine::default());
    }
}
