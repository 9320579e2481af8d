//! # Chemical Formulas
//!
//! Turning formula text into element counts happens in two steps:
//!
//! 1. [`normalize`] strips whitespace, hydrate dots, state annotations and
//!    charges, and maps Unicode subscripts to ASCII digits.
//! 2. [`parse_normalized`] runs the formula grammar over the result.
//!
//! [`parse_to_counts`] does both with the forgiving default; use
//! [`parse_to_counts_with`] and [`ParseMode::Strict`] to have bad input
//! reported instead of skipped.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::formula::{parse_to_counts, parse_to_counts_with, ParseMode};
//!
//! let counts = parse_to_counts("Ca(OH)₂");
//! assert_eq!(counts.get("Ca"), Some(&1));
//! assert_eq!(counts.get("O"), Some(&2));
//! assert_eq!(counts.get("H"), Some(&2));
//!
//! assert!(parse_to_counts_with("Ca(OH", ParseMode::Strict).is_err());
//! ```

pub mod normalize;
pub mod parser;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

pub use normalize::normalize;
pub use parser::parse_normalized;

/// Element symbol → atom count. Counts are always ≥ 1.
pub type FormulaCounts = BTreeMap<String, u32>;

/// How the parser treats input outside the formula grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Skip stray characters and drop unclosed groups
    #[default]
    Lenient,
    /// Fail with `MalformedFormula` / `UnbalancedParentheses`
    Strict,
}

/// Normalize and parse with the lenient grammar. Never fails.
pub fn parse_to_counts(formula: &str) -> FormulaCounts {
    // Lenient parsing has no error path.
    parse_normalized(&normalize(formula), ParseMode::Lenient).unwrap_or_default()
}

/// Element symbols in the order they first appear in `formula`.
///
/// Symbols are read the way the parser reads them, so every key of the
/// parsed counts is in the list. Unclosed-group symbols may be too.
pub fn symbols_in_order(formula: &str) -> Vec<String> {
    let normalized = normalize(formula);
    let mut chars = normalized.chars().peekable();
    let mut symbols: Vec<String> = Vec::new();
    while let Some(c) = chars.next() {
        if !c.is_ascii_uppercase() {
            continue;
        }
        let mut symbol = String::from(c);
        if let Some(&next) = chars.peek() {
            if next.is_ascii_lowercase() {
                symbol.push(next);
                chars.next();
            }
        }
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }
    symbols
}

/// Normalize and parse with an explicit mode.
pub fn parse_to_counts_with(formula: &str, mode: ParseMode) -> CalcResult<FormulaCounts> {
    parse_normalized(&normalize(formula), mode)
}
