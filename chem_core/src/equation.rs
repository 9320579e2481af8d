//! # Reaction Equations
//!
//! Splits reaction text such as `2H₂ + O₂ → 2H₂O` into coefficient/formula
//! terms. Accepted arrows are `→`, `->` and `=`. Only the first two sides
//! are used; a third side (`A -> B -> C`) is ignored.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::equation::split_reaction;
//!
//! let reaction = split_reaction("2H2 + O2 -> 2H2O").unwrap();
//! assert_eq!(reaction.reactants.len(), 2);
//! assert_eq!(reaction.reactants[0].coefficient, 2);
//! assert_eq!(reaction.products[0].raw_text, "H2O");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::formula::normalize;

static ARROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"→|->|=").expect("arrow pattern is valid"));

/// Leading integer coefficient, then the formula text.
static LEADING_COEFFICIENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([0-9]+)\s*(.*)$").expect("coefficient pattern is valid"));

/// One `coefficient formula` term of a reaction side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionTerm {
    /// Formula text as typed, coefficient removed (e.g. "H₂O(l)")
    pub raw_text: String,
    /// `raw_text` after normalization (e.g. "H2O")
    pub normalized_formula: String,
    /// Stoichiometric coefficient, at least 1
    pub coefficient: u32,
}

impl ReactionTerm {
    /// Parse a single trimmed term. Returns `None` when no formula text
    /// remains after the coefficient.
    pub fn parse(term: &str) -> Option<Self> {
        let term = term.trim();
        let (coefficient, raw) = match LEADING_COEFFICIENT.captures(term) {
            Some(caps) => {
                let digits = caps.get(1).map_or("", |m| m.as_str());
                let rest = caps.get(2).map_or("", |m| m.as_str());
                (parse_coefficient(digits), rest.trim())
            }
            None => (1, term),
        };

        let normalized_formula = normalize(raw);
        if normalized_formula.is_empty() {
            return None;
        }

        Some(ReactionTerm {
            raw_text: raw.to_string(),
            normalized_formula,
            coefficient,
        })
    }
}

/// Both sides of a reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub reactants: Vec<ReactionTerm>,
    pub products: Vec<ReactionTerm>,
}

/// Split reaction text into reactant and product terms.
///
/// Returns `None` when the text has no arrow.
pub fn split_reaction(equation: &str) -> Option<Reaction> {
    let mut sides = ARROW.split(equation);
    let left = sides.next()?;
    let right = sides.next()?;

    Some(Reaction {
        reactants: split_side(left),
        products: split_side(right),
    })
}

/// Raw reactant texts, in order, for building one mass input per reactant.
pub fn reactant_labels(equation: &str) -> Vec<String> {
    split_reaction(equation)
        .map(|r| r.reactants.into_iter().map(|t| t.raw_text).collect())
        .unwrap_or_default()
}

fn split_side(side: &str) -> Vec<ReactionTerm> {
    side.split('+')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(ReactionTerm::parse)
        .collect()
}

/// Coefficients below 1 read as 1; overlong digit runs saturate.
fn parse_coefficient(digits: &str) -> u32 {
    match digits.parse::<u32>() {
        Ok(0) => 1,
        Ok(n) => n,
        Err(_) => u32::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows() {
        for equation in ["H2 + O2 → H2O", "H2 + O2 -> H2O", "H2 + O2 = H2O"] {
            let reaction = split_reaction(equation).unwrap();
            assert_eq!(reaction.reactants.len(), 2, "{}", equation);
            assert_eq!(reaction.products.len(), 1, "{}", equation);
        }
    }

    #[test]
    fn test_no_arrow() {
        assert!(split_reaction("not an equation").is_none());
        assert!(split_reaction("").is_none());
    }

    #[test]
    fn test_coefficients() {
        let reaction = split_reaction("2H2 + O2 -> 2 H2O").unwrap();
        assert_eq!(reaction.reactants[0].coefficient, 2);
        assert_eq!(reaction.reactants[0].raw_text, "H2");
        assert_eq!(reaction.reactants[1].coefficient, 1);
        assert_eq!(reaction.products[0].coefficient, 2);
        assert_eq!(reaction.products[0].raw_text, "H2O");
    }

    #[test]
    fn test_zero_coefficient_reads_as_one() {
        let reaction = split_reaction("0H2 -> H2").unwrap();
        assert_eq!(reaction.reactants[0].coefficient, 1);
    }

    #[test]
    fn test_unicode_terms_keep_raw_text() {
        let reaction = split_reaction("CH₄ + 2O₂ → CO₂ + 2H₂O").unwrap();
        assert_eq!(reaction.reactants[0].raw_text, "CH₄");
        assert_eq!(reaction.reactants[0].normalized_formula, "CH4");
        assert_eq!(reaction.products[1].normalized_formula, "H2O");
    }

    #[test]
    fn test_empty_terms_dropped() {
        let reaction = split_reaction("H2 + + O2 -> ").unwrap();
        assert_eq!(reaction.reactants.len(), 2);
        assert!(reaction.products.is_empty());

        // A bare coefficient carries no formula.
        let reaction = split_reaction("2 + O2 -> O2").unwrap();
        assert_eq!(reaction.reactants.len(), 1);
    }

    #[test]
    fn test_reactant_labels() {
        assert_eq!(reactant_labels("2Na + Cl2 -> 2NaCl"), vec!["Na", "Cl2"]);
        assert!(reactant_labels("NaCl").is_empty());
    }
}
