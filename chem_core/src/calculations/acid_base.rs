//! # Conjugate Acid/Base Pairs
//!
//! Finds Brønsted-Lowry conjugate pairs in a reaction by comparing every
//! reactant with every product. Two species form a pair when they contain the
//! same atoms apart from hydrogen and differ by exactly one H:
//!
//! - the product has one H fewer: the reactant is an acid, the product its
//!   conjugate base
//! - the product has one H more: the reactant is a base, the product its
//!   conjugate acid
//!
//! Ionic charges are ignored. A charge sign is removed before parsing, so
//! digits in front of it (`HSO4-`, `NH4+`) count as atoms rather than charge.
//!
//! ## Example
//!
//! ```rust
//! use chem_core::calculations::acid_base::{conjugate_pairs, ProtonRole};
//!
//! let pairs = conjugate_pairs("HCl + H₂O → H₃O⁺ + Cl⁻");
//! assert_eq!(pairs.len(), 2);
//! assert_eq!(pairs[0].role, ProtonRole::Acid);
//! assert_eq!(pairs[0].pair, "HCl / Cl⁻");
//! assert_eq!(pairs[1].pair, "H₃O⁺ / H₂O");
//! ```

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::equation::split_reaction;
use crate::formula::{parse_to_counts, FormulaCounts};

const CHARGE_SIGNS: [char; 5] = ['+', '-', '−', '⁺', '⁻'];

/// Input for conjugate pair detection.
///
/// ## JSON Example
///
/// ```json
/// { "equation": "NH3 + H2O -> NH4+ + OH-" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugatePairsInput {
    pub equation: String,
}

/// Whether the reactant gave up or took on the proton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtonRole {
    Acid,
    Base,
}

/// One conjugate pair found in a reaction.
///
/// ## JSON Example
///
/// ```json
/// { "role": "base", "reactant": "NH3", "conjugate": "NH4", "pair": "NH4 / NH3" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugatePair {
    pub role: ProtonRole,
    /// Reactant text as written
    pub reactant: String,
    /// Product text as written
    pub conjugate: String,
    /// "acid / base"
    pub pair: String,
}

/// All conjugate pairs in a reaction, in reactant-then-product order.
/// Text without an arrow has no pairs.
pub fn conjugate_pairs(equation: &str) -> Vec<ConjugatePair> {
    let Some(reaction) = split_reaction(equation) else {
        return Vec::new();
    };

    let products: Vec<(&str, FormulaCounts)> = reaction
        .products
        .iter()
        .map(|t| (t.raw_text.as_str(), proton_counts(&t.raw_text)))
        .collect();

    let mut seen = BTreeSet::new();
    let mut pairs = Vec::new();
    for term in &reaction.reactants {
        let reactant = term.raw_text.as_str();
        let left = proton_counts(reactant);
        for (product, right) in &products {
            if !same_heavy_atoms(&left, right) {
                continue;
            }
            let delta = i64::from(hydrogens(right)) - i64::from(hydrogens(&left));
            let (role, pair) = match delta {
                -1 => (ProtonRole::Acid, format!("{} / {}", reactant, product)),
                1 => (ProtonRole::Base, format!("{} / {}", product, reactant)),
                _ => continue,
            };
            if !seen.insert((role, reactant, *product)) {
                continue;
            }
            pairs.push(ConjugatePair {
                role,
                reactant: reactant.to_string(),
                conjugate: product.to_string(),
                pair,
            });
        }
    }

    debug!("{} conjugate pair(s) in {:?}", pairs.len(), equation);
    pairs
}

/// Element counts with any trailing charge sign removed first.
fn proton_counts(species: &str) -> FormulaCounts {
    parse_to_counts(species.trim().trim_end_matches(CHARGE_SIGNS))
}

fn hydrogens(counts: &FormulaCounts) -> u32 {
    counts.get("H").copied().unwrap_or(0)
}

fn same_heavy_atoms(a: &FormulaCounts, b: &FormulaCounts) -> bool {
    let heavy = |counts: &FormulaCounts| -> FormulaCounts {
        counts
            .iter()
            .filter(|(symbol, _)| symbol.as_str() != "H")
            .map(|(symbol, count)| (symbol.clone(), *count))
            .collect()
    };
    heavy(a) == heavy(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_acid_in_water() {
        let pairs = conjugate_pairs("HCl + H₂O → H₃O⁺ + Cl⁻");
        assert_eq!(
            pairs,
            vec![
                ConjugatePair {
                    role: ProtonRole::Acid,
                    reactant: "HCl".to_string(),
                    conjugate: "Cl⁻".to_string(),
                    pair: "HCl / Cl⁻".to_string(),
                },
                ConjugatePair {
                    role: ProtonRole::Base,
                    reactant: "H₂O".to_string(),
                    conjugate: "H₃O⁺".to_string(),
                    pair: "H₃O⁺ / H₂O".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_ammonia_ascii() {
        // The '+' of NH4+ is consumed as a term separator.
        let pairs = conjugate_pairs("NH3 + H2O -> NH4+ + OH-");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].role, ProtonRole::Base);
        assert_eq!(pairs[0].reactant, "NH3");
        assert_eq!(pairs[0].conjugate, "NH4");
        assert_eq!(pairs[1].role, ProtonRole::Acid);
        assert_eq!(pairs[1].pair, "H2O / OH-");
    }

    #[test]
    fn test_charge_digits_count_as_atoms() {
        let pairs = conjugate_pairs("H2SO4 + H2O = HSO4- + H3O+");
        assert!(pairs
            .iter()
            .any(|p| p.role == ProtonRole::Acid && p.pair == "H2SO4 / HSO4-"));
    }

    #[test]
    fn test_duplicates_removed() {
        let pairs = conjugate_pairs("HF + HF -> F⁻ + H₂F⁺");
        let acid_pairs: Vec<_> = pairs.iter().filter(|p| p.reactant == "HF" && p.conjugate == "F⁻").collect();
        assert_eq!(acid_pairs.len(), 1);
    }

    #[test]
    fn test_no_pairs() {
        assert!(conjugate_pairs("2H2 + O2 -> 2H2O").is_empty());
        assert!(conjugate_pairs("HCl").is_empty());
        assert!(conjugate_pairs("").is_empty());
    }
}
