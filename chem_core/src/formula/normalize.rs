//! Formula normalization.
//!
//! Turns what a student types (`CuSO₄·5H₂O`, `SO4^2-`, `NaCl(aq)`) into plain
//! ASCII the formula grammar understands. Charge and state annotations do not
//! count atoms, so they are removed before parsing; otherwise the `2` of a
//! `2-` charge would be read as an atom count.
//!
//! Unicode and ASCII ions come out differently. Charges are stripped while
//! subscripts are still Unicode, so `NO₃⁻` keeps its `3`; in `NO3-` the digit
//! touches the sign and is taken as the charge magnitude, leaving `NO`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Parenthesized state of matter: `(aq)`, `(s)`, `(l)`, `(g)`, any case.
static STATE_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\((?:aq|s|l|g)\)").expect("state annotation pattern is valid"));

/// Trailing charge: optional caret, optional magnitude, sign at end of input.
static TRAILING_CHARGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\^?[0-9]*[+\-]$").expect("charge suffix pattern is valid"));

/// Dots written between a salt and its water of crystallization.
const HYDRATE_DOTS: [char; 5] = ['·', '•', '∙', '⋅', '.'];

/// Canonicalize a raw formula or ion string.
///
/// Never fails. The result is a fixed point: normalizing it again returns
/// the same string.
///
/// ```rust
/// use chem_core::formula::normalize;
///
/// assert_eq!(normalize("H₂O"), "H2O");
/// assert_eq!(normalize("SO4^2-"), "SO4");
/// assert_eq!(normalize("Na+"), "Na");
/// assert_eq!(normalize("NaCl (aq)"), "NaCl");
/// ```
pub fn normalize(input: &str) -> String {
    let mut s: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && !HYDRATE_DOTS.contains(c))
        .collect();

    s = STATE_ANNOTATION.replace_all(&s, "").into_owned();
    s = s.chars().filter_map(map_charge_symbol).collect();

    // Stripping one suffix can expose another (`Na++`, `X(g)-`), so repeat
    // until nothing changes. Subscripts are still Unicode here, so the
    // charge pattern cannot swallow the `₄` of `NH₄⁺`.
    loop {
        let stripped = STATE_ANNOTATION.replace_all(&s, "");
        let stripped = TRAILING_CHARGE.replace(&stripped, "").into_owned();
        if stripped == s {
            break;
        }
        s = stripped;
    }

    s.chars().map(map_subscript).collect()
}

/// Map sign variants and drop superscript digits (charge magnitudes).
fn map_charge_symbol(c: char) -> Option<char> {
    match c {
        '⁰' | '¹' | '²' | '³' | '⁴'..='⁹' => None,
        '−' | '⁻' => Some('-'),
        '⁺' => Some('+'),
        _ => Some(c),
    }
}

/// Subscript digits are atom counts.
fn map_subscript(c: char) -> char {
    match c {
        '₀'..='₉' => char::from_digit(c as u32 - '₀' as u32, 10).unwrap_or(c),
        _ => c,
    }
}
