//! Recursive-descent formula parser.
//!
//! ```text
//! formula := term*
//! term    := element count? | '(' formula ')' count?
//! element := UPPER lower?
//! count   := DIGIT+            (absent or zero reads as 1)
//! ```
//!
//! The scan is a single left-to-right pass over a stack of open groups. In
//! [`ParseMode::Lenient`] stray characters are skipped and an unclosed group
//! is dropped; [`ParseMode::Strict`] reports both.

use log::{debug, warn};

use super::{FormulaCounts, ParseMode};
use crate::errors::{CalcError, CalcResult};

/// One open group: where its `(` was, and the counts collected so far.
struct Frame {
    opened_at: usize,
    counts: FormulaCounts,
}

/// Parse an already-normalized formula into element counts.
///
/// Positions in errors are character indices into `formula`.
pub fn parse_normalized(formula: &str, mode: ParseMode) -> CalcResult<FormulaCounts> {
    let chars: Vec<char> = formula.chars().collect();
    let mut root = FormulaCounts::new();
    let mut open: Vec<Frame> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '(' => {
                open.push(Frame {
                    opened_at: i,
                    counts: FormulaCounts::new(),
                });
                i += 1;
            }
            ')' => {
                let Some(group) = open.pop() else {
                    if mode == ParseMode::Strict {
                        return Err(CalcError::UnbalancedParentheses { position: i });
                    }
                    debug!("skipping unmatched ')' at {} in {:?}", i, formula);
                    i += 1;
                    continue;
                };
                i += 1;
                let multiplier = read_count(&chars, &mut i);
                let target = match open.last_mut() {
                    Some(frame) => &mut frame.counts,
                    None => &mut root,
                };
                for (symbol, count) in group.counts {
                    add_count(target, symbol, count.saturating_mul(multiplier));
                }
            }
            c if c.is_ascii_uppercase() => {
                let mut symbol = String::from(c);
                i += 1;
                if let Some(&next) = chars.get(i) {
                    if next.is_ascii_lowercase() {
                        symbol.push(next);
                        i += 1;
                    }
                }
                let count = read_count(&chars, &mut i);
                let target = match open.last_mut() {
                    Some(frame) => &mut frame.counts,
                    None => &mut root,
                };
                add_count(target, symbol, count);
            }
            other => {
                if mode == ParseMode::Strict {
                    return Err(CalcError::MalformedFormula {
                        character: other,
                        position: i,
                    });
                }
                debug!("skipping {:?} at {} in {:?}", other, i, formula);
                i += 1;
            }
        }
    }

    if let Some(unclosed) = open.first() {
        if mode == ParseMode::Strict {
            return Err(CalcError::UnbalancedParentheses {
                position: unclosed.opened_at,
            });
        }
        warn!(
            "formula {:?} has {} unclosed group(s); their atoms are not counted",
            formula,
            open.len()
        );
    }

    Ok(root)
}

/// Consume a run of ASCII digits. Absent or zero yields 1.
fn read_count(chars: &[char], i: &mut usize) -> u32 {
    let mut value: u32 = 0;
    let mut seen = false;
    while let Some(digit) = chars.get(*i).and_then(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(digit);
        seen = true;
        *i += 1;
    }
    if seen && value > 0 {
        value
    } else {
        1
    }
}

fn add_count(counts: &mut FormulaCounts, symbol: String, count: u32) {
    let entry = counts.entry(symbol).or_insert(0);
    *entry = entry.saturating_add(count);
}
