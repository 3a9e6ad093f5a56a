// src/text.rs
//! Text form of multivectors.
//!
//! A multivector prints as a sum of terms, the scalar bare and every other
//! blade as `(coefficient^name)`:
//!
//! ```text
//! 1.5 + (2^e1) - (0.25^e23)
//! ```
//!
//! [`Layout::parse_multivector`] reads the same grammar back.

use std::fmt;
use std::sync::Arc;

use crate::error::{GaError, Result};
use crate::layout::Layout;
use crate::multivector::MultiVector;
use crate::types::Scalar;

fn round_to(v: Scalar, decimals: usize) -> Scalar {
    let factor = (10.0 as Scalar).powi(decimals as i32);
    (v * factor).round() / factor
}

impl fmt::Display for MultiVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.layout();
        let config = layout.config();
        let mut first = true;

        for (i, &v) in self.value().iter().enumerate() {
            let magnitude = round_to(v.abs(), config.print_precision);
            if v.abs() < config.eps || magnitude == 0.0 {
                continue;
            }
            let sep = match (first, v > 0.0) {
                (true, true) => "",
                (true, false) => "-",
                (false, true) => " + ",
                (false, false) => " - ",
            };
            if layout.grades()[i] == 0 {
                write!(f, "{sep}{magnitude}")?;
            } else {
                write!(f, "{sep}({magnitude}^{})", layout.names()[i])?;
            }
            first = false;
        }

        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

/// Split `text` into signed terms. Whitespace and parentheses are dropped;
/// a sign starts a new term unless it opens the term or follows the `e` of
/// an exponent.
fn split_terms(text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();

    for c in text.chars().filter(|c| !c.is_whitespace() && *c != '(' && *c != ')') {
        if c == '+' || c == '-' {
            let in_number = !current.contains('^');
            let opens_term = current.is_empty() || current == "+" || current == "-";
            let exponent = in_number && (current.ends_with('e') || current.ends_with('E'));
            if !(opens_term || exponent) {
                terms.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

fn parse_coefficient(text: &str) -> Result<Scalar> {
    text.parse::<Scalar>()
        .map_err(|_| GaError::Parse(format!("invalid coefficient {text:?}")))
}

impl Layout {
    /// Parse the text form printed by `Display`.
    ///
    /// Terms naming the same blade accumulate. A term without `^` is the
    /// scalar part.
    ///
    /// ```
    /// use clifford_engine::layout::cl;
    ///
    /// let (layout, blades) = cl(3, 0).unwrap();
    /// let m = layout.parse_multivector("1 + (2^e1) - (3^e23)").unwrap();
    /// assert_eq!(m.coefficient_at("e23"), Ok(-3.0));
    /// assert!(m == 1.0 + &(&blades["e1"] * 2.0) - &(&blades["e23"] * 3.0));
    /// ```
    pub fn parse_multivector(self: &Arc<Self>, text: &str) -> Result<MultiVector> {
        let terms = split_terms(text);
        if terms.is_empty() {
            return Err(GaError::Parse("empty input".to_string()));
        }

        let mut value = vec![0.0; self.ga_dims()];
        for term in &terms {
            match term.split_once('^') {
                Some((coefficient, name)) => {
                    let index = self.name_index(name)?;
                    value[index] += parse_coefficient(coefficient)?;
                }
                None => value[self.scalar_index()] += parse_coefficient(term)?,
            }
        }
        MultiVector::from_coefficients(self, value)
    }
}
