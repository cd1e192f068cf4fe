//! Agreement check between two coefficient vectors.
//!
//! Two vectors "match to `d` decimals" when every pair differs by less than
//! `0.5·10^(−d)` (so they round to the same `d`-decimal value up to edge
//! cases) and every pair has the same sign. Entries within that tolerance
//! of zero count as sign-agreeing.
use std::fmt;

use crate::reference::errors::{ReferenceError, ReferenceResult};
use ndarray::{Array1, ArrayView1};

/// Entry-wise comparison of two coefficient vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefComparison {
    pub terms: Vec<String>,
    pub left: Array1<f64>,
    pub right: Array1<f64>,
    pub abs_diffs: Array1<f64>,
    pub signs_agree: Vec<bool>,
    pub decimals: u32,
    pub tolerance: f64,
}

impl CoefComparison {
    pub fn max_abs_diff(&self) -> f64 {
        self.abs_diffs.iter().copied().fold(0.0, f64::max)
    }

    /// Every entry within tolerance and of the same sign.
    pub fn matches(&self) -> bool {
        self.abs_diffs.iter().all(|d| *d < self.tolerance) && self.signs_agree.iter().all(|s| *s)
    }

    /// Attach term names for display, one per coefficient.
    ///
    /// # Errors
    /// - [`ReferenceError::TermCountMismatch`] if `terms.len()` differs from
    ///   the number of coefficients compared.
    pub fn with_terms<S: AsRef<str>>(mut self, terms: &[S]) -> ReferenceResult<Self> {
        if terms.len() != self.left.len() {
            return Err(ReferenceError::TermCountMismatch {
                terms: terms.len(),
                coefficients: self.left.len(),
            });
        }
        self.terms = terms.iter().map(|t| t.as_ref().to_string()).collect();
        Ok(self)
    }
}

/// Compare `left` and `right` to `decimals` decimal places.
///
/// # Errors
/// - [`ReferenceError::LengthMismatch`] if the lengths differ.
pub fn compare_coefficients(
    left: ArrayView1<'_, f64>, right: ArrayView1<'_, f64>, decimals: u32,
) -> ReferenceResult<CoefComparison> {
    if left.len() != right.len() {
        return Err(ReferenceError::LengthMismatch { left: left.len(), right: right.len() });
    }
    let tolerance = 0.5 * 10f64.powi(-(decimals as i32));
    let abs_diffs = (&left - &right).mapv(f64::abs);
    let signs_agree = left
        .iter()
        .zip(right.iter())
        .map(|(&a, &b)| a * b > 0.0 || (a.abs() < tolerance && b.abs() < tolerance))
        .collect();
    let terms = (0..left.len()).map(|j| format!("b{j}")).collect();
    Ok(CoefComparison {
        terms,
        left: left.to_owned(),
        right: right.to_owned(),
        abs_diffs,
        signs_agree,
        decimals,
        tolerance,
    })
}

impl fmt::Display for CoefComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.terms.iter().map(String::len).max().unwrap_or(0).max(4);
        writeln!(
            f,
            "{:<width$}  {:>12}  {:>12}  {:>10}  {:>5}",
            "term", "optimizer", "irls", "|diff|", "sign"
        )?;
        for j in 0..self.left.len() {
            let term = self.terms.get(j).cloned().unwrap_or_else(|| format!("b{j}"));
            writeln!(
                f,
                "{:<width$}  {:>12.6}  {:>12.6}  {:>10.2e}  {:>5}",
                term,
                self.left[j],
                self.right[j],
                self.abs_diffs[j],
                if self.signs_agree[j] { "ok" } else { "FLIP" }
            )?;
        }
        write!(
            f,
            "max |diff| = {:.2e}; agreement to {} decimals: {}",
            self.max_abs_diff(),
            self.decimals,
            if self.matches() { "yes" } else { "no" }
        )
    }
}
