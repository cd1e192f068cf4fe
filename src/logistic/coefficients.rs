//! Named coefficient vectors.
use std::fmt;

use crate::logistic::{
    design::INTERCEPT_NAME,
    errors::{LogitError, LogitResult},
};
use ndarray::Array1;

/// Fitted parameters `θ = (β₀, β₁, …, β_p)`, intercept first, each paired
/// with its term name.
///
/// Immutable once built; the only way to get one is from a fit or from
/// explicit values via [`Coefficients::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficients {
    terms: Vec<String>,
    values: Array1<f64>,
}

impl Coefficients {
    /// Pair `values` with `"(Intercept)"` followed by `feature_names`.
    ///
    /// # Errors
    /// - [`LogitError::CoefficientLengthMismatch`] unless
    ///   `values.len() == 1 + feature_names.len()`.
    pub fn new<S: AsRef<str>>(feature_names: &[S], values: Array1<f64>) -> LogitResult<Self> {
        let expected = feature_names.len() + 1;
        if values.len() != expected {
            return Err(LogitError::CoefficientLengthMismatch { expected, actual: values.len() });
        }
        let terms = std::iter::once(INTERCEPT_NAME.to_string())
            .chain(feature_names.iter().map(|s| s.as_ref().to_string()))
            .collect();
        Ok(Self { terms, values })
    }

    /// All term names, `"(Intercept)"` first.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Feature names only (the terms after the intercept).
    pub fn feature_names(&self) -> &[String] {
        &self.terms[1..]
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn intercept(&self) -> f64 {
        self.values[0]
    }

    /// Coefficient for a term, if present.
    pub fn get(&self, term: &str) -> Option<f64> {
        self.terms.iter().position(|t| t == term).map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.terms.iter().map(String::as_str).zip(self.values.iter().copied())
    }
}

impl fmt::Display for Coefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.terms.iter().map(String::len).max().unwrap_or(0).max(4);
        writeln!(f, "{:<width$}  {:>12}", "term", "estimate")?;
        for (term, value) in self.iter() {
            writeln!(f, "{term:<width$}  {value:>12.6}")?;
        }
        Ok(())
    }
}
