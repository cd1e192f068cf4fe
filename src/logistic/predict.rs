//! Applying fitted coefficients to new feature rows.
use crate::{
    data::{drop_missing_features, FeatureTable},
    logistic::{
        coefficients::Coefficients, design::design_matrix, errors::LogitResult,
        sigmoid::sigmoid_array,
    },
};
use ndarray::Array1;

/// Predicted probabilities for the complete rows of a feature table.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// `σ(Xθ)` for each kept row, in the order of `kept_rows`.
    pub probabilities: Array1<f64>,
    /// Original indices of the rows that were scored.
    pub kept_rows: Vec<usize>,
    /// Rows skipped for missing values.
    pub dropped_rows: usize,
}

impl Prediction {
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// `(original row, probability)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.kept_rows.iter().copied().zip(self.probabilities.iter().copied())
    }
}

/// Score `features` with `coefs`.
///
/// Columns are picked from `features` by the coefficient names, so extra
/// columns are ignored and column order in the input does not matter. Rows
/// with a missing value in any used column are skipped (independently of
/// whatever was dropped at fit time) and reported on the result.
///
/// # Errors
/// - `LogitError::Data(DataError::UnknownColumn)` if a fitted feature is
///   absent from `features`.
pub fn predict(coefs: &Coefficients, features: &FeatureTable) -> LogitResult<Prediction> {
    let aligned = features.select(coefs.feature_names())?;
    let (complete, filter) = drop_missing_features(&aligned);
    let x = design_matrix(&complete);
    let probabilities = sigmoid_array(&x.dot(coefs.values()));
    Ok(Prediction { probabilities, kept_rows: filter.kept_rows, dropped_rows: filter.dropped_rows })
}
