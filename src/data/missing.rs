//! Missing-value filtering (complete-case analysis).
//!
//! A row is kept only if every used feature cell *and* (when present) its
//! label are non-missing. Features and labels are filtered together in one
//! pass, so row `i` of the filtered features always pairs with entry `i` of
//! the filtered labels.
//!
//! Dropping rows is not an error. The count is logged at warn level and
//! returned alongside the original indices of the surviving rows.
use crate::data::{
    errors::{DataError, DataResult},
    table::FeatureTable,
};
use ndarray::Array1;
use tracing::warn;

/// Which rows survived a complete-case filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    /// Original (0-based) indices of the kept rows, ascending.
    pub kept_rows: Vec<usize>,
    /// Number of rows removed for having at least one missing cell.
    pub dropped_rows: usize,
}

/// Complete-case filter over features and labels together.
///
/// # Errors
/// - [`DataError::LabelLengthMismatch`] if `labels.len() != features.nrows()`.
pub fn drop_missing(
    features: &FeatureTable, labels: &Array1<f64>,
) -> DataResult<(FeatureTable, Array1<f64>, RowFilter)> {
    if labels.len() != features.nrows() {
        return Err(DataError::LabelLengthMismatch {
            rows: features.nrows(),
            labels: labels.len(),
        });
    }
    let filter = complete_rows(features, Some(labels));
    let x = features.take_rows(&filter.kept_rows);
    let y = filter.kept_rows.iter().map(|&i| labels[i]).collect::<Array1<f64>>();
    Ok((x, y, filter))
}

/// Complete-case filter over features only (prediction input).
pub fn drop_missing_features(features: &FeatureTable) -> (FeatureTable, RowFilter) {
    let filter = complete_rows(features, None);
    (features.take_rows(&filter.kept_rows), filter)
}

fn complete_rows(features: &FeatureTable, labels: Option<&Array1<f64>>) -> RowFilter {
    let kept_rows: Vec<usize> = features
        .values()
        .outer_iter()
        .enumerate()
        .filter(|(i, row)| {
            row.iter().all(|v| !v.is_nan()) && labels.map_or(true, |y| !y[*i].is_nan())
        })
        .map(|(i, _)| i)
        .collect();
    let dropped_rows = features.nrows() - kept_rows.len();
    if dropped_rows > 0 {
        warn!(
            dropped_rows,
            kept_rows = kept_rows.len(),
            total_rows = features.nrows(),
            "dropped rows with missing values"
        );
    }
    RowFilter { kept_rows, dropped_rows }
}
