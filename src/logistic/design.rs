//! Design-matrix construction shared by fitting, prediction, and the GLM
//! reference fit.
//!
//! Column 0 is the constant `1` (bias/intercept); columns `1..=p` are the
//! feature columns in the table's order. Every code path that turns a
//! [`FeatureTable`] into a design matrix goes through [`design_matrix`], so
//! the column layout used at prediction time is the one used at fit time.
use crate::data::FeatureTable;
use ndarray::{s, Array2, ArrayView2};

/// Name given to the bias column in coefficient tables.
pub const INTERCEPT_NAME: &str = "(Intercept)";

/// `n × (1 + p)` design matrix with a leading column of ones.
///
/// Missing values are copied through; filter them first.
pub fn design_matrix(features: &FeatureTable) -> Array2<f64> {
    with_bias(features.values().view())
}

fn with_bias(values: ArrayView2<'_, f64>) -> Array2<f64> {
    let (n, p) = values.dim();
    let mut x = Array2::<f64>::ones((n, p + 1));
    x.slice_mut(s![.., 1..]).assign(&values);
    x
}

/// Term names matching the columns of [`design_matrix`].
pub fn term_names(features: &FeatureTable) -> Vec<String> {
    std::iter::once(INTERCEPT_NAME.to_string()).chain(features.names().iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Bias-first layout and preserved feature order.
    // - Term names aligned with the columns.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The bias column comes first and the features follow in table order.
    //
    // Given
    // -----
    // - Table with columns `b = [2, 4]`, `a = [3, 5]`.
    //
    // Expect
    // ------
    // - `[[1, 2, 3], [1, 4, 5]]` and terms `(Intercept), b, a`.
    fn design_matrix_puts_bias_first() {
        let table = FeatureTable::from_columns(vec![("b", vec![2.0, 4.0]), ("a", vec![3.0, 5.0])])
            .unwrap();

        let x = design_matrix(&table);

        assert_eq!(x, array![[1.0, 2.0, 3.0], [1.0, 4.0, 5.0]]);
        assert_eq!(term_names(&table), vec!["(Intercept)", "b", "a"]);
    }

    #[test]
    // Purpose
    // -------
    // An empty table still yields a well-shaped (0 × k) matrix.
    //
    // Given
    // -----
    // - One column with no rows.
    //
    // Expect
    // ------
    // - Shape `(0, 2)`.
    fn design_matrix_of_empty_table_has_zero_rows() {
        let table = FeatureTable::from_columns(vec![("a", Vec::<f64>::new())]).unwrap();

        assert_eq!(design_matrix(&table).dim(), (0, 2));
    }
}
