//! Fitting a logistic regression by handing the mean NLL to the optimizer.
//!
//! Pipeline
//! --------
//! 1. Drop rows with a missing feature or label (one synchronized pass).
//! 2. Reject surviving labels outside `{0, 1}`.
//! 3. Build the bias-first design matrix.
//! 4. Start from `θ₀ = 0` and call
//!    [`minimize`](crate::optimization::optimizer::minimize) with the
//!    analytic gradient.
//! 5. Return the optimizer's parameter vector as-is. Non-convergence and
//!    non-finite coefficients are logged and flagged, never raised.
use std::fmt;

use crate::{
    data::{drop_missing, FeatureTable, RowFilter},
    inference::calc_standard_errors,
    logistic::{
        coefficients::Coefficients,
        cost::gradient,
        design::design_matrix,
        errors::{LogitError, LogitResult},
        objective::{DesignData, LogisticObjective},
        predict::{predict, Prediction},
    },
    optimization::optimizer::{minimize, OptimOutcome, OptimizerOptions},
};
use ndarray::Array1;
use tracing::{info, warn};

/// A fitted logistic regression.
#[derive(Debug, Clone)]
pub struct LogisticFit {
    coefficients: Coefficients,
    outcome: OptimOutcome,
    rows: RowFilter,
    data: DesignData,
}

impl LogisticFit {
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Raw optimizer report (termination status, iterations, evaluations).
    pub fn outcome(&self) -> &OptimOutcome {
        &self.outcome
    }

    /// Whether the optimizer stopped on its own convergence test.
    pub fn converged(&self) -> bool {
        self.outcome.converged
    }

    /// Mean negative log-likelihood at the returned coefficients.
    pub fn cost(&self) -> f64 {
        self.outcome.value
    }

    /// Rows used in the fit.
    pub fn n_obs(&self) -> usize {
        self.data.n_obs()
    }

    /// Original indices of the rows used in the fit.
    pub fn kept_rows(&self) -> &[usize] {
        &self.rows.kept_rows
    }

    /// Rows removed for missing values.
    pub fn dropped_rows(&self) -> usize {
        self.rows.dropped_rows
    }

    /// Classical standard errors from the observed information at `θ̂`.
    ///
    /// # Errors
    /// - `LogitError::Optimization` if the finite-difference Hessian is not
    ///   finite (e.g. after a fit that diverged).
    pub fn standard_errors(&self) -> LogitResult<Array1<f64>> {
        let grad = |theta: &Array1<f64>| gradient(theta.view(), self.data.x.view(), self.data.y.view());
        Ok(calc_standard_errors(&grad, self.coefficients.values(), self.n_obs())?)
    }

    /// Apply the fitted coefficients to new data.
    pub fn predict(&self, features: &FeatureTable) -> LogitResult<Prediction> {
        predict(&self.coefficients, features)
    }
}

impl fmt::Display for LogisticFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coefficients)?;
        writeln!(
            f,
            "\nobservations: {} (dropped {} with missing values)",
            self.n_obs(),
            self.dropped_rows()
        )?;
        writeln!(f, "mean negative log-likelihood: {:.6}", self.cost())?;
        write!(
            f,
            "optimizer: {} after {} iterations{}",
            self.outcome.status,
            self.outcome.iterations,
            if self.converged() { "" } else { " (not converged)" }
        )
    }
}

/// Fit `P(y = 1 | x) = σ(β₀ + xᵀβ)` by minimizing the mean NLL.
///
/// `labels` must have one entry per row of `features`; `NaN` marks a
/// missing label. Feature columns enter the model in table order.
///
/// # Errors
/// - `LogitError::Data` if labels and features have different lengths.
/// - [`LogitError::NoCompleteRows`] if every row has a missing value.
/// - [`LogitError::InvalidLabel`] for a surviving label other than 0 or 1.
/// - `LogitError::Optimization` for invalid options or a solver failure.
///
/// Hitting `max_iter` is *not* an error; see [`LogisticFit::converged`].
pub fn fit(
    features: &FeatureTable, labels: &Array1<f64>, opts: &OptimizerOptions,
) -> LogitResult<LogisticFit> {
    let (x_table, y, rows) = drop_missing(features, labels)?;
    if rows.kept_rows.is_empty() {
        return Err(LogitError::NoCompleteRows { total: features.nrows() });
    }
    if let Some((pos, &value)) = y.iter().enumerate().find(|(_, &v)| v != 0.0 && v != 1.0) {
        return Err(LogitError::InvalidLabel { row: rows.kept_rows[pos], value });
    }

    let data = DesignData::new(design_matrix(&x_table), y);
    let theta0 = Array1::<f64>::zeros(data.x.ncols());
    let outcome = minimize(&LogisticObjective, theta0, &data, opts)?;
    let coefficients = Coefficients::new(x_table.names(), outcome.theta_hat.clone())?;

    if !outcome.converged {
        warn!(
            status = %outcome.status,
            iterations = outcome.iterations,
            "logistic fit returned unconverged coefficients"
        );
    }
    info!(
        n_obs = data.n_obs(),
        dropped_rows = rows.dropped_rows,
        cost = outcome.value,
        iterations = outcome.iterations,
        converged = outcome.converged,
        "logistic regression fitted"
    );
    Ok(LogisticFit { coefficients, outcome, rows, data })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::optimizer::{LineSearcher, SolverKind, Tolerances};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Growth of the coefficients on separable data with the iteration
    //   budget.
    // - Row bookkeeping under missing values.
    // - Label validation and the no-complete-rows case.
    // - Standard errors on a well-conditioned problem.
    // - Saturated evaluations: counted on the outcome, never an `Err`,
    //   including line-search aborts under steepest descent.
    //
    // They intentionally DO NOT cover:
    // - Agreement with the IRLS reference (see tests/).
    // -------------------------------------------------------------------------

    fn lbfgs(max_iter: usize) -> OptimizerOptions {
        let tols = Tolerances::new(Some(1e-6), None, Some(max_iter)).unwrap();
        OptimizerOptions::new(tols, SolverKind::Lbfgs, LineSearcher::MoreThuente, false, None)
            .unwrap()
    }

    fn steepest(line_searcher: LineSearcher, max_iter: usize) -> OptimizerOptions {
        let tols = Tolerances::new(None, None, Some(max_iter)).unwrap();
        OptimizerOptions::new(tols, SolverKind::SteepestDescent, line_searcher, false, None)
            .unwrap()
    }

    /// Overlapping one-feature data: label 1 more likely for larger x.
    fn overlapping() -> (FeatureTable, Array1<f64>) {
        let x = vec![-3.0, -2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0, 3.0, -0.2];
        let y = array![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        (FeatureTable::from_columns(vec![("x", x)]).unwrap(), y)
    }

    #[test]
    // Purpose
    // -------
    // On perfectly separable data the likelihood has no finite maximizer, so
    // more iterations push the slope further out.
    //
    // Given
    // -----
    // - Symmetric separable data `x ∈ {−2, −1, 1, 2}`, `y = 1{x > 0}`.
    // - Iteration budgets 1, 2, and 4.
    //
    // Expect
    // ------
    // - Slope strictly increasing with the budget and positive.
    // - Intercept stays at 0 by symmetry.
    // - None of the runs report convergence.
    fn separable_slope_grows_with_iteration_budget() {
        // Arrange
        let features = FeatureTable::from_columns(vec![("x", vec![-2.0, -1.0, 1.0, 2.0])]).unwrap();
        let labels = array![0.0, 0.0, 1.0, 1.0];

        // Act
        let slopes: Vec<(f64, f64, bool)> = [1, 2, 4]
            .into_iter()
            .map(|budget| {
                let fit = fit(&features, &labels, &lbfgs(budget)).unwrap();
                let c = fit.coefficients();
                (c.intercept(), c.values()[1], fit.converged())
            })
            .collect();

        // Assert
        for w in slopes.windows(2) {
            assert!(w[1].1 > w[0].1, "slope did not grow: {slopes:?}");
        }
        for (intercept, slope, converged) in &slopes {
            assert!(intercept.abs() < 1e-8);
            assert!(*slope > 0.0);
            assert!(!converged);
        }
    }

    #[test]
    // Purpose
    // -------
    // Rows with any missing value are excluded and reported, and the rest
    // are used.
    //
    // Given
    // -----
    // - The overlapping data plus two extra rows: one missing `x`, one
    //   missing label.
    //
    // Expect
    // ------
    // - `n_obs = 12`, `dropped_rows = 2`, kept rows are `0..12`.
    // - Positive slope, converged.
    fn fit_drops_incomplete_rows_and_reports_them() {
        // Arrange
        let (features, labels) = overlapping();
        let mut x = features.column("x").unwrap().to_vec();
        x.extend([f64::NAN, 0.3]);
        let mut y = labels.to_vec();
        y.extend([1.0, f64::NAN]);
        let features = FeatureTable::from_columns(vec![("x", x)]).unwrap();

        // Act
        let fit = fit(&features, &Array1::from(y), &lbfgs(200)).unwrap();

        // Assert
        assert_eq!(fit.n_obs(), 12);
        assert_eq!(fit.dropped_rows(), 2);
        assert_eq!(fit.kept_rows(), (0..12).collect::<Vec<_>>().as_slice());
        assert!(fit.converged());
        assert!(fit.coefficients().values()[1] > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Bad labels and empty inputs are reported with useful context.
    //
    // Given
    // -----
    // - A label of 2 at original row 2 (after a dropped row 1).
    // - A table where every row has a missing value.
    //
    // Expect
    // ------
    // - `InvalidLabel { row: 2, value: 2.0 }`.
    // - `NoCompleteRows { total: 2 }`.
    fn fit_rejects_bad_labels_and_empty_inputs() {
        let features = FeatureTable::from_columns(vec![("x", vec![0.0, 1.0, 2.0])]).unwrap();
        let err = fit(&features, &array![0.0, f64::NAN, 2.0], &lbfgs(10)).unwrap_err();
        assert!(matches!(err, LogitError::InvalidLabel { row: 2, value } if value == 2.0));

        let features = FeatureTable::from_columns(vec![("x", vec![f64::NAN, 1.0])]).unwrap();
        let err = fit(&features, &array![1.0, f64::NAN], &lbfgs(10)).unwrap_err();
        assert!(matches!(err, LogitError::NoCompleteRows { total: 2 }));
    }

    #[test]
    // Purpose
    // -------
    // Standard errors are finite and positive on a well-posed fit, and the
    // fitted cost is below the θ = 0 cost `ln 2`.
    //
    // Given
    // -----
    // - Overlapping data.
    //
    // Expect
    // ------
    // - Two positive finite SEs.
    // - `cost() < ln 2`.
    fn standard_errors_are_positive_on_overlapping_data() {
        let (features, labels) = overlapping();

        let fit = fit(&features, &labels, &lbfgs(200)).unwrap();
        let se = fit.standard_errors().unwrap();

        assert_eq!(se.len(), 2);
        assert!(se.iter().all(|s| s.is_finite() && *s > 0.0));
        assert!(fit.cost() < std::f64::consts::LN_2);
    }

    #[test]
    // Purpose
    // -------
    // Sigmoid saturation during a fit shows up as counted non-finite
    // evaluations on the outcome while `fit` still succeeds.
    //
    // Given
    // -----
    // - Separable data on a huge scale, `x ∈ {−1000, 1000}`.
    // - L-BFGS with More–Thuente; the first trial step saturates every row.
    //
    // Expect
    // ------
    // - `Ok`, not converged, `non_finite_evals > 0`.
    fn saturated_evaluations_are_counted_on_the_outcome() {
        // Arrange
        let features =
            FeatureTable::from_columns(vec![("x", vec![-1000.0, -1000.0, 1000.0, 1000.0])])
                .unwrap();
        let labels = array![0.0, 0.0, 1.0, 1.0];

        // Act
        let fit = fit(&features, &labels, &lbfgs(50)).expect("saturation is not an error");

        // Assert
        assert!(!fit.converged());
        assert!(fit.outcome().non_finite_evals > 0);
    }

    #[test]
    // Purpose
    // -------
    // Steepest descent on unscaled, non-separable data hits an infinite
    // cost in its line search; the fit reports a non-converged result at
    // the best finite point instead of failing.
    //
    // Given
    // -----
    // - Eight shots with distances in inches (24 to 420) and mixed makes.
    // - Steepest descent with either line search, `max_iter = 20`.
    //
    // Expect
    // ------
    // - `Ok` for both line searches, not converged, finite coefficients,
    //   cost no worse than the zero-start `ln 2`, at most 20 iterations.
    // - With More–Thuente, `non_finite_evals > 0` (the unit first step
    //   drives a made shot to `h = 0`).
    fn steepest_descent_line_search_abort_is_reported_not_raised() {
        // Arrange
        let inches = vec![24.0, 60.0, 108.0, 168.0, 240.0, 312.0, 372.0, 420.0];
        let features = FeatureTable::from_columns(vec![("SHOT_DIST", inches)]).unwrap();
        let labels = array![1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0];

        for ls in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            // Act
            let fit = fit(&features, &labels, &steepest(ls, 20))
                .unwrap_or_else(|e| panic!("{ls:?}: {e}"));

            // Assert
            assert!(!fit.converged(), "{ls:?}");
            assert!(fit.coefficients().values().iter().all(|v| v.is_finite()), "{ls:?}");
            assert!(fit.cost() <= std::f64::consts::LN_2, "{ls:?}");
            assert!(fit.outcome().iterations <= 20, "{ls:?}");
            if ls == LineSearcher::MoreThuente {
                assert!(fit.outcome().non_finite_evals > 0);
            }
        }
    }
}
