//! reference::glm: binomial/logit GLM fitted by IRLS.
//!
//! Purpose
//! -------
//! An independent fit of the same model the optimizer estimates, computed
//! the classical way (Fisher scoring as iteratively reweighted least
//! squares). Used to check the optimizer-based coefficients.
//!
//! Algorithm
//! ---------
//! - Start at `μ = (y + 0.5) / 2`, `η = logit(μ)`.
//! - Repeat: `w = μ(1 − μ)`, working response `z = η + (y − μ)/w`, solve
//!   `(XᵀWX)β = XᵀWz` by Cholesky, update `η = Xβ`, `μ = σ(η)`.
//! - Stop when `|dev − dev_old| / (|dev| + 0.1) < ε` or after `max_iter`
//!   iterations. Defaults `ε = 1e-8`, `max_iter = 25`.
//!
//! Standard errors come from `(XᵀWX)⁻¹` at the final `μ`; p-values are
//! two-sided normal (Wald) p-values.
//!
//! Like the optimizer path, running out of iterations and fitted
//! probabilities of exactly 0 or 1 are reported through `tracing`
//! warnings, not errors.
use std::fmt;

use crate::{
    data::{drop_missing, FeatureTable},
    logistic::{design::term_names, design_matrix, sigmoid_array, INTERCEPT_NAME},
    reference::errors::{ReferenceError, ReferenceResult},
};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};
use statrs::function::erf::erfc;
use tracing::{debug, warn};

/// Fitted probabilities closer than this to 0 or 1 trigger a warning.
const MU_BOUNDARY_EPS: f64 = 10.0 * f64::EPSILON;

/// IRLS control settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlmOptions {
    /// Relative deviance-change threshold.
    pub epsilon: f64,
    /// Maximum IRLS iterations.
    pub max_iter: usize,
}

impl GlmOptions {
    /// # Errors
    /// - [`ReferenceError::InvalidEpsilon`] unless `epsilon` is finite and > 0.
    /// - [`ReferenceError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(epsilon: f64, max_iter: usize) -> ReferenceResult<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ReferenceError::InvalidEpsilon { value: epsilon });
        }
        if max_iter == 0 {
            return Err(ReferenceError::InvalidMaxIter { value: max_iter });
        }
        Ok(Self { epsilon, max_iter })
    }
}

impl Default for GlmOptions {
    fn default() -> Self {
        Self { epsilon: 1e-8, max_iter: 25 }
    }
}

/// Result of an IRLS logistic fit.
#[derive(Debug, Clone, PartialEq)]
pub struct GlmFit {
    pub terms: Vec<String>,
    pub coefficients: Array1<f64>,
    pub std_errors: Array1<f64>,
    pub z_values: Array1<f64>,
    pub p_values: Array1<f64>,
    pub deviance: f64,
    pub null_deviance: f64,
    pub aic: f64,
    pub n_obs: usize,
    pub iterations: usize,
    pub converged: bool,
}

/// Fit a binomial GLM with logit link by IRLS on a ready-made design matrix.
///
/// Terms are named `(Intercept)` for column 0 and `x1`, `x2`, … after it;
/// [`fit_glm`] supplies the real feature names.
///
/// # Errors
/// - [`ReferenceError::EmptyData`], [`ReferenceError::DimensionMismatch`],
///   [`ReferenceError::InvalidResponse`] for bad input.
/// - [`ReferenceError::SingularWeightedGram`] when `XᵀWX` cannot be
///   factored.
pub fn fit_logit_glm(
    design: &Array2<f64>, y: &Array1<f64>, opts: &GlmOptions,
) -> ReferenceResult<GlmFit> {
    let (n, k) = design.dim();
    if n == 0 {
        return Err(ReferenceError::EmptyData);
    }
    if y.len() != n {
        return Err(ReferenceError::DimensionMismatch { rows: n, labels: y.len() });
    }
    if let Some((index, &value)) = y.iter().enumerate().find(|(_, &v)| v != 0.0 && v != 1.0) {
        return Err(ReferenceError::InvalidResponse { index, value });
    }

    let x = to_dmatrix(design);
    let yv = DVector::from_iterator(n, y.iter().copied());
    let mut mu = yv.map(|v| (v + 0.5) / 2.0);
    let mut eta = mu.map(|m| (m / (1.0 - m)).ln());
    let mut dev_old = deviance(&yv, &mu);
    let mut beta = DVector::<f64>::zeros(k);
    let mut converged = false;
    let mut iterations = 0;

    for iter in 1..=opts.max_iter {
        iterations = iter;
        let w = mu.map(|m| m * (1.0 - m));
        let z = DVector::from_fn(n, |i, _| eta[i] + (yv[i] - mu[i]) / w[i]);
        let (gram, rhs) = weighted_normal_equations(&x, &w, &z);
        let chol = gram.cholesky().ok_or(ReferenceError::SingularWeightedGram { iteration: iter })?;
        beta = chol.solve(&rhs);
        eta = &x * &beta;
        mu = eta.map(|e| 1.0 / (1.0 + (-e).exp()));
        let dev = deviance(&yv, &mu);
        debug!(iteration = iter, deviance = dev, "IRLS step");
        if (dev - dev_old).abs() / (dev.abs() + 0.1) < opts.epsilon {
            converged = true;
            dev_old = dev;
            break;
        }
        dev_old = dev;
    }
    if !converged {
        warn!(iterations, "IRLS did not converge");
    }
    if mu.iter().any(|&m| m < MU_BOUNDARY_EPS || m > 1.0 - MU_BOUNDARY_EPS) {
        warn!("fitted probabilities numerically 0 or 1 occurred");
    }

    let w = mu.map(|m| m * (1.0 - m));
    let (gram, _) = weighted_normal_equations(&x, &w, &DVector::zeros(n));
    let cov = gram
        .cholesky()
        .ok_or(ReferenceError::SingularWeightedGram { iteration: iterations })?
        .inverse();

    let coefficients = Array1::from_iter(beta.iter().copied());
    let std_errors = Array1::from_shape_fn(k, |j| cov[(j, j)].sqrt());
    let z_values = &coefficients / &std_errors;
    let p_values = z_values.mapv(|z: f64| erfc(z.abs() / std::f64::consts::SQRT_2));

    let y_bar = yv.mean();
    let null_deviance = deviance(&yv, &DVector::from_element(n, y_bar));
    let deviance = dev_old;
    let terms = std::iter::once(INTERCEPT_NAME.to_string())
        .chain((1..k).map(|j| format!("x{j}")))
        .collect();

    Ok(GlmFit {
        terms,
        coefficients,
        std_errors,
        z_values,
        p_values,
        deviance,
        null_deviance,
        aic: deviance + 2.0 * k as f64,
        n_obs: n,
        iterations,
        converged,
    })
}

/// IRLS fit straight from a feature table and labels.
///
/// Applies the same complete-case filter and the same design-matrix routine
/// as [`logistic::fit`](crate::logistic::fit), so the two fits see identical
/// inputs.
///
/// # Errors
/// - `ReferenceError::Data` if labels and features have different lengths.
/// - Anything [`fit_logit_glm`] returns.
pub fn fit_glm(
    features: &FeatureTable, labels: &Array1<f64>, opts: &GlmOptions,
) -> ReferenceResult<GlmFit> {
    let (x_table, y, _) = drop_missing(features, labels)?;
    let mut glm = fit_logit_glm(&design_matrix(&x_table), &y, opts)?;
    glm.terms = term_names(&x_table);
    Ok(glm)
}

impl GlmFit {
    /// Fitted probabilities `σ(Xβ)` for a design matrix with the same layout.
    pub fn fitted(&self, design: &Array2<f64>) -> Array1<f64> {
        sigmoid_array(&design.dot(&self.coefficients))
    }
}

impl fmt::Display for GlmFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.terms.iter().map(String::len).max().unwrap_or(0).max(4);
        writeln!(
            f,
            "{:<width$}  {:>12}  {:>12}  {:>9}  {:>10}",
            "term", "estimate", "std.error", "z value", "Pr(>|z|)"
        )?;
        for j in 0..self.coefficients.len() {
            writeln!(
                f,
                "{:<width$}  {:>12.6}  {:>12.6}  {:>9.3}  {:>10.3e}",
                self.terms[j],
                self.coefficients[j],
                self.std_errors[j],
                self.z_values[j],
                self.p_values[j]
            )?;
        }
        writeln!(
            f,
            "\nnull deviance: {:.4} on {} df",
            self.null_deviance,
            self.n_obs.saturating_sub(1)
        )?;
        writeln!(
            f,
            "residual deviance: {:.4} on {} df",
            self.deviance,
            self.n_obs.saturating_sub(self.coefficients.len())
        )?;
        write!(f, "AIC: {:.4}; IRLS iterations: {}", self.aic, self.iterations)
    }
}

// ---- Helper methods ----

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    let (n, k) = a.dim();
    DMatrix::from_fn(n, k, |i, j| a[[i, j]])
}

/// `(XᵀWX, XᵀWz)` for diagonal weights `w`.
fn weighted_normal_equations(
    x: &DMatrix<f64>, w: &DVector<f64>, z: &DVector<f64>,
) -> (DMatrix<f64>, DVector<f64>) {
    let mut xw = x.clone();
    for (i, mut row) in xw.row_iter_mut().enumerate() {
        row *= w[i];
    }
    let gram = xw.transpose() * x;
    let rhs = xw.transpose() * z;
    (gram, rhs)
}

/// Binomial deviance for 0/1 responses, `−2 Σ ln P(y_i | μ_i)`.
fn deviance(y: &DVector<f64>, mu: &DVector<f64>) -> f64 {
    -2.0 * y
        .iter()
        .zip(mu.iter())
        .map(|(&yi, &mi)| if yi == 1.0 { mi.ln() } else { (1.0 - mi).ln() })
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Option validation.
    // - A closed-form case (one binary predictor) for coefficients, SEs,
    //   and deviances.
    // - Input validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `GlmOptions::new` rejects unusable settings.
    //
    // Given
    // -----
    // - `epsilon = 0`, `epsilon = NaN`, `max_iter = 0`.
    //
    // Expect
    // ------
    // - `InvalidEpsilon`, `InvalidEpsilon`, `InvalidMaxIter`.
    fn glm_options_validate() {
        assert!(matches!(GlmOptions::new(0.0, 25), Err(ReferenceError::InvalidEpsilon { .. })));
        assert!(matches!(
            GlmOptions::new(f64::NAN, 25),
            Err(ReferenceError::InvalidEpsilon { .. })
        ));
        assert!(matches!(GlmOptions::new(1e-8, 0), Err(ReferenceError::InvalidMaxIter { .. })));
        assert_eq!(GlmOptions::default(), GlmOptions::new(1e-8, 25).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // With one binary predictor the MLE is the pair of group log-odds, which
    // has a closed form.
    //
    // Given
    // -----
    // - Group `g = 0`: 2 successes out of 8. Group `g = 1`: 6 out of 8.
    //
    // Expect
    // ------
    // - `β₀ = ln(2/6)`, `β₁ = ln(6/2) − ln(2/6)`.
    // - `SE(β₀)² = 1/2 + 1/6`, `SE(β₁)² = 1/2 + 1/6 + 1/6 + 1/2`.
    // - Null deviance `−2·16·ln(0.5)`; converged.
    fn binary_predictor_matches_closed_form() {
        // Arrange
        let g: Vec<f64> = std::iter::repeat(0.0).take(8).chain(std::iter::repeat(1.0).take(8)).collect();
        let y: Vec<f64> = [0., 0., 0., 0., 0., 0., 1., 1., 0., 0., 1., 1., 1., 1., 1., 1.].to_vec();
        let design = Array2::from_shape_fn((16, 2), |(i, j)| if j == 0 { 1.0 } else { g[i] });

        // Act
        let glm = fit_logit_glm(&design, &Array1::from(y), &GlmOptions::default()).unwrap();

        // Assert
        let b0 = (2.0_f64 / 6.0).ln();
        let b1 = (6.0_f64 / 2.0).ln() - b0;
        assert!(glm.converged);
        assert_abs_diff_eq!(glm.coefficients[0], b0, epsilon = 1e-8);
        assert_abs_diff_eq!(glm.coefficients[1], b1, epsilon = 1e-8);
        assert_abs_diff_eq!(glm.std_errors[0], (0.5_f64 + 1.0 / 6.0).sqrt(), epsilon = 1e-6);
        assert_abs_diff_eq!(glm.std_errors[1], (4.0_f64 / 3.0).sqrt(), epsilon = 1e-6);
        assert_abs_diff_eq!(glm.null_deviance, -32.0 * 0.5_f64.ln(), epsilon = 1e-10);
        assert!(glm.deviance < glm.null_deviance);
        assert_abs_diff_eq!(glm.aic, glm.deviance + 4.0, epsilon = 1e-12);
        assert!(glm.p_values.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    // Purpose
    // -------
    // Malformed inputs are rejected before iterating; collinear columns
    // cannot be factored.
    //
    // Given
    // -----
    // - No rows; mismatched response; a response of 0.5; two identical
    //   columns.
    //
    // Expect
    // ------
    // - `EmptyData`, `DimensionMismatch`, `InvalidResponse`,
    //   `SingularWeightedGram`.
    fn invalid_inputs_are_rejected() {
        let opts = GlmOptions::default();

        let err = fit_logit_glm(&Array2::zeros((0, 1)), &Array1::zeros(0), &opts).unwrap_err();
        assert!(matches!(err, ReferenceError::EmptyData));

        let err = fit_logit_glm(&array![[1.0], [1.0]], &array![1.0], &opts).unwrap_err();
        assert!(matches!(err, ReferenceError::DimensionMismatch { rows: 2, labels: 1 }));

        let err = fit_logit_glm(&array![[1.0], [1.0]], &array![1.0, 0.5], &opts).unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidResponse { index: 1, .. }));

        let collinear = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let err = fit_logit_glm(&collinear, &array![1.0, 0.0, 1.0], &opts).unwrap_err();
        assert!(matches!(err, ReferenceError::SingularWeightedGram { iteration: 1 }));
    }
}
