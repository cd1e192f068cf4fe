//! Validation helpers for the optimizer.
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Starting points**: [`validate_theta0`] rejects non-finite entries.
//! - **Gradient shape**: [`validate_grad_dim`] enforces the gradient length.
//! - **Hessians**: [`validate_hessian`] enforces shape and finiteness of
//!   finite-difference Hessians.
//!
//! Gradients and costs produced *during* a run are deliberately not checked
//! for finiteness here; the adapter counts non-finite evaluations and the
//! runner reports them instead of aborting.
use crate::optimization::{
    errors::{OptError, OptResult},
    optimizer::types::{Grad, Hessian, Theta},
};

/// Validate the optional gradient‐norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a starting point: every entry must be finite.
///
/// # Errors
/// [`OptError::InvalidThetaInput`] with the first offending index/value.
pub fn validate_theta0(theta: &Theta) -> OptResult<()> {
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate the length of a gradient vector.
///
/// # Errors
/// [`OptError::GradientDimMismatch`] if `grad.len() != dim`.
pub fn validate_grad_dim(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Used on finite-difference paths, where a non-finite entry means the
/// difference scheme itself broke down and a fallback should be tried.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] for the first non-finite element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    validate_grad_dim(grad, dim)?;
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate the shape and entries of a Hessian matrix.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] if dimensions do not match `dim`.
/// - [`OptError::InvalidHessian`] if any entry is non-finite.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((i, j), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row: i, col: j, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Tolerances must be finite and strictly positive when present.
    //
    // Given
    // -----
    // - `None`, a valid tolerance, zero, and NaN.
    //
    // Expect
    // ------
    // - `None` and `1e-6` pass; zero and NaN are rejected with the
    //   matching variant.
    fn tolerance_checks_accept_positive_and_reject_degenerate_values() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_cost(Some(f64::NAN)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // A non-finite starting point is reported with its index.
    //
    // Given
    // -----
    // - `θ₀ = [0, ∞, 0]`.
    //
    // Expect
    // ------
    // - `InvalidThetaInput { index: 1, .. }`.
    fn validate_theta0_reports_first_non_finite_entry() {
        let theta = array![0.0, f64::INFINITY, 0.0];

        let err = validate_theta0(&theta).expect_err("infinite start must be rejected");

        assert!(matches!(err, OptError::InvalidThetaInput { index: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // `validate_grad_dim` only checks the length; `validate_grad` also
    // checks finiteness.
    //
    // Given
    // -----
    // - A length-2 gradient containing NaN.
    //
    // Expect
    // ------
    // - Dimension check passes for dim 2 and fails for dim 3.
    // - Full validation fails with `InvalidGradient`.
    fn gradient_validation_splits_shape_and_finiteness() {
        let grad = array![1.0, f64::NAN];

        assert!(validate_grad_dim(&grad, 2).is_ok());
        assert!(matches!(
            validate_grad_dim(&grad, 3),
            Err(OptError::GradientDimMismatch { expected: 3, found: 2 })
        ));
        assert!(matches!(validate_grad(&grad, 2), Err(OptError::InvalidGradient { index: 1, .. })));
    }
}
