//! optimizer::finite_diff: finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Keep the `finitediff` API in one place: a forward-difference gradient
//! with closure-error capture (used by the adapter's fallback path) and a
//! validated, symmetrized Hessian of a gradient map (used by inference to
//! build the observed information matrix).
//!
//! Conventions
//! -----------
//! - Central-difference Hessians are preferred; forward differences are the
//!   fallback when the central approximation fails validation.
//! - Errors surface as [`OptError`](crate::optimization::errors::OptError)
//!   via `OptResult<T>`.
use crate::optimization::{
    errors::OptResult,
    optimizer::{
        types::{Grad, Hessian, Theta},
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`, with error capture.
///
/// `func` is expected to park any evaluation error in `closure_err` and
/// return `NaN`. The cell is cleared on entry and inspected afterwards.
///
/// # Errors
/// - The error captured in `closure_err`, converted into `OptError`.
/// - `GradientDimMismatch` / `InvalidGradient` from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of the gradient map `f` at `theta`.
///
/// Tries a central-difference Hessian first and falls back to forward
/// differences when validation fails; the accepted matrix is symmetrized
/// in place before being returned.
///
/// # Errors
/// - `HessianDimMismatch` / `InvalidHessian` when the forward-difference
///   fallback also fails validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    match validate_hessian(&cent_hess, dim) {
        Ok(_) => {
            symmetrize_hess(&mut cent_hess);
            Ok(cent_hess)
        }
        Err(_) => {
            let mut forward_hess = theta.forward_hessian(f);
            validate_hessian(&forward_hess, dim)?;
            symmetrize_hess(&mut forward_hess);
            Ok(forward_hess)
        }
    }
}

// ---- Helper methods ----

/// Average each off-diagonal pair `(i, j)` / `(j, i)`; the diagonal is left
/// untouched. Assumes a square matrix.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradient computation with and without closure errors.
    // - Finite-difference Hessian construction, symmetry, and validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Forward differences of a smooth quadratic give a finite gradient of the
    // right length.
    //
    // Given
    // -----
    // - `θ = [0, 1]`, `f(θ) = θᵀθ`.
    //
    // Expect
    // ------
    // - `Ok(grad)` with `grad ≈ [0, 2]`.
    fn run_fd_diff_quadratic_returns_valid_gradient() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        // Act
        let grad = run_fd_diff(&theta, &f, &closure_err).expect("quadratic gradient");

        // Assert
        assert_eq!(grad.len(), theta.len());
        assert!(grad[0].abs() < 1e-6);
        assert!((grad[1] - 2.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // An error parked in `closure_err` is surfaced as an `OptError`.
    //
    // Given
    // -----
    // - A closure that stores `ArgminError::NotImplemented` and returns NaN.
    //
    // Expect
    // ------
    // - `Err(OptError::NotImplemented { .. })`.
    fn run_fd_diff_closure_error_is_propagated() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            let argmin_err = ArgminError::NotImplemented { text: "fd test".to_string() };
            closure_err.replace(Some(argmin_err.into()));
            f64::NAN
        };

        // Act
        let err = run_fd_diff(&theta, &f, &closure_err).expect_err("closure error must surface");

        // Assert
        assert!(matches!(err, OptError::NotImplemented { .. }));
    }

    #[test]
    // Purpose
    // -------
    // The Hessian of `‖θ‖²` computed from its gradient `2θ` is `2I`.
    //
    // Given
    // -----
    // - `θ = [1, 2]`, gradient map `g(θ) = 2θ`.
    //
    // Expect
    // ------
    // - 2×2 symmetric Hessian with diagonal ≈ 2 and off-diagonal ≈ 0.
    fn compute_hessian_quadratic_returns_symmetric_matrix() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64, 2.0]);
        let grad_fn = |theta: &Theta| theta.mapv(|x| 2.0 * x);

        // Act
        let hess = compute_hessian(&grad_fn, &theta).expect("quadratic Hessian");

        // Assert
        assert_eq!(hess.shape(), &[2, 2]);
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
        assert!((hess[[0, 0]] - 2.0).abs() < 1e-6);
        assert!(hess[[0, 1]].abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A gradient map returning NaN makes both Hessian paths fail.
    //
    // Given
    // -----
    // - Gradient map that always returns `[NaN]`.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidHessian { .. })`.
    fn compute_hessian_non_finite_entries_yield_invalidhessian_error() {
        let theta: Theta = Array1::from(vec![0.0_f64]);
        let grad_fn = |_theta: &Theta| Array1::from(vec![f64::NAN]);

        let err = compute_hessian(&grad_fn, &theta).expect_err("NaN Hessian");

        assert!(matches!(err, OptError::InvalidHessian { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Symmetrization averages off-diagonal pairs and keeps the diagonal.
    //
    // Given
    // -----
    // - `[[1, 2], [0, 3]]`.
    //
    // Expect
    // ------
    // - Off-diagonals become 1; diagonal unchanged.
    fn symmetrize_hess_makes_matrix_symmetric() {
        let mut h: Hessian = Array2::from_shape_vec((2, 2), vec![1.0_f64, 2.0, 0.0, 3.0]).unwrap();

        symmetrize_hess(&mut h);

        assert_eq!(h[[0, 0]], 1.0);
        assert_eq!(h[[1, 1]], 3.0);
        assert_eq!(h[[0, 1]], 1.0);
        assert_eq!(h[[1, 0]], 1.0);
    }
}
