//! inference::hessian: standard errors from the observed information.
//!
//! Purpose
//! -------
//! Turn the gradient of an *average* negative log-likelihood into
//! per-parameter standard errors at the optimum. The Hessian is obtained by
//! finite differences of the gradient, copied into `nalgebra`, and inverted
//! through a truncated symmetric eigendecomposition.
//!
//! Key behaviors
//! -------------
//! - [`compute_hessian`] gives `J̄(θ̂)`, the average observed information.
//! - `J̄` is copied into a `DMatrix` (`fill_dmatrix`) and decomposed as
//!   `J̄ = Q Λ Qᵀ`.
//! - `Var(θ̂_i) = (1/n)·Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k`, i.e. the
//!   diagonal of the Moore–Penrose pseudoinverse scaled back from the
//!   average to the total likelihood.
//!
//! Invariants & assumptions
//! ------------------------
//! - The gradient map is on the average scale (what the optimizer
//!   minimizes), so `n` must be the number of observations it averages over.
//! - No explicit inverse is formed. Directions with eigenvalues at most
//!   [`EIGEN_EPS`] are dropped, which leaves a zero variance contribution
//!   along them instead of dividing by a tiny number.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the `ndarray` → `nalgebra` copy, a diagonal quadratic
//!   with known inverse, and the `1/n` scaling.
//! - The logistic model tests compare these SEs with the IRLS reference
//!   fit's SEs.
use crate::optimization::{errors::OptResult, optimizer::finite_diff::compute_hessian};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Eigenvalues at or below this threshold are treated as zero.
pub const EIGEN_EPS: f64 = 1e-10;

/// Standard errors at `theta_hat` from the gradient of an average cost.
///
/// Parameters
/// ----------
/// - `f`: gradient map `θ ↦ ∇c̄(θ)` of the average negative log-likelihood.
///   Must be C¹ near `theta_hat`.
/// - `theta_hat`: point estimate; its length fixes the output length.
/// - `n_obs`: number of observations `c̄` averages over.
///
/// Errors
/// ------
/// - Any error from [`compute_hessian`] (non-finite or misshaped Hessian).
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use logit_mle::inference::hessian::calc_standard_errors;
/// // c̄(θ) = ½ θᵀAθ with A = diag(4, 1), averaged over n = 1.
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let f = |theta: &ndarray::Array1<f64>| a.dot(theta);
/// let se = calc_standard_errors(&f, &array![1.0, -1.0], 1).unwrap();
/// assert!((se[0] - 0.5).abs() < 1e-6);
/// assert!((se[1] - 1.0).abs() < 1e-6);
/// ```
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>, n_obs: usize,
) -> OptResult<Array1<f64>> {
    let k = theta_hat.len();
    let obs_info = compute_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(k, k);
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    let avg_se = solve_for_se(obs_info_nalg, k);
    Ok(avg_se / (n_obs as f64).sqrt())
}

// ---- Helper methods ----

/// Copy a square `ndarray` matrix into a preallocated `DMatrix`, column by
/// column. Shapes must match.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let k = obs_info.ncols();
    for j in 0..k {
        for i in 0..k {
            obs_info_nalg[(i, j)] = obs_info[[i, j]];
        }
    }
}

/// `sqrt(diag(J⁺))` via symmetric eigendecomposition with truncation.
fn solve_for_se(obs_info_nalg: DMatrix<f64>, k: usize) -> Array1<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    Array1::from_shape_fn(k, |i| {
        eigenvals
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(j, &lambda)| q[(i, j)] * q[(i, j)] / lambda)
            .sum::<f64>()
            .sqrt()
    })
}
