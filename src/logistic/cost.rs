//! Mean negative log-likelihood of the logistic model and its gradient.
//!
//! With `h = σ(Xθ)`:
//!
//! - cost: `J(θ) = −(1/n)·(yᵀ·ln h + (1 − y)ᵀ·ln(1 − h))`
//! - gradient: `∇J(θ) = (1/n)·Xᵀ(h − y)`
//!
//! Both are pure functions of `(θ, X, y)` and are evaluated as written. When
//! some `h_i` rounds to exactly 0 or 1 the cost becomes `+∞` or `NaN`; that
//! value is returned as-is.
use crate::logistic::sigmoid::sigmoid_array;
use ndarray::{Array1, ArrayView1, ArrayView2};

/// `J(θ; X, y)`.
///
/// Shapes are the caller's responsibility: `X` is `n × k`, `θ` has length
/// `k`, `y` has length `n`.
pub fn cost(theta: ArrayView1<'_, f64>, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    let n = y.len() as f64;
    let h = sigmoid_array(&x.dot(&theta));
    let ln_h = h.mapv(f64::ln);
    let ln_one_minus_h = h.mapv(|p| (1.0 - p).ln());
    let one_minus_y = y.mapv(|v| 1.0 - v);
    -(y.dot(&ln_h) + one_minus_y.dot(&ln_one_minus_h)) / n
}

/// `∇J(θ; X, y)`, length `k = X.ncols()`.
pub fn gradient(
    theta: ArrayView1<'_, f64>, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>,
) -> Array1<f64> {
    let n = y.len() as f64;
    let h = sigmoid_array(&x.dot(&theta));
    x.t().dot(&(h - &y)) / n
}
