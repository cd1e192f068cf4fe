//! Logistic (sigmoid) function.
//!
//! `σ(z) = 1 / (1 + e^(−z))`, evaluated literally. There is no clamping: for
//! large `|z|` the result rounds to exactly `0.0` or `1.0`, and callers that
//! take `ln σ` must live with `−∞`.
use ndarray::{Array, ArrayBase, Data, Dimension};

/// Scalar sigmoid.
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Elementwise sigmoid over any `ndarray` shape.
pub fn sigmoid_array<S, D>(z: &ArrayBase<S, D>) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    z.mapv(sigmoid)
}
