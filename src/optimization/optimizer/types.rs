//! optimizer::types: shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the optimizer so
//! the rest of the crate stays agnostic to `ndarray` and argmin generics.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are column vectors with one entry per free
//!   parameter (for logistic regression: bias first, then features).
//! - `Cost` is the scalar objective being **minimized**.
//! - `Hessian` is a dense `theta.len() × theta.len()` matrix when used.
use argmin::solver::{
    gradientdescent::SteepestDescent,
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient vector `∇c(θ)`, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense Hessian matrix; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value `c(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver
/// (e.g. `"cost_count"`, `"gradient_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Default iteration cap used by [`crate::optimization::optimizer::OptimizerOptions::default`].
pub const DEFAULT_MAX_ITER: usize = 500;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

/// Steepest descent wired to the Hager–Zhang line search.
pub type SteepestHagerZhang = SteepestDescent<HagerZhangLS>;

/// Steepest descent wired to the More–Thuente line search.
pub type SteepestMoreThuente = SteepestDescent<MoreThuenteLS>;
