//! optimizer: argmin-backed minimization of user objectives.
//!
//! Purpose
//! -------
//! Provide a small, model-agnostic layer that takes an objective `c(θ)`, an
//! optional analytic gradient, and an initial point, and hands them to an
//! argmin solver. Models never touch argmin generics directly.
//!
//! Key behaviors
//! -------------
//! - Users implement [`Objective`] (cost, optional gradient, pre-flight
//!   check) and call [`minimize`] with:
//!   - an objective instance `&F`,
//!   - an initial parameter vector [`Theta`],
//!   - a data payload `&F::Data`, and
//!   - an [`OptimizerOptions`] configuration (tolerances, solver, line
//!     search, L-BFGS memory).
//! - Missing analytic gradients fall back to finite differences in
//!   [`adapter`].
//! - Non-finite cost or gradient values are counted, never raised; the
//!   count surfaces as [`OptimOutcome::non_finite_evals`].
//!
//! Conventions
//! -----------
//! - The objective is minimized exactly as given. No sign flips happen in
//!   this layer.
//! - Internal code:
//!   - uses [`adapter`] to bridge into argmin,
//!   - uses [`builders`] to construct the selected solver,
//!   - delegates execution to [`run::run_solver`], and
//!   - relies on [`finite_diff`] and [`validation`] for derivative and
//!     state checks.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover gradient pass-through and fallbacks in
//!   [`adapter`], solver construction in [`builders`], finite-difference
//!   behavior in [`finite_diff`], and outcome mapping in [`traits`].
//! - [`api`] runs every solver end to end on quadratic bowls; the logistic
//!   model tests exercise it on real likelihoods.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::EvalDiagnostics;
pub use self::api::minimize;
pub use self::traits::{
    LineSearcher, Objective, OptimOutcome, OptimizerOptions, SolverKind, Tolerances,
};
pub use self::types::{Cost, FnEvalMap, Grad, Hessian, Theta, DEFAULT_LBFGS_MEM, DEFAULT_MAX_ITER};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use logit_mle::optimization::optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{
        LineSearcher, Objective, OptimOutcome, OptimizerOptions, SolverKind, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
