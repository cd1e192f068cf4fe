//! optimization: objective minimization and its error surface.
//!
//! Purpose
//! -------
//! Give model code one place to hand an objective, its gradient, and a
//! starting point to a numerical optimizer, and one error type to get back
//! when something goes wrong.
//!
//! Key behaviors
//! -------------
//! - [`optimizer`] wraps argmin's L-BFGS and steepest-descent solvers behind
//!   the [`optimizer::Objective`] trait and [`optimizer::minimize`].
//! - [`errors`] normalizes configuration problems, objective pre-flight
//!   failures, and backend solver errors into [`errors::OptError`] with the
//!   alias [`errors::OptResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Starting points must be finite; everything after that is the solver's
//!   business. Degenerate evaluations (NaN/±∞) are reported on the outcome.
//! - Exhausting the iteration budget is not an error; callers inspect
//!   `OptimOutcome::converged`.
//!
//! Conventions
//! -----------
//! - Parameters, gradients, and Hessians use the `ndarray` aliases in
//!   [`optimizer::types`].
//! - Library code logs through `tracing`; installing a subscriber is left to
//!   the binary or the embedding application.

pub mod errors;
pub mod optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use logit_mle::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::optimizer::prelude::*;
}
