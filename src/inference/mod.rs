//! inference: standard errors for fitted models.
//!
//! Purpose
//! -------
//! Post-estimation uncertainty for parameters found by
//! [`optimization::optimizer::minimize`](crate::optimization::optimizer::minimize).
//! Classical standard errors come from the observed information, built as a
//! finite-difference Hessian of the average-cost gradient.
//!
//! Conventions
//! -----------
//! - Gradients are on the average scale (mean negative log-likelihood);
//!   [`hessian::calc_standard_errors`] rescales by the observation count.
//! - Failures surface as `OptError` through `OptResult`, the same surface
//!   the optimizer uses.

pub mod hessian;

pub use self::hessian::{calc_standard_errors, EIGEN_EPS};
