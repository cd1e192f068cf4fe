//! logit_mle: logistic regression by maximum likelihood.
//!
//! Purpose
//! -------
//! Fit a binary logistic regression by handing the mean negative
//! log-likelihood and its analytic gradient to a general-purpose optimizer
//! (argmin L-BFGS or steepest descent), then score new rows, cross-check the
//! coefficients against an IRLS GLM fit, and present predictions over a grid
//! of predictor values.
//!
//! Key behaviors
//! -------------
//! - [`data`] reads labelled CSV files into named numeric columns and drops
//!   rows with missing cells.
//! - [`logistic`] holds the model: sigmoid, cost, gradient, the shared
//!   bias-first design matrix, [`logistic::fit`] and [`logistic::predict`].
//! - [`optimization`] wraps argmin behind the `Objective` / `minimize`
//!   interface.
//! - [`inference`] computes standard errors from the observed information.
//! - [`reference`] fits the same model by IRLS and compares coefficients.
//! - [`report`] builds prediction grids, summary tables, and SVG charts.
//!
//! Invariants & assumptions
//! ------------------------
//! - The design matrix always has the intercept in column 0 and the
//!   features in their input order, at fit time and at predict time.
//! - Labels are `0`/`1` after missing rows are removed.
//! - Numerical degeneracy (separable data, saturated sigmoid) is not
//!   guarded; it shows up as non-finite evaluations and a non-converged
//!   outcome.
//!
//! Conventions
//! -----------
//! - Each layer has its own error enum and `XResult<T>` alias.
//! - Diagnostics go through `tracing`; the library never installs a
//!   subscriber.
//!
//! Downstream usage
//! ----------------
//! - The `logit-mle` binary wires these modules into a command-line
//!   pipeline: CSV → fit → optional GLM comparison → grid summary → chart.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code; `tests/` runs the pipeline on a
//!   seeded synthetic shot log and a small CSV fixture.

pub mod data;
pub mod inference;
pub mod logistic;
pub mod optimization;
pub mod reference;
pub mod report;
