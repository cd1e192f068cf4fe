//! logistic: binary logistic regression by direct likelihood minimization.
//!
//! Purpose
//! -------
//! Estimate `P(y = 1 | x) = σ(β₀ + xᵀβ)` by handing the mean negative
//! log-likelihood and its analytic gradient to a general-purpose optimizer,
//! then apply the coefficients to new rows.
//!
//! Key behaviors
//! -------------
//! - [`sigmoid`] and [`cost`] hold the three pure numerical pieces: `σ`,
//!   `J(θ)`, and `∇J(θ)`. Nothing is clamped.
//! - [`design::design_matrix`] is the only place a design matrix is built
//!   (bias column first, features in table order).
//! - [`fit::fit`] filters incomplete rows, starts at `θ = 0`, and minimizes
//!   through [`objective::LogisticObjective`].
//! - [`predict::predict`] filters its own incomplete rows and returns
//!   probabilities together with the original row indices.
//!
//! Invariants & assumptions
//! ------------------------
//! - Labels used for fitting are exactly 0 or 1.
//! - Coefficient order is `(Intercept)` followed by the fitted feature
//!   names; predictions select input columns by those names.
//! - Degenerate optimizer runs (non-finite cost, exhausted budget) still
//!   return coefficients; they are flagged through `tracing` warnings and
//!   the [`fit::LogisticFit`] accessors.

pub mod coefficients;
pub mod cost;
pub mod design;
pub mod errors;
pub mod fit;
pub mod objective;
pub mod predict;
pub mod sigmoid;

pub use self::coefficients::Coefficients;
pub use self::design::{design_matrix, INTERCEPT_NAME};
pub use self::errors::{LogitError, LogitResult};
pub use self::fit::{fit, LogisticFit};
pub use self::objective::{DesignData, LogisticObjective};
pub use self::predict::{predict, Prediction};
pub use self::sigmoid::{sigmoid, sigmoid_array};
