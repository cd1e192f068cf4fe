//! reference: an independent GLM fit to validate the optimizer's answer.
//!
//! - [`glm`] fits the binomial/logit GLM by IRLS on the same design matrix
//!   the optimizer path uses, and reports SEs, Wald p-values, deviances,
//!   and AIC.
//! - [`compare`] checks two coefficient vectors for same signs and agreement
//!   to a number of decimal places.

pub mod compare;
pub mod errors;
pub mod glm;

pub use self::compare::{compare_coefficients, CoefComparison};
pub use self::errors::{ReferenceError, ReferenceResult};
pub use self::glm::{fit_glm, fit_logit_glm, GlmFit, GlmOptions};
