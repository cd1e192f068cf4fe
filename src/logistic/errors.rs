//! Errors for fitting and applying the logistic model.
//!
//! [`LogitError`] wraps the lower layers ([`DataError`], [`OptError`]) and
//! adds the model-level checks: labels outside `{0, 1}`, nothing left after
//! missing-value filtering, and coefficient/feature mismatches at predict
//! time.
//!
//! Non-convergence is deliberately absent: it is reported on
//! [`LogisticFit`](crate::logistic::LogisticFit), not raised.
use crate::{data::DataError, optimization::errors::OptError};

/// Result alias for logistic-model operations.
pub type LogitResult<T> = Result<T, LogitError>;

#[derive(Debug)]
pub enum LogitError {
    // ---- Input ----
    /// Every row had at least one missing value.
    NoCompleteRows { total: usize },

    /// A surviving label is not 0 or 1. `row` is the original row index.
    InvalidLabel { row: usize, value: f64 },

    // ---- Coefficients ----
    /// Coefficient vector length does not equal `1 + number of features`.
    CoefficientLengthMismatch { expected: usize, actual: usize },

    // ---- Wrapped ----
    Data(DataError),
    Optimization(OptError),
}

impl std::error::Error for LogitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogitError::Data(e) => Some(e),
            LogitError::Optimization(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogitError::NoCompleteRows { total } => {
                write!(f, "No complete rows left after dropping missing values ({total} rows read).")
            }
            LogitError::InvalidLabel { row, value } => {
                write!(f, "Label at row {row} is {value}; labels must be 0 or 1.")
            }
            LogitError::CoefficientLengthMismatch { expected, actual } => {
                write!(f, "Expected {expected} coefficients (intercept + features), got {actual}.")
            }
            LogitError::Data(e) => write!(f, "{e}"),
            LogitError::Optimization(e) => write!(f, "Optimization failed: {e}"),
        }
    }
}

impl From<DataError> for LogitError {
    fn from(err: DataError) -> Self {
        LogitError::Data(err)
    }
}

impl From<OptError> for LogitError {
    fn from(err: OptError) -> Self {
        LogitError::Optimization(err)
    }
}
