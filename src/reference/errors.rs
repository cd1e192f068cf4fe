//! Errors for the IRLS reference fit and coefficient comparison.
use crate::data::DataError;

/// Result alias for reference-fit operations.
pub type ReferenceResult<T> = Result<T, ReferenceError>;

#[derive(Debug)]
pub enum ReferenceError {
    // ---- Options ----
    /// Convergence threshold must be finite and > 0.
    InvalidEpsilon { value: f64 },

    /// Iteration cap must be > 0.
    InvalidMaxIter { value: usize },

    // ---- Input ----
    /// Design matrix has no rows.
    EmptyData,

    /// Design rows and response length disagree.
    DimensionMismatch { rows: usize, labels: usize },

    /// Response must be exactly 0 or 1.
    InvalidResponse { index: usize, value: f64 },

    // ---- Numerical ----
    /// `XᵀWX` is not positive definite (collinear columns or
    /// degenerate weights).
    SingularWeightedGram { iteration: usize },

    // ---- Comparison ----
    /// Coefficient vectors of different lengths.
    LengthMismatch { left: usize, right: usize },

    /// Number of term names differs from the number of coefficients.
    TermCountMismatch { terms: usize, coefficients: usize },

    // ---- Wrapped ----
    Data(DataError),
}

impl std::error::Error for ReferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceError::Data(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceError::InvalidEpsilon { value } => {
                write!(f, "IRLS epsilon must be finite and > 0; got {value}.")
            }
            ReferenceError::InvalidMaxIter { value } => {
                write!(f, "IRLS max_iter must be > 0; got {value}.")
            }
            ReferenceError::EmptyData => write!(f, "Reference fit needs at least one row."),
            ReferenceError::DimensionMismatch { rows, labels } => {
                write!(f, "Design matrix has {rows} rows but {labels} responses were given.")
            }
            ReferenceError::InvalidResponse { index, value } => {
                write!(f, "Response at row {index} is {value}; must be 0 or 1.")
            }
            ReferenceError::SingularWeightedGram { iteration } => {
                write!(f, "X'WX is not positive definite at IRLS iteration {iteration}.")
            }
            ReferenceError::LengthMismatch { left, right } => {
                write!(f, "Cannot compare {left} coefficients with {right}.")
            }
            ReferenceError::TermCountMismatch { terms, coefficients } => {
                write!(f, "Got {terms} term names for {coefficients} coefficients.")
            }
            ReferenceError::Data(e) => write!(f, "{e}"),
        }
    }
}

impl From<DataError> for ReferenceError {
    fn from(err: DataError) -> Self {
        ReferenceError::Data(err)
    }
}
