//! Errors for prediction grids, summary tables, and charts.
use crate::{data::DataError, logistic::LogitError};

/// Result alias for reporting operations.
pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug)]
pub enum ReportError {
    // ---- Grid construction ----
    /// An axis definition could not be parsed (`NAME=v1,v2` or
    /// `NAME=start:stop:step`).
    InvalidAxis { axis: String, reason: String },

    /// An axis has no values.
    EmptyAxis { name: String },

    /// The same axis name appears twice.
    DuplicateAxis { name: String },

    /// The cartesian product of the axes exceeds the point limit.
    GridTooLarge { limit: usize },

    /// A fitted feature has no axis in the grid.
    MissingAxis { feature: String },

    /// A named axis is not in the grid.
    UnknownAxis { name: String },

    /// An axis other than the x/group axes takes more than one value, so
    /// the summary would average over it implicitly.
    UnheldAxis { name: String, len: usize },

    /// Nothing to summarize or draw.
    EmptySummary,

    // ---- Output ----
    Io(std::io::Error),
    Csv(csv::Error),
    /// Drawing backend failure (plotters errors are generic over the
    /// backend, so they are carried as text).
    Plot(String),

    // ---- Wrapped ----
    Data(DataError),
    Logit(LogitError),
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io(e) => Some(e),
            ReportError::Csv(e) => Some(e),
            ReportError::Data(e) => Some(e),
            ReportError::Logit(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::InvalidAxis { axis, reason } => {
                write!(f, "Invalid grid axis '{axis}': {reason}")
            }
            ReportError::EmptyAxis { name } => write!(f, "Grid axis '{name}' has no values."),
            ReportError::DuplicateAxis { name } => {
                write!(f, "Grid axis '{name}' is given more than once.")
            }
            ReportError::GridTooLarge { limit } => {
                write!(f, "Prediction grid would have more than {limit} points.")
            }
            ReportError::MissingAxis { feature } => {
                write!(f, "The grid has no axis for fitted feature '{feature}'.")
            }
            ReportError::UnknownAxis { name } => write!(f, "The grid has no axis '{name}'."),
            ReportError::UnheldAxis { name, len } => write!(
                f,
                "Axis '{name}' takes {len} values; only the x and group axes may vary."
            ),
            ReportError::EmptySummary => write!(f, "No predictions to summarize."),
            ReportError::Io(e) => write!(f, "I/O error: {e}"),
            ReportError::Csv(e) => write!(f, "CSV error: {e}"),
            ReportError::Plot(msg) => write!(f, "Plotting failed: {msg}"),
            ReportError::Data(e) => write!(f, "{e}"),
            ReportError::Logit(e) => write!(f, "{e}"),
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Csv(err)
    }
}

impl From<LogitError> for ReportError {
    fn from(err: LogitError) -> Self {
        ReportError::Logit(err)
    }
}

impl From<DataError> for ReportError {
    fn from(err: DataError) -> Self {
        ReportError::Data(err)
    }
}
