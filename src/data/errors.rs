//! Errors for tabular input: CSV reading, column selection, and table shape
//! checks.
//!
//! ## Conventions
//! - Row indices are 0-based and count data rows (the header is not a row).
//! - Missing or unparseable *cells* are not errors; they become `NaN`. Only
//!   structural problems (unknown columns, ragged tables, I/O) surface here.
use std::path::PathBuf;

/// Result alias for data-loading and table-construction paths.
pub type DataResult<T> = Result<T, DataError>;

/// Unified error type for tabular input.
#[derive(Debug)]
pub enum DataError {
    // ---- I/O and parsing ----
    /// The CSV file could not be opened.
    Io { path: PathBuf, source: std::io::Error },

    /// The CSV reader failed (malformed quoting, ragged record, ...).
    Csv(csv::Error),

    // ---- Column selection ----
    /// A requested column is not present in the header.
    UnknownColumn { name: String, available: Vec<String> },

    /// The same column was requested twice.
    DuplicateColumn { name: String },

    /// No feature columns were requested.
    NoFeatures,

    // ---- Table shape ----
    /// Column names and matrix width disagree.
    ColumnCountMismatch { names: usize, columns: usize },

    /// A column has a different number of rows than the table.
    RowCountMismatch { expected: usize, actual: usize },

    /// Labels and features have different row counts.
    LabelLengthMismatch { rows: usize, labels: usize },
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io { source, .. } => Some(source),
            DataError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- I/O and parsing ----
            DataError::Io { path, source } => {
                write!(f, "Failed to open {}: {source}", path.display())
            }
            DataError::Csv(e) => write!(f, "CSV error: {e}"),
            // ---- Column selection ----
            DataError::UnknownColumn { name, available } => {
                write!(f, "Unknown column '{name}'; available columns: {}", available.join(", "))
            }
            DataError::DuplicateColumn { name } => {
                write!(f, "Column '{name}' was requested more than once.")
            }
            DataError::NoFeatures => write!(f, "At least one feature column is required."),
            // ---- Table shape ----
            DataError::ColumnCountMismatch { names, columns } => {
                write!(f, "Got {names} column names for a table with {columns} columns.")
            }
            DataError::RowCountMismatch { expected, actual } => {
                write!(f, "Column length mismatch: expected {expected} rows, got {actual}.")
            }
            DataError::LabelLengthMismatch { rows, labels } => {
                write!(f, "Feature table has {rows} rows but {labels} labels were given.")
            }
        }
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Csv(err)
    }
}
