//! data: tabular input for logistic regression.
//!
//! Purpose
//! -------
//! Turn a CSV with a header row into a named feature table plus a label
//! vector, and filter out incomplete rows before a fit or prediction.
//!
//! Key behaviors
//! -------------
//! - [`csv_reader`] selects columns by header name. Missing or unparseable
//!   cells become `NaN`; only structural problems are errors.
//! - [`table::FeatureTable`] keeps the column names next to an
//!   `ndarray::Array2<f64>`.
//! - [`missing`] does complete-case filtering, synchronized across features
//!   and labels, and reports which original rows survived.
//!
//! Conventions
//! -----------
//! - `NaN` is the only missing-value marker inside the crate.
//! - Row indices are 0-based data rows (header excluded).

pub mod csv_reader;
pub mod errors;
pub mod missing;
pub mod table;

pub use self::csv_reader::{read_feature_csv, read_labeled_csv, LabeledTable};
pub use self::errors::{DataError, DataResult};
pub use self::missing::{drop_missing, drop_missing_features, RowFilter};
pub use self::table::FeatureTable;
