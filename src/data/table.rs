//! Named numeric feature tables.
//!
//! Purpose
//! -------
//! Hold the predictor columns used by fit and predict: an `n × p` matrix of
//! `f64` with one name per column. Missing cells are stored as `NaN`; this
//! module never drops or imputes anything.
//!
//! Invariants & assumptions
//! ------------------------
//! - `names.len() == values.ncols()` and names are unique.
//! - Column order is significant: it is the order features enter the design
//!   matrix (after the bias column).
use crate::data::errors::{DataError, DataResult};
use ndarray::{Array2, ArrayView1, Axis};

/// `n × p` table of named numeric columns, `NaN` for missing cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    names: Vec<String>,
    values: Array2<f64>,
}

impl FeatureTable {
    /// Wrap a matrix with its column names.
    ///
    /// # Errors
    /// - [`DataError::NoFeatures`] if there are no columns.
    /// - [`DataError::ColumnCountMismatch`] if names and width disagree.
    /// - [`DataError::DuplicateColumn`] on repeated names.
    pub fn new(names: Vec<String>, values: Array2<f64>) -> DataResult<Self> {
        if names.is_empty() {
            return Err(DataError::NoFeatures);
        }
        if names.len() != values.ncols() {
            return Err(DataError::ColumnCountMismatch {
                names: names.len(),
                columns: values.ncols(),
            });
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(DataError::DuplicateColumn { name: name.clone() });
            }
        }
        Ok(Self { names, values })
    }

    /// Build a table from `(name, column)` pairs of equal length.
    ///
    /// # Errors
    /// - [`DataError::RowCountMismatch`] if the columns are ragged.
    /// - Anything [`FeatureTable::new`] rejects.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> DataResult<Self> {
        let nrows = columns.first().map_or(0, |(_, col)| col.len());
        let ncols = columns.len();
        let mut names = Vec::with_capacity(ncols);
        let mut values = Array2::<f64>::zeros((nrows, ncols));
        for (j, (name, col)) in columns.into_iter().enumerate() {
            if col.len() != nrows {
                return Err(DataError::RowCountMismatch { expected: nrows, actual: col.len() });
            }
            for (i, v) in col.into_iter().enumerate() {
                values[[i, j]] = v;
            }
            names.push(name.into());
        }
        Self::new(names, values)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    /// Column by name, if present.
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.position(name).map(|j| self.values.column(j))
    }

    /// Reorder (or subset) columns to `names`.
    ///
    /// Used to line a prediction table up with the feature order a model was
    /// fitted on.
    ///
    /// # Errors
    /// - [`DataError::UnknownColumn`] if a name is absent.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> DataResult<Self> {
        let mut idx = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let j = self.position(name).ok_or_else(|| DataError::UnknownColumn {
                name: name.to_string(),
                available: self.names.clone(),
            })?;
            idx.push(j);
        }
        let values = self.values.select(Axis(1), &idx);
        Self::new(names.iter().map(|n| n.as_ref().to_string()).collect(), values)
    }

    /// Keep only the rows at `rows`, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        Self { names: self.names.clone(), values: self.values.select(Axis(0), rows) }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
