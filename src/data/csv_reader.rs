//! CSV loading with header-based column selection.
//!
//! Purpose
//! -------
//! Read a shot-log style CSV (header row, one observation per line) and pull
//! out a label column and a list of feature columns by name.
//!
//! Key behaviors
//! -------------
//! - Feature cells that are empty, `NA`, `NaN`, non-finite, or otherwise not a
//!   number become `NaN` (missing). Unparseable cells are never an error.
//! - Label cells accept numbers and the words `true` / `false`
//!   (case-insensitive). Anything else is missing. Numeric labels outside
//!   `{0, 1}` are kept as read; fitting rejects them later.
//! - Unknown column names are an error ([`DataError::UnknownColumn`]).
//! - Selected features keep the order the caller asked for.
use std::{fs::File, io::Read, path::Path};

use crate::data::{
    errors::{DataError, DataResult},
    table::FeatureTable,
};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Labels and features read from one CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable {
    pub features: FeatureTable,
    pub labels: Array1<f64>,
}

/// Read `label` and `features` from the CSV at `path`.
///
/// # Errors
/// - [`DataError::Io`] if the file cannot be opened.
/// - [`DataError::Csv`] for malformed CSV.
/// - [`DataError::UnknownColumn`] / [`DataError::NoFeatures`] /
///   [`DataError::DuplicateColumn`] for bad column requests.
pub fn read_labeled_csv<P: AsRef<Path>, S: AsRef<str>>(
    path: P, label: &str, features: &[S],
) -> DataResult<LabeledTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| DataError::Io { path: path.to_path_buf(), source })?;
    let table = labeled_from_reader(file, label, features)?;
    debug!(
        path = %path.display(),
        rows = table.labels.len(),
        features = table.features.ncols(),
        "loaded labeled CSV"
    );
    Ok(table)
}

/// Read only `features` from the CSV at `path` (no label column).
///
/// # Errors
/// Same as [`read_labeled_csv`].
pub fn read_feature_csv<P: AsRef<Path>, S: AsRef<str>>(
    path: P, features: &[S],
) -> DataResult<FeatureTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| DataError::Io { path: path.to_path_buf(), source })?;
    features_from_reader(file, features)
}

/// [`read_labeled_csv`] over any reader.
pub fn labeled_from_reader<R: Read, S: AsRef<str>>(
    rdr: R, label: &str, features: &[S],
) -> DataResult<LabeledTable> {
    let (names, mut columns) = select_columns(rdr, Some(label), features)?;
    let raw_labels = columns.remove(0);
    let labels = raw_labels.iter().map(|cell| parse_label(cell)).collect::<Array1<f64>>();
    let features = build_table(names, &columns, labels.len())?;
    Ok(LabeledTable { features, labels })
}

/// [`read_feature_csv`] over any reader.
pub fn features_from_reader<R: Read, S: AsRef<str>>(
    rdr: R, features: &[S],
) -> DataResult<FeatureTable> {
    let (names, columns) = select_columns(rdr, None, features)?;
    let nrows = columns.first().map_or(0, Vec::len);
    build_table(names, &columns, nrows)
}

/// Parse a feature cell; anything that is not a finite number is `NaN`.
pub fn parse_feature(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

/// Parse a label cell: numbers as-is, `true`/`false` as 1/0, else `NaN`.
pub fn parse_label(cell: &str) -> f64 {
    let cell = cell.trim();
    if cell.eq_ignore_ascii_case("true") {
        return 1.0;
    }
    if cell.eq_ignore_ascii_case("false") {
        return 0.0;
    }
    parse_feature(cell)
}

// ---- Helper Methods ----

/// Read the raw text of the requested columns, label first when present.
fn select_columns<R: Read, S: AsRef<str>>(
    rdr: R, label: Option<&str>, features: &[S],
) -> DataResult<(Vec<String>, Vec<Vec<String>>)> {
    if features.is_empty() {
        return Err(DataError::NoFeatures);
    }
    let mut reader = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(rdr);
    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let lookup = |name: &str| -> DataResult<usize> {
        header.iter().position(|h| h == name).ok_or_else(|| DataError::UnknownColumn {
            name: name.to_string(),
            available: header.clone(),
        })
    };
    let mut idx = Vec::with_capacity(features.len() + 1);
    if let Some(label) = label {
        idx.push(lookup(label)?);
    }
    let mut names = Vec::with_capacity(features.len());
    for name in features {
        let name = name.as_ref();
        if names.iter().any(|n: &String| n == name) || label == Some(name) {
            return Err(DataError::DuplicateColumn { name: name.to_string() });
        }
        idx.push(lookup(name)?);
        names.push(name.to_string());
    }

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); idx.len()];
    for record in reader.records() {
        let record = record?;
        for (col, &j) in columns.iter_mut().zip(idx.iter()) {
            col.push(record.get(j).unwrap_or("").to_string());
        }
    }
    Ok((names, columns))
}

fn build_table(names: Vec<String>, columns: &[Vec<String>], nrows: usize) -> DataResult<FeatureTable> {
    let mut values = Array2::<f64>::zeros((nrows, columns.len()));
    for (j, col) in columns.iter().enumerate() {
        for (i, cell) in col.iter().enumerate() {
            values[[i, j]] = parse_feature(cell);
        }
    }
    FeatureTable::new(names, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Header-based selection and requested column order.
    // - Missing-cell handling for features and label coercion.
    // - Unknown and duplicate column requests.
    // -------------------------------------------------------------------------

    const SHOTS: &str = "\
GAME_ID,FGM,SHOT_DIST,SHOT_CLOCK,PLAYER
1,1,4.5,10.2,a
2,0,22.1,,b
3,true,7.0,NA,c
4,FALSE,foo,3.3,d
5,maybe,12.0,18.0,e
";

    #[test]
    // Purpose
    // -------
    // Columns are picked by header name in the caller's order, and bad cells
    // become NaN instead of errors.
    //
    // Given
    // -----
    // - Five rows with empty, `NA`, and junk feature cells, and labels
    //   `1, 0, true, FALSE, maybe`.
    //
    // Expect
    // ------
    // - Feature order `SHOT_CLOCK, SHOT_DIST`.
    // - Labels `[1, 0, 1, 0, NaN]`.
    // - NaN at the empty, `NA`, and `foo` cells.
    fn reads_selected_columns_with_missing_cells() {
        // Act
        let table =
            labeled_from_reader(SHOTS.as_bytes(), "FGM", &["SHOT_CLOCK", "SHOT_DIST"]).unwrap();

        // Assert
        assert_eq!(table.features.names(), &["SHOT_CLOCK".to_string(), "SHOT_DIST".to_string()]);
        let labels = &table.labels;
        assert_eq!(&labels.as_slice().unwrap()[..4], &[1.0, 0.0, 1.0, 0.0]);
        assert!(labels[4].is_nan());

        let v = table.features.values();
        assert_eq!(v[[0, 0]], 10.2);
        assert_eq!(v[[0, 1]], 4.5);
        assert!(v[[1, 0]].is_nan());
        assert!(v[[2, 0]].is_nan());
        assert!(v[[3, 1]].is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Requests for columns that are not in the header fail loudly.
    //
    // Given
    // -----
    // - A feature name `CLOSE_DEF_DIST` absent from the header, a label name
    //   `MADE` absent from the header, and a repeated feature.
    //
    // Expect
    // ------
    // - `UnknownColumn` twice, then `DuplicateColumn`.
    fn unknown_and_duplicate_columns_are_errors() {
        let err = labeled_from_reader(SHOTS.as_bytes(), "FGM", &["CLOSE_DEF_DIST"]).unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn { ref name, .. } if name == "CLOSE_DEF_DIST"));

        let err = labeled_from_reader(SHOTS.as_bytes(), "MADE", &["SHOT_DIST"]).unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn { ref name, .. } if name == "MADE"));

        let err = features_from_reader(SHOTS.as_bytes(), &["SHOT_DIST", "SHOT_DIST"]).unwrap_err();
        assert!(matches!(err, DataError::DuplicateColumn { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Cell parsers map the accepted spellings.
    //
    // Given
    // -----
    // - Assorted feature and label cells.
    //
    // Expect
    // ------
    // - Finite numbers parse; `inf`, `NaN`, blanks, and words are missing.
    // - Labels keep numeric values as read (including `2`).
    fn cell_parsers_follow_missing_rules() {
        assert_eq!(parse_feature(" 3.5 "), 3.5);
        assert!(parse_feature("").is_nan());
        assert!(parse_feature("NaN").is_nan());
        assert!(parse_feature("inf").is_nan());

        assert_eq!(parse_label("True"), 1.0);
        assert_eq!(parse_label("false"), 0.0);
        assert_eq!(parse_label("2"), 2.0);
        assert!(parse_label("made").is_nan());
    }
}
