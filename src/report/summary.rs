//! Summary of predicted probabilities over a grid: one probability per
//! `(x value, group value)` pair, all other predictors held fixed.
use std::{fmt, io::Write, path::Path};

use crate::{
    logistic::{predict, Coefficients},
    report::{
        errors::{ReportError, ReportResult},
        grid::PredictionGrid,
    },
};
use serde::Serialize;
use tracing::debug;

/// One cell of the summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow {
    pub x: f64,
    pub group: f64,
    pub probability: f64,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    x_name: &'a str,
    x: f64,
    group_name: &'a str,
    group: f64,
    probability: f64,
}

/// Predicted probabilities on an `x × group` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSummary {
    x_name: String,
    group_name: String,
    rows: Vec<SummaryRow>,
}

impl GridSummary {
    /// Predict over `grid` and tabulate by `x_axis` and `group_axis`.
    ///
    /// Every other axis must hold a single value; rows come out sorted by
    /// group, then x.
    ///
    /// # Errors
    /// - [`ReportError::UnknownAxis`] if either axis is not in the grid.
    /// - [`ReportError::UnheldAxis`] if another axis takes several values.
    /// - [`ReportError::MissingAxis`] if a fitted feature has no axis.
    /// - [`ReportError::Logit`] if prediction fails.
    pub fn from_grid(
        grid: &PredictionGrid, coefs: &Coefficients, x_axis: &str, group_axis: &str,
    ) -> ReportResult<Self> {
        for name in [x_axis, group_axis] {
            if grid.axis(name).is_none() {
                return Err(ReportError::UnknownAxis { name: name.to_string() });
            }
        }
        if let Some(axis) =
            grid.axes().iter().find(|a| a.name() != x_axis && a.name() != group_axis && a.len() > 1)
        {
            return Err(ReportError::UnheldAxis { name: axis.name().to_string(), len: axis.len() });
        }

        let table = grid.to_feature_table(coefs.feature_names())?;
        let pred = predict(coefs, &table)?;
        let (xs, groups) = match (table.column(x_axis), table.column(group_axis)) {
            (Some(xs), Some(groups)) => (xs, groups),
            _ => {
                let name = if table.column(x_axis).is_none() { x_axis } else { group_axis };
                return Err(ReportError::UnknownAxis { name: name.to_string() });
            }
        };
        let mut rows: Vec<SummaryRow> = pred
            .iter()
            .map(|(r, probability)| SummaryRow { x: xs[r], group: groups[r], probability })
            .collect();
        if rows.is_empty() {
            return Err(ReportError::EmptySummary);
        }
        rows.sort_by(|a, b| a.group.total_cmp(&b.group).then(a.x.total_cmp(&b.x)));
        debug!(rows = rows.len(), x_axis, group_axis, "built grid summary");
        Ok(Self { x_name: x_axis.to_string(), group_name: group_axis.to_string(), rows })
    }

    pub fn x_name(&self) -> &str {
        &self.x_name
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Distinct x values, ascending.
    pub fn x_values(&self) -> Vec<f64> {
        distinct(self.rows.iter().map(|r| r.x))
    }

    /// Distinct group values, ascending.
    pub fn group_values(&self) -> Vec<f64> {
        distinct(self.rows.iter().map(|r| r.group))
    }

    /// Probability at `(x, group)`, if that cell exists.
    pub fn probability(&self, x: f64, group: f64) -> Option<f64> {
        self.rows.iter().find(|r| r.x == x && r.group == group).map(|r| r.probability)
    }

    /// Probabilities for one group, ordered by x.
    pub fn series(&self, group: f64) -> Vec<(f64, f64)> {
        self.rows.iter().filter(|r| r.group == group).map(|r| (r.x, r.probability)).collect()
    }

    /// Write the rows in long format (`x_name, x, group_name, group,
    /// probability`).
    pub fn write_csv<W: Write>(&self, writer: W) -> ReportResult<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            writer.serialize(CsvRow {
                x_name: &self.x_name,
                x: row.x,
                group_name: &self.group_name,
                group: row.group,
                probability: row.probability,
            })?;
        }
        writer.flush()?;
        Ok(())
    }

    /// [`write_csv`](Self::write_csv) to a file.
    pub fn write_csv_file<P: AsRef<Path>>(&self, path: P) -> ReportResult<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

/// Wide table: one line per x value, one column per group value.
impl fmt::Display for GridSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self.group_values();
        let headers: Vec<String> =
            groups.iter().map(|g| format!("{}={}", self.group_name, g)).collect();
        let x_width = self.x_name.len().max(8);
        write!(f, "{:<x_width$}", self.x_name)?;
        for h in &headers {
            write!(f, "  {h:>w$}", w = h.len().max(8))?;
        }
        writeln!(f)?;
        for x in self.x_values() {
            write!(f, "{x:<x_width$}")?;
            for (g, h) in groups.iter().zip(&headers) {
                let w = h.len().max(8);
                match self.probability(x, *g) {
                    Some(p) => write!(f, "  {p:>w$.4}")?,
                    None => write!(f, "  {:>w$}", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn distinct(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut v: Vec<f64> = values.collect();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v
}
