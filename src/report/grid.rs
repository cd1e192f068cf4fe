//! Prediction grids: every combination of a few chosen predictor values.
//!
//! An axis is parsed from `NAME=v1,v2,...` (explicit values) or
//! `NAME=start:stop:step` (inclusive arithmetic range). The grid is the
//! cartesian product of its axes with the first axis varying fastest.
use std::str::FromStr;

use crate::{
    data::FeatureTable,
    report::errors::{ReportError, ReportResult},
};
use ndarray::Array2;

/// Slack used when deciding whether `stop` is reached by a range.
const RANGE_EPS: f64 = 1e-9;

/// Most values a `start:stop:step` range may produce.
pub const MAX_AXIS_POINTS: usize = 10_000;

/// Most points a whole grid may have.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// One named predictor with the values it takes in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    name: String,
    values: Vec<f64>,
}

impl GridAxis {
    /// # Errors
    /// - [`ReportError::EmptyAxis`] if `values` is empty.
    /// - [`ReportError::InvalidAxis`] for an empty name or non-finite value.
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>) -> ReportResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ReportError::InvalidAxis {
                axis: name,
                reason: "axis name is empty".into(),
            });
        }
        if values.is_empty() {
            return Err(ReportError::EmptyAxis { name });
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite()) {
            return Err(ReportError::InvalidAxis {
                axis: name,
                reason: format!("non-finite value {v}"),
            });
        }
        Ok(Self { name, values })
    }

    /// `start, start + step, …` up to and including `stop`.
    ///
    /// # Errors
    /// - [`ReportError::InvalidAxis`] unless `step > 0` and `stop ≥ start`,
    ///   or if the range has more than [`MAX_AXIS_POINTS`] values.
    pub fn range<S: Into<String>>(name: S, start: f64, stop: f64, step: f64) -> ReportResult<Self> {
        let name = name.into();
        if !(step > 0.0) || !(stop >= start) || !start.is_finite() || !stop.is_finite() {
            return Err(ReportError::InvalidAxis {
                axis: format!("{name}={start}:{stop}:{step}"),
                reason: "range needs finite start <= stop and step > 0".into(),
            });
        }
        let steps = ((stop - start) / step + RANGE_EPS).floor();
        if !(steps < MAX_AXIS_POINTS as f64) {
            return Err(ReportError::InvalidAxis {
                axis: format!("{name}={start}:{stop}:{step}"),
                reason: format!("range has more than {MAX_AXIS_POINTS} values"),
            });
        }
        let count = steps as usize + 1;
        let values = (0..count).map(|i| start + i as f64 * step).collect();
        Self::new(name, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromStr for GridAxis {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ReportError::InvalidAxis {
            axis: s.to_string(),
            reason: reason.to_string(),
        };
        let (name, rhs) = s.split_once('=').ok_or_else(|| invalid("expected NAME=VALUES"))?;
        let name = name.trim();
        let parse = |t: &str| t.trim().parse::<f64>().map_err(|_| invalid("not a number"));
        if rhs.contains(':') {
            let parts: Vec<&str> = rhs.split(':').collect();
            if parts.len() != 3 {
                return Err(invalid("range must be start:stop:step"));
            }
            Self::range(name, parse(parts[0])?, parse(parts[1])?, parse(parts[2])?)
        } else {
            let values = rhs
                .split(',')
                .filter(|t| !t.trim().is_empty())
                .map(parse)
                .collect::<ReportResult<Vec<f64>>>()?;
            Self::new(name, values)
        }
    }
}

/// Cartesian product of [`GridAxis`] values.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionGrid {
    axes: Vec<GridAxis>,
}

impl PredictionGrid {
    /// # Errors
    /// - [`ReportError::EmptySummary`] with no axes.
    /// - [`ReportError::DuplicateAxis`] for repeated names.
    /// - [`ReportError::GridTooLarge`] past [`MAX_GRID_POINTS`] points.
    pub fn new(axes: Vec<GridAxis>) -> ReportResult<Self> {
        if axes.is_empty() {
            return Err(ReportError::EmptySummary);
        }
        let points = axes.iter().try_fold(1usize, |acc, a| acc.checked_mul(a.len()));
        if points.map_or(true, |p| p > MAX_GRID_POINTS) {
            return Err(ReportError::GridTooLarge { limit: MAX_GRID_POINTS });
        }
        for (i, axis) in axes.iter().enumerate() {
            if axes[..i].iter().any(|a| a.name == axis.name) {
                return Err(ReportError::DuplicateAxis { name: axis.name.clone() });
            }
        }
        Ok(Self { axes })
    }

    pub fn axes(&self) -> &[GridAxis] {
        &self.axes
    }

    pub fn axis(&self, name: &str) -> Option<&GridAxis> {
        self.axes.iter().find(|a| a.name == name)
    }

    /// Number of grid points (product of axis lengths).
    pub fn n_points(&self) -> usize {
        self.axes.iter().map(GridAxis::len).product()
    }

    /// All grid points as a table, one column per axis in axis order. Row
    /// `r` takes value `(r / stride_j) % len_j` on axis `j`, where
    /// `stride_j` is the product of the lengths of the axes before it.
    pub fn expand(&self) -> ReportResult<FeatureTable> {
        let n = self.n_points();
        let mut values = Array2::<f64>::zeros((n, self.axes.len()));
        let mut stride = 1;
        for (j, axis) in self.axes.iter().enumerate() {
            for r in 0..n {
                values[[r, j]] = axis.values[(r / stride) % axis.len()];
            }
            stride *= axis.len();
        }
        let names = self.axes.iter().map(|a| a.name.clone()).collect();
        Ok(FeatureTable::new(names, values)?)
    }

    /// [`expand`](Self::expand), with columns ordered as `features` (the
    /// fitted feature order). Axes not named in `features` are dropped.
    ///
    /// # Errors
    /// - [`ReportError::MissingAxis`] if a feature has no axis.
    pub fn to_feature_table<S: AsRef<str>>(&self, features: &[S]) -> ReportResult<FeatureTable> {
        if let Some(f) = features.iter().find(|f| self.axis(f.as_ref()).is_none()) {
            return Err(ReportError::MissingAxis { feature: f.as_ref().to_string() });
        }
        Ok(self.expand()?.select(features)?)
    }
}
