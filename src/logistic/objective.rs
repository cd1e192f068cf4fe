//! The logistic cost as an optimizer [`Objective`].
//!
//! [`LogisticObjective`] forwards to [`cost`](crate::logistic::cost::cost)
//! and [`gradient`](crate::logistic::cost::gradient); the design matrix and
//! labels travel as fixed data in [`DesignData`] and are never optimized.
use crate::optimization::{
    errors::{OptError, OptResult},
    optimizer::{Cost, Grad, Objective, Theta},
};
use crate::logistic::cost::{cost, gradient};
use ndarray::{Array1, Array2};

/// Design matrix `X` (`n × k`, bias first) and labels `y` (length `n`).
#[derive(Debug, Clone, PartialEq)]
pub struct DesignData {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
}

impl DesignData {
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Self {
        Self { x, y }
    }

    pub fn n_obs(&self) -> usize {
        self.y.len()
    }
}

/// Mean negative log-likelihood of a binary logistic model.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogisticObjective;

impl Objective for LogisticObjective {
    type Data = DesignData;

    fn cost(&self, theta: &Theta, data: &DesignData) -> OptResult<Cost> {
        Ok(cost(theta.view(), data.x.view(), data.y.view()))
    }

    /// Shape and label checks, run once before optimization.
    ///
    /// # Errors
    /// - [`OptError::EmptyData`] with no rows.
    /// - [`OptError::DataLengthMismatch`] if `X` and `y` disagree.
    /// - [`OptError::ThetaLengthMismatch`] if `θ` does not match `X`'s width.
    /// - [`OptError::InvalidLabel`] for a label other than 0 or 1.
    fn check(&self, theta: &Theta, data: &DesignData) -> OptResult<()> {
        let (rows, cols) = data.x.dim();
        if rows == 0 {
            return Err(OptError::EmptyData);
        }
        if rows != data.y.len() {
            return Err(OptError::DataLengthMismatch { rows, labels: data.y.len() });
        }
        if theta.len() != cols {
            return Err(OptError::ThetaLengthMismatch { expected: cols, actual: theta.len() });
        }
        if let Some((index, &value)) =
            data.y.iter().enumerate().find(|(_, &v)| v != 0.0 && v != 1.0)
        {
            return Err(OptError::InvalidLabel { index, value });
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &DesignData) -> OptResult<Grad> {
        Ok(gradient(theta.view(), data.x.view(), data.y.view()))
    }
}
