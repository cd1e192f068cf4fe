//! Adapter that exposes a user [`Objective`] as an argmin problem.
//!
//! The objective is minimized as-is: `CostFunction::cost` forwards `c(θ)` and
//! `Gradient::gradient` forwards the analytic `∇c(θ)` when the objective has
//! one. Otherwise the cost closure is finite-differenced (central first,
//! forward as fallback).
//!
//! Non-finite costs and gradients are *not* errors here. They are counted in
//! an [`EvalDiagnostics`] shared with the runner and passed on to the solver
//! unchanged. The diagnostics also keep the lowest finite cost seen, which
//! the runner falls back on when a line search aborts.
use std::cell::{Cell, RefCell};

use crate::optimization::{
    errors::OptError,
    optimizer::{
        finite_diff::run_fd_diff,
        traits::Objective,
        types::{Cost, Grad, Theta},
        validation::{validate_grad, validate_grad_dim},
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Counters for degenerate evaluations observed during one optimizer run,
/// plus the best finite point evaluated so far.
#[derive(Debug, Default)]
pub struct EvalDiagnostics {
    non_finite_costs: Cell<usize>,
    non_finite_grads: Cell<usize>,
    best_finite: RefCell<Option<(Theta, Cost)>>,
}

impl EvalDiagnostics {
    pub fn non_finite_costs(&self) -> usize {
        self.non_finite_costs.get()
    }

    pub fn non_finite_grads(&self) -> usize {
        self.non_finite_grads.get()
    }

    pub fn total(&self) -> usize {
        self.non_finite_costs() + self.non_finite_grads()
    }

    /// Lowest finite cost evaluated during the run and where it was
    /// evaluated, or `None` if every evaluation was non-finite.
    pub fn best_finite(&self) -> Option<(Theta, Cost)> {
        self.best_finite.borrow().clone()
    }

    fn record_cost(&self, theta: &Theta, value: Cost) {
        if !value.is_finite() {
            self.non_finite_costs.set(self.non_finite_costs.get() + 1);
            return;
        }
        let mut best = self.best_finite.borrow_mut();
        if best.as_ref().map_or(true, |(_, c)| value < *c) {
            *best = Some((theta.clone(), value));
        }
    }

    fn record_grad(&self, grad: &Grad) {
        if grad.iter().any(|v| !v.is_finite()) {
            self.non_finite_grads.set(self.non_finite_grads.get() + 1);
        }
    }
}

/// Bridges a user [`Objective`] to argmin's `CostFunction` and `Gradient`.
#[derive(Debug)]
pub struct ArgMinAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
    pub diagnostics: &'a EvalDiagnostics,
}

impl<'a, F: Objective> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `c(θ)`, recording non-finite results.
    ///
    /// # Errors
    /// Propagates any `OptError` from the user’s `cost` via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.cost(theta, self.data)?;
        self.diagnostics.record_cost(theta, output);
        Ok(output)
    }
}

impl<'a, F: Objective> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the objective implements `grad(θ, data)`, its length is checked
    ///   and the vector is returned unchanged (non-finite entries are only
    ///   counted).
    /// - Otherwise a finite-difference gradient of the cost is computed:
    ///   central differences first; if a cost evaluation failed (captured in
    ///   `closure_err`) or the result is non-finite, retry once with forward
    ///   differences.
    ///
    /// The FD closure must return `f64`, so it cannot use `?`; the first error
    /// is parked in `closure_err` and the closure returns `NaN`.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (other than `GradientNotImplemented`).
    /// - Propagates any error raised by cost evaluations performed during FD.
    /// - Returns a dimension error if the gradient has the wrong length.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad_dim(&g, dim)?;
                self.diagnostics.record_grad(&g);
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.f.cost(theta, self.data) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e.into());
                            }
                            f64::NAN
                        }
                    }
                };
                let central = theta.central_diff(&cost_func);
                let usable = closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok();
                let fd_grad = if usable {
                    central
                } else {
                    match run_fd_diff(theta, &cost_func, &closure_err) {
                        Ok(g) => g,
                        Err(OptError::InvalidGradient { .. }) => {
                            closure_err.replace(None);
                            theta.forward_diff(&cost_func)
                        }
                        Err(e) => return Err(e.into()),
                    }
                };
                self.diagnostics.record_grad(&fd_grad);
                Ok(fd_grad)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: Objective> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over an objective, its data, and a
    /// diagnostics sink owned by the caller.
    pub fn new(f: &'a F, data: &'a F::Data, diagnostics: &'a EvalDiagnostics) -> Self {
        Self { f, data, diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pass-through of analytic gradients and costs (no sign flips).
    // - The finite-difference fallback when no analytic gradient exists.
    // - Counting of non-finite evaluations without raising errors.
    // -------------------------------------------------------------------------

    struct Quadratic;

    impl Objective for Quadratic {
        type Data = ();

        fn cost(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            Ok(theta.dot(theta))
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    struct NanCost;

    impl Objective for NanCost {
        type Data = ();

        fn cost(&self, _: &Theta, _: &()) -> OptResult<Cost> {
            Ok(f64::NAN)
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(theta.mapv(|_| f64::INFINITY))
        }
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient the adapter finite-differences the cost.
    //
    // Given
    // -----
    // - `c(θ) = θᵀθ` at `θ = [1, -2]`.
    //
    // Expect
    // ------
    // - Gradient ≈ `2θ = [2, -4]`, cost returned unchanged.
    fn finite_difference_fallback_matches_quadratic_gradient() {
        // Arrange
        let diagnostics = EvalDiagnostics::default();
        let adapter = ArgMinAdapter::new(&Quadratic, &(), &diagnostics);
        let theta = array![1.0, -2.0];

        // Act
        let cost = adapter.cost(&theta).unwrap();
        let grad = adapter.gradient(&theta).unwrap();

        // Assert
        assert_eq!(cost, 5.0);
        assert!((grad[0] - 2.0).abs() < 1e-5);
        assert!((grad[1] + 4.0).abs() < 1e-5);
        assert_eq!(diagnostics.total(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Degenerate evaluations are counted and forwarded, not turned into
    // errors.
    //
    // Given
    // -----
    // - An objective whose cost is NaN and whose gradient is +∞.
    //
    // Expect
    // ------
    // - Both calls succeed; one non-finite cost and one non-finite
    //   gradient are recorded.
    fn non_finite_evaluations_are_counted_not_rejected() {
        // Arrange
        let diagnostics = EvalDiagnostics::default();
        let adapter = ArgMinAdapter::new(&NanCost, &(), &diagnostics);
        let theta = array![0.0, 0.0];

        // Act
        let cost = adapter.cost(&theta).expect("NaN cost is passed through");
        let grad = adapter.gradient(&theta).expect("infinite gradient is passed through");

        // Assert
        assert!(cost.is_nan());
        assert!(grad.iter().all(|g| g.is_infinite()));
        assert_eq!(diagnostics.non_finite_costs(), 1);
        assert_eq!(diagnostics.non_finite_grads(), 1);
        assert!(diagnostics.best_finite().is_none());
    }

    #[test]
    // Purpose
    // -------
    // The diagnostics remember the lowest finite cost and where it was
    // evaluated, skipping non-finite values.
    //
    // Given
    // -----
    // - `c(θ) = θᵀθ` evaluated at `[2, 0]`, `[0.5, 0]`, `[1, 1]`.
    // - A NaN cost recorded afterwards.
    //
    // Expect
    // ------
    // - Best point `[0.5, 0]` with cost `0.25`; one non-finite cost.
    fn best_finite_tracks_lowest_cost() {
        // Arrange
        let diagnostics = EvalDiagnostics::default();
        let adapter = ArgMinAdapter::new(&Quadratic, &(), &diagnostics);

        // Act
        for theta in [array![2.0, 0.0], array![0.5, 0.0], array![1.0, 1.0]] {
            adapter.cost(&theta).unwrap();
        }
        diagnostics.record_cost(&array![0.0, 0.0], f64::NAN);

        // Assert
        let (theta, cost) = diagnostics.best_finite().expect("finite evaluations were seen");
        assert_eq!(theta, array![0.5, 0.0]);
        assert_eq!(cost, 0.25);
        assert_eq!(diagnostics.non_finite_costs(), 1);
    }
}
