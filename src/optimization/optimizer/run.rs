//! Execution helper that runs an argmin solver on an [`Objective`] and returns
//! a crate-friendly [`OptimOutcome`].
//!
//! A line search that aborts on a NaN/∞ trial value (argmin reports this as
//! `ConditionViolated` or `PotentialBug`) ends the run without converging;
//! it is not an error. The outcome is then built from the lowest finite cost
//! evaluated and the last iteration the [`IterationTrace`] observer saw.
use std::sync::{Arc, Mutex};

use crate::optimization::{
    errors::{OptError, OptResult},
    optimizer::{
        adapter::{ArgMinAdapter, EvalDiagnostics},
        traits::{Objective, OptimOutcome, OptimizerOptions},
        types::{FnEvalMap, Grad, Theta},
    },
};
use argmin::core::{
    observers::{Observe, ObserverMode},
    CostFunction, Error, Executor, Gradient, IterState, State, TerminationReason,
    TerminationStatus, KV,
};
use argmin_math::ArgminL2Norm;
use tracing::{debug, warn};

type SolverState = IterState<Theta, Grad, (), (), (), f64>;

/// Run an argmin solver for an objective problem.
///
/// Shared runner for every solver/line-search combination. It wires up the
/// problem, the solver, the initial parameter `theta0`, the optional slog
/// observer (behind the `obs_slog` feature, when `opts.verbose`), and the
/// optional `max_iters`, then converts the final state into
/// [`OptimOutcome`].
///
/// # Type Parameters
/// - `F`: objective implementing [`Objective`].
/// - `S`: any argmin solver over `ArgMinAdapter<'a, F>` whose state is
///   `IterState<Theta, Grad, (), (), (), f64>`.
///
/// A line-search abort is turned into a non-converged outcome whose status
/// carries the argmin message (see the module docs).
///
/// # Errors
/// - Propagates other argmin runtime errors and objective errors via
///   `From<argmin::core::Error>`.
/// - [`OptError::MissingThetaHat`] if the final state carries no parameter,
///   or a line search aborted before any finite cost was evaluated.
pub fn run_solver<'a, F, S>(
    theta0: Theta, opts: &OptimizerOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: Objective,
    S: argmin::core::Solver<ArgMinAdapter<'a, F>, SolverState> + Send + 'static,
{
    if opts.verbose {
        log_initial_state(&theta0, &problem);
    }
    let diagnostics = problem.diagnostics;
    let trace = IterationTrace::default();
    let mut optimizer = Executor::new(problem, solver)
        .configure(|state| state.param(theta0))
        .add_observer(trace.clone(), ObserverMode::Always);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = match optimizer.run() {
        Ok(res) => res.state().clone(),
        Err(e) => return recover_aborted_run(OptError::from(e), diagnostics, &trace),
    };
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let best_param = result.take_best_param();
    let value = if best_param.is_some() { result.get_best_cost() } else { result.get_cost() };
    OptimOutcome::new(
        best_param,
        result.take_param(),
        value,
        termination,
        iterations,
        function_counts,
        grad,
        diagnostics.total(),
    )
}

/// Progress recorded by [`IterationTrace`] after each completed iteration.
#[derive(Debug, Clone, Default)]
struct TraceSnapshot {
    iterations: u64,
    fn_evals: FnEvalMap,
}

/// Observer that keeps the iteration count and evaluation counters of the
/// last completed iteration. argmin drops its state when a solver errors,
/// so this is the only record left after an aborted line search.
#[derive(Debug, Clone, Default)]
struct IterationTrace(Arc<Mutex<TraceSnapshot>>);

impl IterationTrace {
    fn snapshot(&self) -> TraceSnapshot {
        self.0.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Observe<SolverState> for IterationTrace {
    fn observe_iter(&mut self, state: &SolverState, _kv: &KV) -> Result<(), Error> {
        let mut slot =
            self.0.lock().map_err(|_| Error::msg("iteration trace lock poisoned"))?;
        slot.iterations = state.get_iter() + 1;
        slot.fn_evals = state.get_func_counts().clone();
        Ok(())
    }
}

// ---- Helper Methods ----

/// Turn a line-search abort into a non-converged [`OptimOutcome`]; any other
/// error is returned unchanged.
fn recover_aborted_run(
    err: OptError, diagnostics: &EvalDiagnostics, trace: &IterationTrace,
) -> OptResult<OptimOutcome> {
    if !matches!(err, OptError::ConditionViolated { .. } | OptError::PotentialBug { .. }) {
        return Err(err);
    }
    let (theta, value) = diagnostics.best_finite().ok_or(OptError::MissingThetaHat)?;
    let TraceSnapshot { iterations, fn_evals } = trace.snapshot();
    warn!(error = %err, iterations, value, "line search aborted; keeping the best finite point");
    OptimOutcome::new(
        Some(theta),
        None,
        value,
        TerminationStatus::Terminated(TerminationReason::SolverExit(err.to_string())),
        iterations,
        fn_evals,
        None,
        diagnostics.total(),
    )
}

fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>)
where
    F: Objective,
{
    let c0 = problem.cost(theta0).ok();
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    debug!(cost = ?c0, grad_norm = ?g0n, dim = theta0.len(), "optimizer initial state");
}
