//! High-level entry point for minimizing a user-provided [`Objective`].
//!
//! Picks the solver (L-BFGS or steepest descent) and its line search
//! (Hager–Zhang or More–Thuente) from the options, wraps the objective in an
//! [`ArgMinAdapter`], and delegates the run to [`run_solver`].
use crate::optimization::{
    errors::OptResult,
    optimizer::{
        adapter::{ArgMinAdapter, EvalDiagnostics},
        builders::{
            build_lbfgs_hager_zhang, build_lbfgs_more_thuente, build_steepest_hager_zhang,
            build_steepest_more_thuente,
        },
        run::run_solver,
        traits::{LineSearcher, Objective, OptimOutcome, OptimizerOptions, SolverKind},
        types::Theta,
        validation::validate_theta0,
    },
};

/// Minimize an objective `c(θ)` starting from `theta0`.
///
/// # Behavior
/// - Rejects a non-finite starting point, then calls `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an [`ArgMinAdapter`]; `data` is fixed auxiliary
///   input and is never optimized over.
/// - Builds the solver selected by `opts.solver` / `opts.line_searcher`.
/// - Runs it via [`run_solver`] and returns the [`OptimOutcome`].
///
/// Non-convergence is reported on the outcome (`converged == false`), not as
/// an error. That includes a line search aborting on a non-finite trial
/// value; the outcome then holds the lowest finite cost evaluated.
///
/// # Errors
/// - Propagates any error from `validate_theta0` or `f.check`.
/// - Propagates builder errors (invalid tolerances rejected by argmin).
/// - Propagates other runtime errors from argmin and errors raised by the
///   objective itself.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use logit_mle::optimization::{
///     errors::OptResult,
///     optimizer::{minimize, Objective, OptimizerOptions, Theta},
/// };
///
/// struct Bowl;
/// impl Objective for Bowl {
///     type Data = ();
///     fn cost(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.1, -0.2, 0.3], &(), &OptimizerOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), logit_mle::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &OptimizerOptions,
) -> OptResult<OptimOutcome> {
    validate_theta0(&theta0)?;
    f.check(&theta0, data)?;
    let diagnostics = EvalDiagnostics::default();
    let problem = ArgMinAdapter::new(f, data, &diagnostics);
    match (opts.solver, opts.line_searcher) {
        (SolverKind::Lbfgs, LineSearcher::MoreThuente) => {
            let solver = build_lbfgs_more_thuente(opts)?;
            run_solver(theta0, opts, problem, solver)
        }
        (SolverKind::Lbfgs, LineSearcher::HagerZhang) => {
            let solver = build_lbfgs_hager_zhang(opts)?;
            run_solver(theta0, opts, problem, solver)
        }
        (SolverKind::SteepestDescent, LineSearcher::MoreThuente) => {
            run_solver(theta0, opts, problem, build_steepest_more_thuente())
        }
        (SolverKind::SteepestDescent, LineSearcher::HagerZhang) => {
            run_solver(theta0, opts, problem, build_steepest_hager_zhang())
        }
    }
}
