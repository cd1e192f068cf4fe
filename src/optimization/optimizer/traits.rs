//! Public API surface for objective minimization.
//!
//! - [`Objective`]: trait users implement for their model.
//! - [`OptimizerOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`SolverKind`] and [`LineSearcher`]: which argmin solver runs.
//! - [`OptimOutcome`]: normalized result returned by [`minimize`](super::minimize).
//!
//! Convention: the optimizer *minimizes* `c(θ)`. A model that thinks in
//! log-likelihoods hands in the negative (average) log-likelihood.
use crate::optimization::{
    errors::{OptError, OptResult},
    optimizer::{
        types::{Cost, FnEvalMap, Grad, Theta, DEFAULT_MAX_ITER},
        validation::{verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;
use tracing::warn;

/// User-implemented objective interface.
///
/// - `type Data`: fixed auxiliary data carried into `cost`/`grad`/`check`
///   (never optimized over).
///
/// Required:
/// - `cost(&Theta, &Data) -> OptResult<Cost>`: evaluate `c(θ)`. A
///   non-finite value is a legitimate result, not an error; the optimizer
///   counts it and keeps going.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject obviously invalid
///   `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇c(θ)`.
///   If not implemented, finite differences of `cost` are used.
pub trait Objective {
    type Data: 'static;

    // Required methods
    fn cost(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the solver.
///
/// Parses case-insensitively from `"MoreThuente"` / `"HagerZhang"`; unknown
/// names return `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Which gradient-based solver drives the minimization.
///
/// - `Lbfgs`: limited-memory quasi-Newton; stops on `tol_grad`, `tol_cost`,
///   or `max_iter`.
/// - `SteepestDescent`: plain gradient descent with line search; stops on
///   `max_iter` only, so that bound is mandatory.
///
/// Parses case-insensitively from `"lbfgs"` or `"steepest_descent"`
/// (also `"steepestdescent"`, `"gd"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    Lbfgs,
    SteepestDescent,
}

impl SolverKind {
    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::Lbfgs => "L-BFGS",
            SolverKind::SteepestDescent => "SteepestDescent",
        }
    }
}

impl FromStr for SolverKind {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "lbfgs" | "l_bfgs" => Ok(SolverKind::Lbfgs),
            "steepest_descent" | "steepestdescent" | "gd" => Ok(SolverKind::SteepestDescent),
            _ => Err(OptError::InvalidSolver {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'lbfgs' or 'steepest_descent'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Default: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 500`,
/// L-BFGS with More–Thuente line search, memory 7, not verbose.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerOptions {
    pub tols: Tolerances,
    pub solver: SolverKind,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl OptimizerOptions {
    /// Create a validated set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    /// - [`OptError::MissingMaxIter`] for steepest descent without `max_iter`.
    pub fn new(
        tols: Tolerances, solver: SolverKind, line_searcher: LineSearcher, verbose: bool,
        lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        if solver == SolverKind::SteepestDescent && tols.max_iter.is_none() {
            return Err(OptError::MissingMaxIter { solver: solver.name() });
        }
        Ok(Self { tols, solver, line_searcher, verbose, lbfgs_mem })
    }

    /// Same options with a different iteration budget.
    pub fn with_max_iter(&self, max_iter: usize) -> OptResult<Self> {
        let tols = Tolerances::new(self.tols.tol_grad, self.tols.tol_cost, Some(max_iter))?;
        Self::new(tols, self.solver, self.line_searcher, self.verbose, self.lbfgs_mem)
    }
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(DEFAULT_MAX_ITER) },
            solver: SolverKind::Lbfgs,
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// At least one of the three must be provided (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `minimize`.
///
/// - `theta_hat`: best parameter vector found (last iterate when no best
///   was recorded). Not validated: it may hold non-finite values when the
///   objective degenerates.
/// - `value`: objective value `c(θ̂)`.
/// - `converged`: `true` only if the solver stopped on its own convergence
///   test (or a target cost); hitting `max_iter` is *not* convergence.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by argmin.
/// - `grad_norm`: norm of the last available gradient, if present.
/// - `non_finite_evals`: number of cost/gradient evaluations that produced
///   NaN or ±∞ during the run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
    pub non_finite_evals: usize,
}

impl OptimOutcome {
    /// Build an [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - picks `best_param`, falling back to `last_param`;
    /// - maps `TerminationStatus` into `(converged, status)`;
    /// - computes `grad_norm` if a gradient was provided;
    /// - emits warn events for non-convergence, non-finite estimates, and
    ///   non-finite evaluations. None of these are errors.
    ///
    /// # Errors
    /// - [`OptError::MissingThetaHat`] if the solver produced no parameter.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        best_param: Option<Theta>, last_param: Option<Theta>, value: f64,
        termination: TerminationStatus, iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
        non_finite_evals: usize,
    ) -> OptResult<Self> {
        let theta_hat = best_param.or(last_param).ok_or(OptError::MissingThetaHat)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        if !converged {
            warn!(status = %status, iterations, "optimizer stopped without converging");
        }
        if let Some(index) = theta_hat.iter().position(|v| !v.is_finite()) {
            warn!(index, value = theta_hat[index], "optimizer returned non-finite parameters");
        }
        if non_finite_evals > 0 {
            warn!(non_finite_evals, "objective produced non-finite values during the run");
        }
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm,
            non_finite_evals,
        })
    }
}
