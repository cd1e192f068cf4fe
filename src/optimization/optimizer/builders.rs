//! optimizer::builders: solver construction helpers.
//!
//! Small builders that hide argmin’s generic wiring: L-BFGS or steepest
//! descent, each with Hager–Zhang or More–Thuente line search. Tolerances from
//! [`OptimizerOptions`] are applied here; the initial parameter vector and
//! `max_iters` are runtime concerns left to [`run_solver`](super::run::run_solver).
use argmin::solver::{gradientdescent::SteepestDescent, quasinewton::LBFGS};

use crate::optimization::{
    errors::OptResult,
    optimizer::{
        traits::OptimizerOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS,
            SteepestHagerZhang, SteepestMoreThuente, Theta, DEFAULT_LBFGS_MEM,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` (or [`DEFAULT_LBFGS_MEM`]) as history size and wires
/// `tol_grad` / `tol_cost` through [`configure_lbfgs`].
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) if argmin rejects a tolerance.
pub fn build_lbfgs_hager_zhang(opts: &OptimizerOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) if argmin rejects a tolerance.
pub fn build_lbfgs_more_thuente(opts: &OptimizerOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct steepest descent with Hager–Zhang line search.
///
/// Steepest descent only stops on `max_iters`; tolerances do not apply.
pub fn build_steepest_hager_zhang() -> SteepestHagerZhang {
    SteepestDescent::new(HagerZhangLS::new())
}

/// Construct steepest descent with More–Thuente line search.
pub fn build_steepest_more_thuente() -> SteepestMoreThuente {
    SteepestDescent::new(MoreThuenteLS::new())
}

/// Apply optional gradient / cost-change tolerances to an L-BFGS solver.
///
/// When a tolerance is `None` the corresponding `with_tolerance_*` method is
/// not called and argmin’s default stays in effect.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) if argmin rejects a value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &OptimizerOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::optimizer::traits::{LineSearcher, SolverKind, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of L-BFGS with both line searches, default and explicit
    //   memory.
    // - Application (and absence) of tolerances via `configure_lbfgs`.
    //
    // They intentionally DO NOT cover:
    // - Running the solvers (see `api`).
    // -------------------------------------------------------------------------

    fn opts(line_searcher: LineSearcher, lbfgs_mem: Option<usize>) -> OptimizerOptions {
        let tols = Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("valid tolerances");
        OptimizerOptions::new(tols, SolverKind::Lbfgs, line_searcher, false, lbfgs_mem)
            .expect("valid options")
    }

    #[test]
    // Purpose
    // -------
    // Both L-BFGS builders succeed with default and explicit memory.
    //
    // Given
    // -----
    // - Valid tolerances; `lbfgs_mem` of `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - Every builder call returns `Ok(_)`.
    fn lbfgs_builders_accept_default_and_explicit_memory() {
        assert!(build_lbfgs_hager_zhang(&opts(LineSearcher::HagerZhang, None)).is_ok());
        assert!(build_lbfgs_hager_zhang(&opts(LineSearcher::HagerZhang, Some(11))).is_ok());
        assert!(build_lbfgs_more_thuente(&opts(LineSearcher::MoreThuente, None)).is_ok());
        assert!(build_lbfgs_more_thuente(&opts(LineSearcher::MoreThuente, Some(3))).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` leaves argmin defaults in place when no tolerances
    // are given.
    //
    // Given
    // -----
    // - Tolerances with only `max_iter`.
    //
    // Expect
    // ------
    // - `configure_lbfgs` returns `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("valid tolerances");
        let opts =
            OptimizerOptions::new(tols, SolverKind::Lbfgs, LineSearcher::MoreThuente, false, None)
                .expect("valid options");

        assert!(configure_lbfgs(raw, &opts).is_ok());
    }
}
