//! L-BFGS optimization driver.
//!
//! Runs a bounded quasi-Newton minimization of the weighted residual cost:
//! the L-BFGS solver searches an unconstrained internal space and the
//! problem's bound transforms (see [`crate::optim::transformation`]) map
//! every candidate into the admissible box. Gradients are approximated by
//! central finite differences.
//!
//! The driver is a pure function of its inputs; it keeps no state across
//! invocations, so external collaborators (e.g. Monte Carlo resampling) may
//! call it repeatedly and concurrently with perturbed problems.

use argmin::core::observers::ObserverMode;
use argmin::core::{Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS as ArgminLBFGS;
use argmin_observer_slog::SlogLogger;

use crate::model::KineticModel;
use crate::optim::{FitReport, InitialGuess, OptimizeError, Problem};

/// Bounded L-BFGS driver configuration.
pub struct LBFGS {
    /// History size for the limited-memory Hessian approximation.
    pub m: usize,
    /// Maximum number of iterations before stopping.
    pub max_iters: u64,
    /// Target cost value for early convergence.
    pub target_cost: f64,
    /// Line search parameter c1 (sufficient decrease condition).
    pub c1: f64,
    /// Line search parameter c2 (curvature condition).
    pub c2: f64,
}

impl LBFGS {
    pub fn new(c1: f64, c2: f64, m: usize, max_iters: u64, target_cost: f64) -> Self {
        Self {
            c1,
            c2,
            m,
            max_iters,
            target_cost,
        }
    }

    /// Minimizes the problem's cost starting from `initial`.
    ///
    /// Structural mismatches (wrong initial-guess length) fail before the
    /// solver runs. Solver non-convergence within `max_iters` is NOT an
    /// error; it is reported through [`FitReport::converged`]. Only
    /// irrecoverable numeric failures inside the solver are raised.
    pub fn optimize<M>(
        &self,
        problem: &Problem<M>,
        initial: &InitialGuess,
    ) -> Result<FitReport, OptimizeError>
    where
        M: KineticModel + Clone,
    {
        if initial.len() != problem.n_params() {
            return Err(OptimizeError::InitialGuessLengthError {
                expected: problem.n_params(),
                found: initial.len(),
            });
        }

        log::debug!(
            "starting L-BFGS fit of {} ({} parameters, {} timepoints)",
            problem.model().name(),
            problem.n_params(),
            problem.dataset().n_timepoints(),
        );

        let internal_init = problem.unconstrain(initial.values());
        let linesearch = MoreThuenteLineSearch::new()
            .with_c(self.c1, self.c2)
            .map_err(OptimizeError::ArgMinError)?;
        let solver = ArgminLBFGS::new(linesearch, self.m);

        let res = Executor::new(problem.clone(), solver)
            .configure(|state| {
                state
                    .param(internal_init)
                    .max_iters(self.max_iters)
                    .target_cost(self.target_cost)
            })
            .add_observer(SlogLogger::term(), ObserverMode::NewBest)
            .run()
            .map_err(OptimizeError::ArgMinError)?;

        let state = &res.state;
        let best_internal = state
            .get_best_param()
            .cloned()
            .ok_or(OptimizeError::NoSolution)?;
        let best = problem.constrain(&best_internal);

        let converged = matches!(
            state.termination_status,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );
        let cost_evaluations = state
            .get_func_counts()
            .get("cost_count")
            .copied()
            .unwrap_or_default();

        Ok(FitReport::new(
            problem,
            initial.ids(),
            best,
            state.get_best_cost(),
            converged,
            state.get_iter(),
            cost_evaluations,
        ))
    }
}

/// Builder for configuring and constructing [`LBFGS`] instances.
pub struct LBFGSBuilder {
    c1: f64,
    c2: f64,
    m: usize,
    max_iters: u64,
    target_cost: f64,
}

impl LBFGSBuilder {
    /// Sets the line search parameters (`0 < c1 < c2 < 1`).
    pub fn linesearch(mut self, c1: f64, c2: f64) -> Self {
        self.c1 = c1;
        self.c2 = c2;
        self
    }

    /// Sets the limited-memory history size.
    pub fn history(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the target cost value for early convergence.
    pub fn target_cost(mut self, target_cost: f64) -> Self {
        self.target_cost = target_cost;
        self
    }

    pub fn build(self) -> LBFGS {
        LBFGS {
            c1: self.c1,
            c2: self.c2,
            m: self.m,
            max_iters: self.max_iters,
            target_cost: self.target_cost,
        }
    }
}

impl Default for LBFGSBuilder {
    /// Default settings: c1 = 1e-4, c2 = 0.9, m = 5, max_iters = 500,
    /// target_cost = 1e-12.
    fn default() -> Self {
        Self {
            c1: 1e-4,
            c2: 0.9,
            m: 5,
            max_iters: 500,
            target_cost: 1e-12,
        }
    }
}
