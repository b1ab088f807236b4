//! Fit result reporting.

use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::model::KineticModel;

use super::problem::Problem;

/// Immutable result of one optimizer invocation.
///
/// Holds the fitted parameter vector with its identifiers, the final cost,
/// whether the solver converged within its internal limits, the iteration
/// and cost-evaluation counts, and the trajectory simulated from the fitted
/// parameters for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    /// Fitted parameter values, same order as `ids`.
    pub params: Array1<f64>,
    /// Parameter identifiers (`X_0`, `mu`, `<met>_q`, `<met>_M0`, ...).
    pub ids: Vec<String>,
    /// Final weighted sum-of-squares cost.
    pub cost: f64,
    /// Whether the solver reached a convergence criterion (as opposed to
    /// running out of iterations).
    pub converged: bool,
    /// Solver iterations performed.
    pub iterations: u64,
    /// Cost function evaluations performed.
    pub cost_evaluations: u64,
    /// Species matrix simulated from the fitted parameters.
    pub fitted: Array2<f64>,
}

impl FitReport {
    pub(crate) fn new<M: KineticModel>(
        problem: &Problem<M>,
        ids: &[String],
        params: Array1<f64>,
        cost: f64,
        converged: bool,
        iterations: u64,
        cost_evaluations: u64,
    ) -> Self {
        let fitted = problem.simulate(&params);
        Self {
            params,
            ids: ids.to_vec(),
            cost,
            converged,
            iterations,
            cost_evaluations,
            fitted,
        }
    }

    /// Fitted value of a parameter by identifier.
    pub fn best(&self, id: &str) -> Option<f64> {
        self.ids
            .iter()
            .position(|candidate| candidate == id)
            .map(|i| self.params[i])
    }

    /// Serializes the report for downstream consumers (statistics,
    /// plotting).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
