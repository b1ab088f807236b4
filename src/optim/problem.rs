//! The optimization problem: immutable inputs plus the weighted cost.
//!
//! A [`Problem`] bundles the dataset, weight matrix, bounds, model variant
//! and fixed parameters, all validated against each other at construction
//! time. It is `Clone` and never mutated afterwards, so repeated or
//! concurrent solver invocations (e.g. Monte Carlo resampling by an
//! external collaborator) can share or clone it freely.

use argmin::core::{CostFunction, Gradient};
use finitediff::FiniteDiff;
use ndarray::{Array1, Array2};

use crate::dataset::Dataset;
use crate::model::{FixedParams, KineticModel};

use super::bound::Bounds;
use super::error::OptimizeError;
use super::transformation::{to_external_vec, to_internal_vec, BoundTransform};

#[derive(Debug, Clone)]
pub struct Problem<M> {
    dataset: Dataset,
    weights: Array2<f64>,
    bounds: Bounds,
    transforms: Vec<BoundTransform>,
    model: M,
    fixed: FixedParams,
}

impl<M: KineticModel> Problem<M> {
    /// Validates all inputs against each other and builds the problem.
    ///
    /// # Errors
    /// * [`OptimizeError::BoundsLengthMismatch`] if the bounds set does not
    ///   have one pair per parameter (`2 + 2 * metabolites`);
    /// * [`OptimizeError::WeightShapeMismatch`] if the weight matrix does
    ///   not have the species matrix shape;
    /// * [`OptimizeError::FixedParamsLengthMismatch`] if the fixed
    ///   parameters do not cover every metabolite.
    pub fn new(
        dataset: Dataset,
        weights: Array2<f64>,
        bounds: Bounds,
        model: M,
        fixed: FixedParams,
    ) -> Result<Self, OptimizeError> {
        let n_metabolites = dataset.metabolites().len();
        let n_params = 2 + 2 * n_metabolites;

        if bounds.len() != n_params {
            return Err(OptimizeError::BoundsLengthMismatch {
                expected: n_params,
                found: bounds.len(),
            });
        }
        if weights.dim() != dataset.shape() {
            return Err(OptimizeError::WeightShapeMismatch {
                expected: dataset.shape(),
                found: weights.dim(),
            });
        }
        if fixed.len() != n_metabolites {
            return Err(OptimizeError::FixedParamsLengthMismatch {
                expected: n_metabolites,
                found: fixed.len(),
            });
        }

        let transforms = BoundTransform::from_bounds(&bounds);
        Ok(Self {
            dataset,
            weights,
            bounds,
            transforms,
            model,
            fixed,
        })
    }

    /// Number of fitted parameters, `2 + 2 * metabolites`.
    pub fn n_params(&self) -> usize {
        self.transforms.len()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn fixed(&self) -> &FixedParams {
        &self.fixed
    }

    /// Simulates the expected species matrix for parameters on their
    /// natural scale.
    pub fn simulate(&self, params: &Array1<f64>) -> Array2<f64> {
        self.model.simulate(
            params,
            &self.fixed,
            self.dataset.time(),
            self.dataset.shape(),
        )
    }

    /// Weighted sum of squared residuals,
    /// `Σ ((simulated - measured) / weight)²`.
    ///
    /// NaN terms (missing measurements, or NaN simulation output) contribute
    /// zero so sparse datasets remain fittable; infinite terms from a
    /// degenerate growth rate propagate so the solver sees the blow-up.
    /// Zero exactly when the simulation matches every valid cell.
    pub fn weighted_cost(&self, params: &Array1<f64>) -> f64 {
        let simulated = self.simulate(params);
        let mut total = 0.0;
        for ((sim, meas), weight) in simulated
            .iter()
            .zip(self.dataset.measurements().iter())
            .zip(self.weights.iter())
        {
            let term = ((sim - meas) / weight).powi(2);
            if !term.is_nan() {
                total += term;
            }
        }
        total
    }

    /// Maps internal solver coordinates to bounded parameter values.
    pub(crate) fn constrain(&self, internal: &Array1<f64>) -> Array1<f64> {
        to_external_vec(&self.transforms, internal)
    }

    /// Maps bounded parameter values into the solver's internal space.
    pub(crate) fn unconstrain(&self, external: &Array1<f64>) -> Array1<f64> {
        to_internal_vec(&self.transforms, external)
    }
}

/// Solver-facing cost: evaluates the weighted residual sum at the bounded
/// parameters corresponding to the solver's internal coordinates.
impl<M: KineticModel> CostFunction for Problem<M> {
    type Param = Array1<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        Ok(self.weighted_cost(&self.constrain(params)))
    }
}

/// Central finite-difference gradient in the solver's internal space.
impl<M: KineticModel> Gradient for Problem<M> {
    type Param = Array1<f64>;
    type Gradient = Array1<f64>;

    fn gradient(&self, params: &Self::Param) -> Result<Self::Gradient, argmin::core::Error> {
        let cost_fn = |x: &Array1<f64>| self.weighted_cost(&self.constrain(x));
        Ok(params.central_diff(&cost_fn))
    }
}
