//! Kinetic model variants used to simulate expected concentration
//! trajectories from a candidate parameter vector.
//!
//! Every variant implements the same [`KineticModel`] contract: given the
//! ordered parameter vector `[X_0, mu, (<met>_q, <met>_M0)*]`, the fixed
//! (non-optimized) parameters and a time vector, produce a matrix with the
//! shape of the measured species matrix. New model variants are added by
//! implementing the trait, never by branching on tags inside a shared
//! function.

use std::collections::HashMap;

use ndarray::{Array1, Array2};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Missing degradation constant for metabolite {0}")]
    MissingDegradationConstant(String),
}

/// Fixed (non-optimized) per-metabolite parameters, resolved to the
/// dataset's metabolite column order.
///
/// Currently this carries one first-order degradation constant `k` per
/// metabolite, used by [`GrowthWithDegradation`] and ignored by
/// [`SimpleGrowth`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedParams {
    degradation: Vec<f64>,
}

impl FixedParams {
    /// No degradation: one `k = 0` per metabolite.
    pub fn none(n_metabolites: usize) -> Self {
        Self {
            degradation: vec![0.0; n_metabolites],
        }
    }

    /// Resolves name-keyed degradation constants to metabolite column order.
    ///
    /// # Errors
    /// Returns [`ModelError::MissingDegradationConstant`] if any metabolite
    /// has no entry in the map.
    pub fn resolve(
        constants: &HashMap<String, f64>,
        metabolites: &[String],
    ) -> Result<Self, ModelError> {
        let degradation = metabolites
            .iter()
            .map(|met| {
                constants
                    .get(met)
                    .copied()
                    .ok_or_else(|| ModelError::MissingDegradationConstant(met.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { degradation })
    }

    /// Degradation constant for the i-th metabolite (0 if absent).
    pub fn degradation(&self, index: usize) -> f64 {
        self.degradation.get(index).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.degradation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degradation.is_empty()
    }
}

/// Closed-form kinetic model over the ordered parameter vector
/// `[X_0, mu, (<met>_q, <met>_M0)*]`.
pub trait KineticModel {
    /// Simulates the expected species matrix.
    ///
    /// The output has exactly `shape` (rows = timepoints, column 0 =
    /// biomass, remaining columns = metabolites in dataset order).
    ///
    /// Degenerate growth rates (`mu == 0`, or `mu + k == 0` for the
    /// degradation variant) make the analytical divisor vanish; the
    /// resulting non-finite values are deliberately not intercepted here and
    /// propagate into the cost. The strictly positive lower bound on `mu`
    /// (see [`crate::optim::Bounds`]) is the only safeguard.
    fn simulate(
        &self,
        params: &Array1<f64>,
        fixed: &FixedParams,
        time: &Array1<f64>,
        shape: (usize, usize),
    ) -> Array2<f64>;

    fn name(&self) -> &'static str;
}

/// Exponential growth without metabolite degradation:
///
/// `X(t) = X_0 * exp(mu * t)`
/// `M_i(t) = q_i * (X_0 / mu) * (exp(mu * t) - 1) + M0_i`
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleGrowth;

impl KineticModel for SimpleGrowth {
    fn simulate(
        &self,
        params: &Array1<f64>,
        _fixed: &FixedParams,
        time: &Array1<f64>,
        shape: (usize, usize),
    ) -> Array2<f64> {
        debug_assert_eq!(shape.0, time.len());
        let mut simulated = Array2::zeros(shape);

        let x_0 = params[0];
        let mu = params[1];
        let exp_mu_t = time.mapv(|t| (mu * t).exp());
        simulated.column_mut(0).assign(&(&exp_mu_t * x_0));

        for j in 1..shape.1 {
            let q = params[2 * j];
            let m_0 = params[2 * j + 1];
            let column = exp_mu_t.mapv(|e| q * (x_0 / mu) * (e - 1.0) + m_0);
            simulated.column_mut(j).assign(&column);
        }

        simulated
    }

    fn name(&self) -> &'static str {
        "simple growth"
    }
}

/// Exponential growth with first-order metabolite degradation:
///
/// `X(t) = X_0 * exp(mu * t)`
/// `M_i(t) = q_i * (X_0 / (mu + k_i)) * (exp(mu * t) - exp(-k_i * t)) + M0_i * exp(-k_i * t)`
///
/// The degradation constants `k_i` come from [`FixedParams`] and are not
/// optimized. For `k_i = 0` this reduces to [`SimpleGrowth`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthWithDegradation;

impl KineticModel for GrowthWithDegradation {
    fn simulate(
        &self,
        params: &Array1<f64>,
        fixed: &FixedParams,
        time: &Array1<f64>,
        shape: (usize, usize),
    ) -> Array2<f64> {
        debug_assert_eq!(shape.0, time.len());
        let mut simulated = Array2::zeros(shape);

        let x_0 = params[0];
        let mu = params[1];
        let exp_mu_t = time.mapv(|t| (mu * t).exp());
        simulated.column_mut(0).assign(&(&exp_mu_t * x_0));

        for j in 1..shape.1 {
            let q = params[2 * j];
            let m_0 = params[2 * j + 1];
            let k = fixed.degradation(j - 1);
            let column = Array1::from_shape_fn(shape.0, |i| {
                let exp_k_t = (-k * time[i]).exp();
                q * (x_0 / (mu + k)) * (exp_mu_t[i] - exp_k_t) + m_0 * exp_k_t
            });
            simulated.column_mut(j).assign(&column);
        }

        simulated
    }

    fn name(&self) -> &'static str {
        "growth with degradation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    fn params() -> Array1<f64> {
        // X_0 = 1, mu = ln(2), Glc_q = -1.4, Glc_M0 = 10
        arr1(&[1.0, std::f64::consts::LN_2, -1.4, 10.0])
    }

    #[test]
    fn test_biomass_strictly_increasing_for_positive_mu() {
        let time = arr1(&[0.0, 0.5, 1.0, 2.0, 4.0]);
        let simulated = SimpleGrowth.simulate(&params(), &FixedParams::none(1), &time, (5, 2));

        let biomass = simulated.column(0);
        for w in biomass.to_vec().windows(2) {
            assert!(w[1] > w[0], "biomass must grow: {w:?}");
        }
    }

    #[test]
    fn test_simple_growth_known_values() {
        let time = arr1(&[0.0, 1.0, 2.0]);
        let simulated = SimpleGrowth.simulate(&params(), &FixedParams::none(1), &time, (3, 2));

        // X doubles each time unit.
        assert_relative_eq!(simulated[[0, 0]], 1.0, epsilon = 1e-12);
        assert_relative_eq!(simulated[[1, 0]], 2.0, epsilon = 1e-12);
        assert_relative_eq!(simulated[[2, 0]], 4.0, epsilon = 1e-12);

        // M(0) = M0 exactly.
        assert_relative_eq!(simulated[[0, 1]], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_degradation_reduces_to_simple_growth_as_k_vanishes() {
        let time = arr1(&[0.0, 1.0, 2.0, 3.0]);
        let p = params();
        let reference = SimpleGrowth.simulate(&p, &FixedParams::none(1), &time, (4, 2));

        let tiny_k = FixedParams::resolve(
            &HashMap::from([("Glc".to_string(), 1e-10)]),
            &["Glc".to_string()],
        )
        .unwrap();
        let degraded = GrowthWithDegradation.simulate(&p, &tiny_k, &time, (4, 2));

        for (a, b) in reference.iter().zip(degraded.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_degenerate_mu_propagates_non_finite() {
        let time = arr1(&[0.0, 1.0]);
        let p = arr1(&[1.0, 0.0, -1.4, 10.0]);
        let simulated = SimpleGrowth.simulate(&p, &FixedParams::none(1), &time, (2, 2));
        assert!(simulated.column(1).iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_resolve_missing_constant() {
        let res = FixedParams::resolve(&HashMap::new(), &["Glc".to_string()]);
        assert!(matches!(
            res,
            Err(ModelError::MissingDegradationConstant(met)) if met == "Glc"
        ));
    }
}
