//! Box constraints for the fitted parameter vector.

use serde::Serialize;

/// Lower bound floor for the specific growth rate `mu`.
///
/// The user-configured lower flux bound is deliberately not applied to `mu`:
/// a zero or negative growth rate makes the analytical equations singular
/// (division by `mu`), so the bound is clamped strictly away from zero.
pub const MU_LOWER_FLOOR: f64 = 1e-6;

/// Scalar limits from which the full bounds set is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Limits {
    /// Lower bound on initial concentrations (`X_0`, `<met>_M0`).
    pub lower_conc: f64,
    /// Upper bound on initial concentrations.
    pub upper_conc: f64,
    /// Lower bound on fluxes (`<met>_q`).
    pub lower_flux: f64,
    /// Upper bound on fluxes and on `mu`.
    pub upper_flux: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            lower_conc: 1e-6,
            upper_conc: 50.0,
            lower_flux: -50.0,
            upper_flux: 50.0,
        }
    }
}

/// Ordered `(lower, upper)` pairs, one per parameter vector entry, in the
/// same positional order as [`crate::optim::InitialGuess`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds(Vec<(f64, f64)>);

impl Bounds {
    /// Expands scalar limits into the positional bounds set:
    /// `X_0` and every `<met>_M0` get the concentration bounds, every
    /// `<met>_q` gets the flux bounds, and `mu` gets
    /// `(MU_LOWER_FLOOR, upper_flux)`.
    pub fn build(limits: &Limits, n_metabolites: usize) -> Self {
        let mut pairs = Vec::with_capacity(2 + 2 * n_metabolites);
        pairs.push((limits.lower_conc, limits.upper_conc)); // X_0
        pairs.push((MU_LOWER_FLOOR, limits.upper_flux)); // mu
        for _ in 0..n_metabolites {
            pairs.push((limits.lower_flux, limits.upper_flux)); // q
            pairs.push((limits.lower_conc, limits.upper_conc)); // M0
        }
        Self(pairs)
    }

    /// Wraps explicit pairs; callers are responsible for positional order.
    pub fn from_pairs(pairs: Vec<(f64, f64)>) -> Self {
        Self(pairs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(f64, f64)] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (f64, f64)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::optim::InitialGuess;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_length_matches_parameter_vector() {
        let dataset = Dataset::new(
            arr1(&[0.0, 1.0]),
            arr2(&[[1.0, 10.0, 0.2], [2.0, 8.0, 0.4]]),
            vec!["X".to_string(), "Glc".to_string(), "Ace".to_string()],
        )
        .unwrap();

        let guess = InitialGuess::uniform(&dataset, 1.0);
        let bounds = Bounds::build(&Limits::default(), dataset.metabolites().len());
        assert_eq!(bounds.len(), guess.len());
        assert_eq!(bounds.len(), 2 + 2 * 2);
    }

    #[test]
    fn test_mu_lower_bound_is_floored() {
        let limits = Limits::default();
        let bounds = Bounds::build(&limits, 1);

        // X_0 keeps the concentration bounds, mu gets the positive floor.
        assert_eq!(bounds.pairs()[0], (limits.lower_conc, limits.upper_conc));
        assert_eq!(bounds.pairs()[1], (MU_LOWER_FLOOR, limits.upper_flux));
        assert_eq!(bounds.pairs()[2], (limits.lower_flux, limits.upper_flux));
        assert_eq!(bounds.pairs()[3], (limits.lower_conc, limits.upper_conc));
    }
}
