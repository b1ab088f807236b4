//! Initial parameter vector construction.

use ndarray::Array1;
use serde::Serialize;

use crate::dataset::Dataset;

/// Ordered initial parameter vector and its parallel identifier list.
///
/// Order is fixed: `X_0`, `mu`, then `<met>_q`, `<met>_M0` for each
/// metabolite in dataset column order. Bounds and fixed parameters rely on
/// this positional order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialGuess {
    values: Array1<f64>,
    ids: Vec<String>,
}

impl InitialGuess {
    /// Builds the deterministic uniform guess: every entry equals `vini`.
    pub fn uniform(dataset: &Dataset, vini: f64) -> Self {
        let n_metabolites = dataset.metabolites().len();
        let mut values = Vec::with_capacity(2 + 2 * n_metabolites);
        let mut ids = Vec::with_capacity(2 + 2 * n_metabolites);

        values.push(vini);
        ids.push("X_0".to_string());
        values.push(vini);
        ids.push("mu".to_string());

        for met in dataset.metabolites() {
            values.push(vini);
            ids.push(format!("{met}_q"));
            values.push(vini);
            ids.push(format!("{met}_M0"));
        }

        Self {
            values: Array1::from_vec(values),
            ids,
        }
    }

    /// Wraps explicit values and identifiers; both must be positionally
    /// aligned.
    pub fn from_parts(values: Array1<f64>, ids: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), ids.len());
        Self { values, ids }
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    #[test]
    fn test_uniform_guess_order_and_ids() {
        let dataset = Dataset::new(
            arr1(&[0.0, 1.0]),
            arr2(&[[1.0, 10.0, 0.2], [2.0, 8.0, 0.4]]),
            vec!["X".to_string(), "Glc".to_string(), "Ace".to_string()],
        )
        .unwrap();

        let guess = InitialGuess::uniform(&dataset, 0.04);
        assert_eq!(
            guess.ids(),
            ["X_0", "mu", "Glc_q", "Glc_M0", "Ace_q", "Ace_M0"]
        );
        assert!(guess.values().iter().all(|&v| v == 0.04));
        assert_eq!(guess.len(), 6);
    }
}
