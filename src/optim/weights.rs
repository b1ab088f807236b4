//! Weight matrix construction from heterogeneous user inputs.
//!
//! The weight matrix holds the assumed measurement standard deviation per
//! observation and is used as a divisor in the residual sum. The builder
//! resolves a scalar, a per-species vector, a full matrix, or an external
//! sidecar source into a matrix with exactly the species-matrix shape.
//! Positivity of the entries is the caller's configuration responsibility
//! and is not re-validated here.

use ndarray::{Array1, Array2};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeightError {
    #[error("Sidecar weight loading was requested but no weight source was supplied")]
    SidecarUnavailable,
    #[error("Weight vector has length {found} but the dataset has {expected} species columns")]
    VectorLength { expected: usize, found: usize },
    #[error("Weight matrix has shape {found:?} but the species matrix has shape {expected:?}")]
    MatrixShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Weight input contains values that cannot be coerced to numbers: {0}")]
    TypeCoercion(String),
}

/// External collaborator seam for the sidecar weight convention (a file
/// named after the data file, same delimiter, holding a weight matrix or a
/// per-species vector).
///
/// The core never reads that file itself; a collaborator implementing this
/// trait is injected into [`build_weight_matrix`]. Implementations should
/// use [`WeightError::TypeCoercion`] when their source cannot be parsed
/// numerically.
pub trait SidecarSource {
    fn resolve(&self, shape: (usize, usize)) -> Result<Array2<f64>, WeightError>;
}

/// Heterogeneous weight specification, resolved by [`build_weight_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub enum WeightSpec {
    /// No explicit weights; defer to an injected [`SidecarSource`].
    Sidecar,
    /// One standard deviation for every observation.
    Scalar(f64),
    /// One standard deviation per species column, tiled across timepoints.
    Vector(Vec<f64>),
    /// Full per-observation matrix, used as-is when the shape matches.
    Matrix(Array2<f64>),
}

impl From<f64> for WeightSpec {
    fn from(value: f64) -> Self {
        WeightSpec::Scalar(value)
    }
}

impl From<Vec<f64>> for WeightSpec {
    fn from(value: Vec<f64>) -> Self {
        WeightSpec::Vector(value)
    }
}

impl From<Array2<f64>> for WeightSpec {
    fn from(value: Array2<f64>) -> Self {
        WeightSpec::Matrix(value)
    }
}

/// Resolves a weight specification into a matrix of exactly `shape`
/// (rows = timepoints, columns = species).
///
/// Resolution order, first match wins:
/// 1. [`WeightSpec::Sidecar`] delegates to the injected source, or fails
///    loudly with [`WeightError::SidecarUnavailable`];
/// 2. a scalar is broadcast to every cell;
/// 3. a matrix with the exact shape is used as-is;
/// 4. a vector whose length equals the species count is row-tiled;
/// 5. anything else is a shape error.
pub fn build_weight_matrix(
    spec: &WeightSpec,
    shape: (usize, usize),
    sidecar: Option<&dyn SidecarSource>,
) -> Result<Array2<f64>, WeightError> {
    match spec {
        WeightSpec::Sidecar => sidecar
            .ok_or(WeightError::SidecarUnavailable)?
            .resolve(shape),
        WeightSpec::Scalar(w) => Ok(Array2::from_elem(shape, *w)),
        WeightSpec::Matrix(m) if m.dim() == shape => Ok(m.clone()),
        WeightSpec::Matrix(m) => Err(WeightError::MatrixShape {
            expected: shape,
            found: m.dim(),
        }),
        WeightSpec::Vector(v) if v.len() == shape.1 => {
            let row = Array1::from_vec(v.clone());
            Ok(Array2::from_shape_fn(shape, |(_, j)| row[j]))
        }
        WeightSpec::Vector(v) => Err(WeightError::VectorLength {
            expected: shape.1,
            found: v.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_scalar_broadcast() {
        let weights = build_weight_matrix(&0.5.into(), (4, 3), None).unwrap();
        assert_eq!(weights.dim(), (4, 3));
        assert!(weights.iter().all(|&w| w == 0.5));
    }

    #[test]
    fn test_vector_is_row_tiled() {
        let weights =
            build_weight_matrix(&vec![0.02, 0.46].into(), (3, 2), None).unwrap();
        for i in 0..3 {
            assert_eq!(weights[[i, 0]], 0.02);
            assert_eq!(weights[[i, 1]], 0.46);
        }
    }

    #[test]
    fn test_matrix_passthrough_and_shape_rejection() {
        let matrix = arr2(&[[0.1, 0.2], [0.3, 0.4]]);
        let weights =
            build_weight_matrix(&matrix.clone().into(), (2, 2), None).unwrap();
        assert_eq!(weights, matrix);

        let res = build_weight_matrix(&matrix.into(), (3, 2), None);
        assert!(matches!(res, Err(WeightError::MatrixShape { .. })));
    }

    #[test]
    fn test_vector_length_rejection() {
        let res = build_weight_matrix(&vec![0.1, 0.2, 0.3].into(), (3, 2), None);
        assert!(matches!(
            res,
            Err(WeightError::VectorLength {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_sidecar_without_source_fails_loudly() {
        let res = build_weight_matrix(&WeightSpec::Sidecar, (3, 2), None);
        assert!(matches!(res, Err(WeightError::SidecarUnavailable)));
    }

    #[test]
    fn test_sidecar_source_is_used() {
        struct Fixed;
        impl SidecarSource for Fixed {
            fn resolve(&self, shape: (usize, usize)) -> Result<Array2<f64>, WeightError> {
                Ok(Array2::from_elem(shape, 0.2))
            }
        }

        let weights =
            build_weight_matrix(&WeightSpec::Sidecar, (2, 2), Some(&Fixed)).unwrap();
        assert!(weights.iter().all(|&w| w == 0.2));
    }
}
