use thiserror::Error;

use crate::model::ModelError;

use super::weights::WeightError;

/// Errors raised while assembling or running an optimization.
///
/// Structural mismatches are construction-time errors so a malformed run
/// never consumes solver time. Solver non-convergence within its internal
/// limits is not an error; it is reported through
/// [`crate::optim::FitReport::converged`].
#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("Expected {expected} bounds to match the parameter vector but found {found}")]
    BoundsLengthMismatch { expected: usize, found: usize },
    #[error("Initial guess has length {found} but the problem has {expected} parameters")]
    InitialGuessLengthError { expected: usize, found: usize },
    #[error("Weight matrix has shape {found:?} but the species matrix has shape {expected:?}")]
    WeightShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Fixed parameters cover {found} metabolites but the dataset has {expected}")]
    FixedParamsLengthMismatch { expected: usize, found: usize },
    #[error("Error optimizing")]
    ArgMinError(argmin::core::Error),
    #[error("No solution found")]
    NoSolution,
    #[error(transparent)]
    Weights(#[from] WeightError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
