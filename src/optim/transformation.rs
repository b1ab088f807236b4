//! Parameter transformations enforcing box constraints during optimization.
//!
//! The quasi-Newton solver searches an unconstrained internal space; each
//! parameter is mapped into its admissible `(lower, upper)` interval through
//! a logistic transform before every cost evaluation. The guarded
//! piecewise evaluation keeps `f64` arithmetic well-conditioned for large
//! internal coordinates.

use ndarray::Array1;

use super::bound::Bounds;

/// Keeps the logit argument strictly inside (0, 1).
const FRACTION_EPS: f64 = 1e-10;

/// Bijective map between an unconstrained internal coordinate and a
/// bounded external parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundTransform {
    lower: f64,
    upper: f64,
}

impl BoundTransform {
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower < upper, "bounds must be ordered: {lower} < {upper}");
        Self { lower, upper }
    }

    /// One transform per bounds pair, positionally aligned.
    pub fn from_bounds(bounds: &Bounds) -> Vec<Self> {
        bounds.iter().map(|&(lo, hi)| Self::new(lo, hi)).collect()
    }

    /// Maps an internal coordinate into `(lower, upper)`.
    pub fn to_external(&self, internal: f64) -> f64 {
        self.lower + (self.upper - self.lower) * sigmoid(internal)
    }

    /// Inverse map; external values outside the bounds are clamped just
    /// inside before taking the logit.
    pub fn to_internal(&self, external: f64) -> f64 {
        let span = self.upper - self.lower;
        let fraction =
            ((external - self.lower) / span).clamp(FRACTION_EPS, 1.0 - FRACTION_EPS);
        (fraction / (1.0 - fraction)).ln()
    }
}

/// Maps a whole external parameter vector into internal coordinates.
pub fn to_internal_vec(transforms: &[BoundTransform], external: &Array1<f64>) -> Array1<f64> {
    debug_assert_eq!(transforms.len(), external.len());
    Array1::from_shape_fn(external.len(), |i| transforms[i].to_internal(external[i]))
}

/// Maps internal solver coordinates back into bounded parameter values.
pub fn to_external_vec(transforms: &[BoundTransform], internal: &Array1<f64>) -> Array1<f64> {
    debug_assert_eq!(transforms.len(), internal.len());
    Array1::from_shape_fn(internal.len(), |i| transforms[i].to_external(internal[i]))
}

/// Overflow-free logistic function. For `z <= 0` the naive form would
/// compute `exp(-z)` on a large positive argument; the mirrored branch
/// keeps the exponent non-positive instead.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
