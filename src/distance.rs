//! Cosine distance between feature vectors

use num_traits::Float;

use crate::error::DistanceError;

/// Cosine distance `1 - (v1·v2) / sqrt(|v1·v1 · v2·v2|)`, in `[0, 2]`.
///
/// Fails on vectors of different lengths, when the denominator is exactly zero
/// (a zero-energy vector, or an underflowing product), and when it is not finite.
pub fn try_distance<T: Float>(v1: &[T], v2: &[T]) -> Result<T, DistanceError> {
    if v1.len() != v2.len() {
        return Err(DistanceError::LengthMismatch {
            left: v1.len(),
            right: v2.len(),
        });
    }

    let (dot, energy1, energy2) = v1.iter().zip(v2).fold(
        (T::zero(), T::zero(), T::zero()),
        |(dot, e1, e2), (&a, &b)| (dot + a * b, e1 + a * a, e2 + b * b),
    );
    let denominator = (energy1 * energy2).abs().sqrt();
    if denominator == T::zero() {
        return Err(DistanceError::ZeroDenominator);
    }
    if !denominator.is_finite() {
        return Err(DistanceError::NonFiniteDenominator);
    }
    Ok(T::one() - dot / denominator)
}

/// Cosine distance, falling back to `1.0` on degenerate input.
///
/// The failure is logged rather than returned; use [`try_distance`] to handle it.
pub fn distance<T: Float>(v1: &[T], v2: &[T]) -> T {
    match try_distance(v1, v2) {
        Ok(distance) => distance,
        Err(err @ DistanceError::LengthMismatch { .. }) => {
            log::error!("cosine distance: {err}");
            T::one()
        }
        Err(err @ (DistanceError::ZeroDenominator | DistanceError::NonFiniteDenominator)) => {
            log::warn!("cosine distance: {err}");
            T::one()
        }
    }
}
