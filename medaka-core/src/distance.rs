//! Euclidean distance primitives shared by the clustering algorithms.

use crate::error::PointSetError;

/// Computes the Euclidean distance between two vectors.
///
/// # Examples
/// ```
/// use medaka_core::euclidean_distance;
///
/// let d = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0])?;
/// assert!((d - 5.0).abs() < 1e-12);
/// # Ok::<(), medaka_core::PointSetError>(())
/// ```
///
/// # Errors
/// Returns [`PointSetError::ZeroDimension`] when either input is empty and
/// [`PointSetError::DimensionMismatch`] when the lengths differ.
pub fn euclidean_distance(left: &[f64], right: &[f64]) -> Result<f64, PointSetError> {
    squared_distance(left, right).map(f64::sqrt)
}

/// Computes the squared Euclidean distance between two vectors.
///
/// Used where only relative magnitudes matter (seeding weights, distortion)
/// so the square root can be skipped.
///
/// # Errors
/// Same contract as [`euclidean_distance`].
pub fn squared_distance(left: &[f64], right: &[f64]) -> Result<f64, PointSetError> {
    if left.is_empty() || right.is_empty() {
        return Err(PointSetError::ZeroDimension);
    }
    if left.len() != right.len() {
        return Err(PointSetError::DimensionMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    let mut sum = 0.0f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        let diff = l - r;
        sum += diff * diff;
    }
    Ok(sum)
}
