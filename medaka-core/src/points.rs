//! Immutable, validated point storage.
//!
//! A [`PointSet`] fixes its dimension from the first point and guarantees
//! every row matches it. The set never changes after construction, so
//! borrowed views handed out by [`PointSet::point`] cannot be used to
//! corrupt internal state.

use crate::error::PointSetError;

/// An ordered, non-empty collection of equal-length coordinate vectors.
///
/// # Examples
/// ```
/// use medaka_core::PointSet;
///
/// let points = PointSet::new(vec![vec![0.0, 0.0], vec![3.0, 4.0]])?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.dim(), 2);
/// assert_eq!(points.point(1)?, &[3.0, 4.0]);
/// # Ok::<(), medaka_core::PointSetError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<Vec<f64>>,
    dim: usize,
}

impl PointSet {
    /// Validates and wraps a collection of points.
    ///
    /// # Errors
    /// Returns [`PointSetError::Empty`] when no points are supplied,
    /// [`PointSetError::ZeroDimension`] when the first point is empty, and
    /// [`PointSetError::RaggedPoint`] when a later point disagrees with the
    /// dimension fixed by the first.
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self, PointSetError> {
        let Some(first) = points.first() else {
            return Err(PointSetError::Empty);
        };
        let dim = first.len();
        if dim == 0 {
            return Err(PointSetError::ZeroDimension);
        }
        for (index, point) in points.iter().enumerate() {
            if point.len() != dim {
                return Err(PointSetError::RaggedPoint {
                    index,
                    expected: dim,
                    got: point.len(),
                });
            }
        }
        Ok(Self { points, dim })
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether the set is empty. Construction rejects empty sets, so
    /// this is always `false`; it exists for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the dimension shared by every point.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns an immutable view of the point at `index`.
    ///
    /// # Errors
    /// Returns [`PointSetError::OutOfBounds`] for invalid indices.
    pub fn point(&self, index: usize) -> Result<&[f64], PointSetError> {
        self.points
            .get(index)
            .map(Vec::as_slice)
            .ok_or(PointSetError::OutOfBounds {
                index,
                len: self.points.len(),
            })
    }

    /// Iterates over every point in order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.points.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_set() {
        let err = PointSet::new(vec![]).expect_err("empty sets are invalid");
        assert_eq!(err, PointSetError::Empty);
    }

    #[test]
    fn rejects_zero_dimension() {
        let err = PointSet::new(vec![vec![]]).expect_err("empty points are invalid");
        assert_eq!(err, PointSetError::ZeroDimension);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = PointSet::new(vec![vec![1.0, 2.0], vec![3.0]])
            .expect_err("ragged rows are invalid");
        assert_eq!(
            err,
            PointSetError::RaggedPoint {
                index: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn point_access_is_bounds_checked() {
        let points = PointSet::new(vec![vec![1.0]]).expect("valid set");
        let err = points.point(3).expect_err("index 3 is out of bounds");
        assert_eq!(err, PointSetError::OutOfBounds { index: 3, len: 1 });
    }
}
