//! Mutable center storage owned by a single clustering run.
//!
//! A [`CenterSet`] only comes into existence through allocation against a
//! [`PointSet`], so "operating on uninitialized centers" is unrepresentable:
//! every live `CenterSet` has at least one center of the right dimension.
//! Reads hand out owned copies so callers cannot alias internal state.

use crate::{
    distance::{euclidean_distance, squared_distance},
    error::{ClusterError, PointSetError, Result},
    points::PointSet,
};

/// An ordered collection of centers sharing the dimension of a [`PointSet`].
///
/// # Examples
/// ```
/// use medaka_core::{CenterSet, PointSet};
///
/// let points = PointSet::new(vec![vec![0.0, 0.0], vec![4.0, 0.0]])?;
/// let mut centers = CenterSet::new_zeroed(1, &points)?;
/// centers.set(0, vec![1.0, 0.0])?;
/// assert!((centers.min_distance(&[0.0, 0.0])? - 1.0).abs() < 1e-12);
/// # Ok::<(), medaka_core::ClusterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CenterSet {
    centers: Vec<Vec<f64>>,
    dim: usize,
}

impl CenterSet {
    /// Allocates `count` all-zero centers matching the dimension of `points`.
    ///
    /// # Errors
    /// Returns [`ClusterError::InvalidClusterCount`] when `count` is zero or
    /// exceeds the number of points.
    pub fn new_zeroed(count: usize, points: &PointSet) -> Result<Self> {
        if count == 0 || count > points.len() {
            return Err(ClusterError::InvalidClusterCount {
                got: count,
                points: points.len(),
            });
        }
        Ok(Self {
            centers: vec![vec![0.0; points.dim()]; count],
            dim: points.dim(),
        })
    }

    /// Returns the number of centers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// Returns whether the set holds no centers. Allocation rejects zero
    /// counts, so this is always `false`; it exists for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Returns the dimension shared by every center.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Returns an owned copy of the center at `index`.
    ///
    /// # Errors
    /// Returns [`PointSetError::OutOfBounds`] for invalid indices.
    pub fn get(&self, index: usize) -> Result<Vec<f64>> {
        self.centers
            .get(index)
            .cloned()
            .ok_or_else(|| self.out_of_bounds(index))
    }

    /// Replaces the center at `index`.
    ///
    /// # Errors
    /// Returns [`PointSetError::OutOfBounds`] for invalid indices and
    /// [`PointSetError::DimensionMismatch`] when the replacement has the
    /// wrong dimension.
    pub fn set(&mut self, index: usize, center: Vec<f64>) -> Result<()> {
        if center.len() != self.dim {
            return Err(ClusterError::PointSet(PointSetError::DimensionMismatch {
                left: self.dim,
                right: center.len(),
            }));
        }
        let len = self.centers.len();
        let slot = self
            .centers
            .get_mut(index)
            .ok_or(ClusterError::PointSet(PointSetError::OutOfBounds {
                index,
                len,
            }))?;
        *slot = center;
        Ok(())
    }

    /// Returns a deep copy of the full center array.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Vec<f64>> {
        self.centers.clone()
    }

    /// Returns the minimum Euclidean distance from `point` to any center.
    ///
    /// # Errors
    /// Propagates dimension mismatches between `point` and the centers.
    pub fn min_distance(&self, point: &[f64]) -> Result<f64> {
        self.min_distance_within(point, self.centers.len())
    }

    /// Returns the minimum Euclidean distance from `point` to the first
    /// `limit` centers.
    ///
    /// # Errors
    /// Returns [`ClusterError::InvalidCenterLimit`] when `limit` is zero or
    /// exceeds the number of centers, and propagates dimension mismatches.
    pub fn min_distance_within(&self, point: &[f64], limit: usize) -> Result<f64> {
        let (_, distance) = self.nearest_within(point, limit)?;
        Ok(distance)
    }

    /// Returns the index of the nearest center and its distance, keeping the
    /// first minimal distance found so ties go to the lowest center index.
    pub(crate) fn nearest(&self, point: &[f64]) -> Result<(usize, f64)> {
        self.nearest_within(point, self.centers.len())
    }

    fn nearest_within(&self, point: &[f64], limit: usize) -> Result<(usize, f64)> {
        if limit == 0 || limit > self.centers.len() {
            return Err(ClusterError::InvalidCenterLimit {
                limit,
                centers: self.centers.len(),
            });
        }
        let mut best: Option<(usize, f64)> = None;
        for (index, center) in self.centers.iter().take(limit).enumerate() {
            let distance = euclidean_distance(point, center)?;
            match best {
                Some((_, current)) if distance >= current => {}
                _ => best = Some((index, distance)),
            }
        }
        // The limit check above guarantees at least one candidate.
        best.ok_or(ClusterError::InvalidCenterLimit {
            limit,
            centers: self.centers.len(),
        })
    }

    /// Computes the mean squared distance from every point to its nearest
    /// center, the objective that Lloyd refinement descends.
    ///
    /// # Errors
    /// Propagates dimension mismatches between the points and the centers.
    pub fn distortion(&self, points: &PointSet) -> Result<f64> {
        let mut total = 0.0f64;
        for point in points.iter() {
            let mut best = f64::INFINITY;
            for center in &self.centers {
                let squared = squared_distance(point, center)?;
                if squared < best {
                    best = squared;
                }
            }
            total += best;
        }
        let count = points.len() as f64;
        Ok(total / count)
    }

    fn out_of_bounds(&self, index: usize) -> ClusterError {
        ClusterError::PointSet(PointSetError::OutOfBounds {
            index,
            len: self.centers.len(),
        })
    }
}
