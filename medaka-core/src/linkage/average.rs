//! Average-linkage (UPGMA) distance matrix.

use std::collections::BTreeMap;

use crate::{
    distance::euclidean_distance,
    linkage::{ClosestPair, LinkageError, LinkageMatrix},
    points::PointSet,
};

/// A shrinking pairwise-distance matrix whose merge rule is the size-weighted
/// average of the two merged rows.
///
/// Live nodes are keyed by id; leaf ids are `0..n` and every merge consumes
/// the next unused id, so ids increase monotonically and removed ids never
/// return.
///
/// # Examples
/// ```
/// use medaka_core::{AverageLinkageMatrix, LinkageMatrix};
///
/// let mut matrix = AverageLinkageMatrix::from_distances(vec![
///     vec![0.0, 2.0, 4.0],
///     vec![2.0, 0.0, 4.0],
///     vec![4.0, 4.0, 0.0],
/// ])?;
/// let pair = matrix.closest_pair()?;
/// assert_eq!((pair.left, pair.right), (0, 1));
/// let merged = matrix.merge(pair.left, pair.right)?;
/// assert_eq!(merged, 3);
/// assert!((matrix.distance(merged, 2)? - 4.0).abs() < 1e-12);
/// # Ok::<(), medaka_core::LinkageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AverageLinkageMatrix {
    /// Distances keyed by ordered pair `(low, high)` of live ids.
    distances: BTreeMap<(usize, usize), f64>,
    /// Number of original leaves absorbed by each live node.
    sizes: BTreeMap<usize, usize>,
    next_id: usize,
}

impl AverageLinkageMatrix {
    /// Builds the matrix from pairwise Euclidean distances between points.
    ///
    /// # Errors
    /// Propagates [`crate::PointSetError`] values, although a validated
    /// [`PointSet`] cannot actually produce them.
    pub fn from_points(points: &PointSet) -> Result<Self, LinkageError> {
        let mut distances = BTreeMap::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let d = euclidean_distance(points.point(i)?, points.point(j)?)?;
                distances.insert((i, j), d);
            }
        }
        Ok(Self {
            distances,
            sizes: (0..points.len()).map(|id| (id, 1)).collect(),
            next_id: points.len(),
        })
    }

    /// Builds the matrix from an explicit square distance matrix.
    ///
    /// Only the upper triangle is read; the diagonal is ignored.
    ///
    /// # Errors
    /// Returns [`LinkageError::MalformedMatrix`] when a row length differs
    /// from the row count.
    pub fn from_distances(rows: Vec<Vec<f64>>) -> Result<Self, LinkageError> {
        let n = rows.len();
        let mut distances = BTreeMap::new();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(LinkageError::MalformedMatrix {
                    row: i,
                    got: row.len(),
                    expected: n,
                });
            }
            for (j, &d) in row.iter().enumerate().skip(i + 1) {
                distances.insert((i, j), d);
            }
        }
        Ok(Self {
            distances,
            sizes: (0..n).map(|id| (id, 1)).collect(),
            next_id: n,
        })
    }

    /// Returns the live node ids in ascending order.
    pub fn live_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.sizes.keys().copied()
    }

    fn size_of(&self, id: usize) -> Result<usize, LinkageError> {
        self.sizes
            .get(&id)
            .copied()
            .ok_or(LinkageError::UnknownNode { id })
    }

    fn key(a: usize, b: usize) -> (usize, usize) {
        if a < b { (a, b) } else { (b, a) }
    }
}

impl LinkageMatrix for AverageLinkageMatrix {
    fn len(&self) -> usize {
        self.sizes.len()
    }

    fn distance(&self, a: usize, b: usize) -> Result<f64, LinkageError> {
        self.size_of(a)?;
        self.size_of(b)?;
        if a == b {
            return Ok(0.0);
        }
        self.distances
            .get(&Self::key(a, b))
            .copied()
            .ok_or(LinkageError::UnknownNode { id: a.max(b) })
    }

    fn closest_pair(&self) -> Result<ClosestPair, LinkageError> {
        if self.sizes.len() < 2 {
            return Err(LinkageError::InsufficientNodes {
                live: self.sizes.len(),
            });
        }
        let mut best: Option<ClosestPair> = None;
        // Iteration order is ascending by (low, high), so a strict `<`
        // leaves ties with the lowest pair of ids.
        for (&(left, right), &distance) in &self.distances {
            let closer = best.is_none_or(|pair| distance < pair.distance);
            if closer {
                best = Some(ClosestPair {
                    left,
                    right,
                    distance,
                });
            }
        }
        best.ok_or(LinkageError::InsufficientNodes {
            live: self.sizes.len(),
        })
    }

    fn merge(&mut self, a: usize, b: usize) -> Result<usize, LinkageError> {
        if a == b {
            return Err(LinkageError::SelfMerge { id: a });
        }
        let size_a = self.size_of(a)?;
        let size_b = self.size_of(b)?;

        let new_id = self.next_id;
        self.next_id += 1;

        let merged_size = size_a + size_b;
        let weight_a = size_a as f64;
        let weight_b = size_b as f64;
        let total = merged_size as f64;

        let others: Vec<usize> = self
            .sizes
            .keys()
            .copied()
            .filter(|&id| id != a && id != b)
            .collect();
        for other in others {
            let to_a = self
                .distances
                .remove(&Self::key(a, other))
                .ok_or(LinkageError::UnknownNode { id: other })?;
            let to_b = self
                .distances
                .remove(&Self::key(b, other))
                .ok_or(LinkageError::UnknownNode { id: other })?;
            let averaged = (weight_a * to_a + weight_b * to_b) / total;
            self.distances.insert(Self::key(new_id, other), averaged);
        }
        self.distances.remove(&Self::key(a, b));
        self.sizes.remove(&a);
        self.sizes.remove(&b);
        self.sizes.insert(new_id, merged_size);
        Ok(new_id)
    }
}
