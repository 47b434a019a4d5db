//! Membership bookkeeping over a reducing distance matrix.

use std::collections::BTreeMap;

use crate::linkage::{ClosestPair, LinkageError, LinkageMatrix};

/// Wraps a [`LinkageMatrix`], additionally tracking which original leaves
/// every live node has absorbed.
///
/// The map starts as the identity (each leaf maps to itself) and every merge
/// replaces the two old entries with one new entry holding the first
/// argument's members followed by the second's. At any time the live
/// membership sets partition the original leaf ids exactly once.
///
/// # Examples
/// ```
/// use medaka_core::{AverageLinkageMatrix, MergeEngine};
///
/// let matrix = AverageLinkageMatrix::from_distances(vec![
///     vec![0.0, 2.0, 4.0],
///     vec![2.0, 0.0, 4.0],
///     vec![4.0, 4.0, 0.0],
/// ])?;
/// let mut engine = MergeEngine::new(matrix);
/// let merged = engine.merge(0, 1)?;
/// assert_eq!(engine.members(merged)?, &[0, 1]);
/// assert_eq!(engine.len(), 2);
/// # Ok::<(), medaka_core::LinkageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MergeEngine<M> {
    matrix: M,
    members: BTreeMap<usize, Vec<usize>>,
}

impl<M: LinkageMatrix> MergeEngine<M> {
    /// Wraps `matrix`, mapping each leaf id to itself.
    pub fn new(matrix: M) -> Self {
        let members = (0..matrix.len()).map(|id| (id, vec![id])).collect();
        Self { matrix, members }
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    /// Returns whether no nodes remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Delegates the closest-pair query to the wrapped matrix.
    ///
    /// # Errors
    /// Propagates the matrix's [`LinkageError`].
    pub fn closest_pair(&self) -> Result<ClosestPair, LinkageError> {
        self.matrix.closest_pair()
    }

    /// Returns the original leaf ids absorbed by a live node, in merge
    /// order.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] when the id is not live.
    pub fn members(&self, id: usize) -> Result<&[usize], LinkageError> {
        self.members
            .get(&id)
            .map(Vec::as_slice)
            .ok_or(LinkageError::UnknownNode { id })
    }

    /// Merges two live nodes in the wrapped matrix and unions their
    /// membership entries under the new id.
    ///
    /// # Errors
    /// Propagates the matrix's [`LinkageError`]; the membership map is only
    /// touched after the matrix merge succeeds.
    pub fn merge(&mut self, a: usize, b: usize) -> Result<usize, LinkageError> {
        let new_id = self.matrix.merge(a, b)?;
        let mut absorbed = self
            .members
            .remove(&a)
            .ok_or(LinkageError::UnknownNode { id: a })?;
        let mut second = self
            .members
            .remove(&b)
            .ok_or(LinkageError::UnknownNode { id: b })?;
        absorbed.append(&mut second);
        self.members.insert(new_id, absorbed);
        Ok(new_id)
    }

    /// Returns the live node ids in ascending order.
    pub fn live_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.keys().copied()
    }
}
