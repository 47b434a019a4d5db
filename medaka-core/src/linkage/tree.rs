//! Default dendrogram implementation.

use std::collections::BTreeMap;

use crate::linkage::{Dendrogram, LinkageError};

/// A weighted parent-child path recorded in an [`AgeTree`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreePath {
    /// Parent-side node id.
    pub from: usize,
    /// Child-side node id.
    pub to: usize,
    /// Path length.
    pub length: f64,
}

/// A rooted tree of aged nodes connected by weighted paths.
///
/// Node ids increase monotonically as the hierarchy grows, so the root of a
/// completed build is simply the highest id.
#[derive(Debug, Clone, Default)]
pub struct AgeTree {
    ages: BTreeMap<usize, f64>,
    paths: Vec<TreePath>,
}

impl AgeTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ages.len()
    }

    /// Returns whether the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    /// Returns every recorded path in insertion order.
    #[must_use]
    pub fn paths(&self) -> &[TreePath] {
        &self.paths
    }

    /// Returns the highest node id, which is the root once a build
    /// completes.
    #[must_use]
    pub fn root(&self) -> Option<usize> {
        self.ages.keys().next_back().copied()
    }
}

impl Dendrogram for AgeTree {
    fn add_node(&mut self, id: usize, age: f64) -> Result<(), LinkageError> {
        if self.ages.contains_key(&id) {
            return Err(LinkageError::DuplicateNode { id });
        }
        self.ages.insert(id, age);
        Ok(())
    }

    fn add_path(&mut self, from: usize, to: usize, length: f64) -> Result<(), LinkageError> {
        for id in [from, to] {
            if !self.ages.contains_key(&id) {
                return Err(LinkageError::UnknownNode { id });
            }
        }
        self.paths.push(TreePath { from, to, length });
        Ok(())
    }

    fn age(&self, id: usize) -> Result<f64, LinkageError> {
        self.ages
            .get(&id)
            .copied()
            .ok_or(LinkageError::UnknownNode { id })
    }
}
