//! Agglomerative average-linkage (UPGMA) clustering.
//!
//! The builder is written against two small traits so it can be exercised
//! with mock collaborators: a [`LinkageMatrix`] that answers closest-pair
//! queries and merges rows, and a [`Dendrogram`] that records nodes, ages,
//! and weighted parent-child paths. [`AverageLinkageMatrix`] and
//! [`AgeTree`] are the default implementations; [`MergeEngine`] layers
//! membership bookkeeping on top of any matrix.

mod average;
mod engine;
mod tree;
mod upgma;

pub use self::average::AverageLinkageMatrix;
pub use self::engine::MergeEngine;
pub use self::tree::{AgeTree, TreePath};
pub use self::upgma::{MergeRecord, UpgmaOutcome, build_dendrogram, upgma_from_points};

use thiserror::Error;

use crate::error::PointSetError;

/// The closest pair of live nodes reported by a [`LinkageMatrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    /// First node of the pair.
    pub left: usize,
    /// Second node of the pair.
    pub right: usize,
    /// Distance between the two nodes.
    pub distance: f64,
}

/// A square, symmetric pairwise-distance matrix over live node ids that
/// shrinks by one row per merge.
///
/// Merging removes both inputs and introduces one new node whose id is one
/// greater than the current maximum live id; removed ids never return.
pub trait LinkageMatrix {
    /// Returns the number of live nodes.
    fn len(&self) -> usize;

    /// Returns whether no nodes remain.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the distance between two live nodes.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] when either id is not live.
    fn distance(&self, a: usize, b: usize) -> Result<f64, LinkageError>;

    /// Returns the closest pair of live nodes. Tie-breaking is an
    /// implementation concern; [`AverageLinkageMatrix`] keeps the lowest
    /// pair of ids.
    ///
    /// # Errors
    /// Returns [`LinkageError::InsufficientNodes`] when fewer than two
    /// nodes remain.
    fn closest_pair(&self) -> Result<ClosestPair, LinkageError>;

    /// Merges two live nodes, updating all remaining distances per the
    /// matrix's linkage rule, and returns the id of the new node.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] when either id is not live and
    /// [`LinkageError::SelfMerge`] when both ids are equal.
    fn merge(&mut self, a: usize, b: usize) -> Result<usize, LinkageError>;
}

/// A rooted tree recording node ages and weighted parent-child paths.
pub trait Dendrogram {
    /// Records a node with the given age.
    ///
    /// # Errors
    /// Returns [`LinkageError::DuplicateNode`] when the id already exists.
    fn add_node(&mut self, id: usize, age: f64) -> Result<(), LinkageError>;

    /// Records a weighted path between two existing nodes.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] when either endpoint is
    /// missing.
    fn add_path(&mut self, from: usize, to: usize, length: f64) -> Result<(), LinkageError>;

    /// Returns the age of a node.
    ///
    /// # Errors
    /// Returns [`LinkageError::UnknownNode`] when the id is missing.
    fn age(&self, id: usize) -> Result<f64, LinkageError>;
}

/// Error type produced by linkage matrices, dendrograms, and the UPGMA
/// builder.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinkageError {
    /// A node id was not live (or not present in the tree).
    #[error("node {id} is not live")]
    UnknownNode {
        /// The offending node id.
        id: usize,
    },
    /// An operation needed at least two live nodes.
    #[error("operation requires at least two live nodes ({live} remain)")]
    InsufficientNodes {
        /// Number of nodes still live.
        live: usize,
    },
    /// A node cannot be merged with itself.
    #[error("cannot merge node {id} with itself")]
    SelfMerge {
        /// The node id supplied on both sides.
        id: usize,
    },
    /// A tree node id was recorded twice.
    #[error("node {id} already exists in the dendrogram")]
    DuplicateNode {
        /// The duplicated node id.
        id: usize,
    },
    /// The supplied distance matrix was not square and symmetric.
    #[error("distance matrix row {row} has {got} entries but {expected} were expected")]
    MalformedMatrix {
        /// Index of the malformed row.
        row: usize,
        /// Number of entries actually supplied.
        got: usize,
        /// Number of entries implied by the row count.
        expected: usize,
    },
    /// A point-set operation failed while building the matrix.
    #[error(transparent)]
    PointSet(#[from] PointSetError),
}

impl LinkageError {
    /// Return the stable machine-readable code for this error.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownNode { .. } => "LINKAGE_UNKNOWN_NODE",
            Self::InsufficientNodes { .. } => "LINKAGE_INSUFFICIENT_NODES",
            Self::SelfMerge { .. } => "LINKAGE_SELF_MERGE",
            Self::DuplicateNode { .. } => "LINKAGE_DUPLICATE_NODE",
            Self::MalformedMatrix { .. } => "LINKAGE_MALFORMED_MATRIX",
            Self::PointSet(inner) => inner.code(),
        }
    }
}
