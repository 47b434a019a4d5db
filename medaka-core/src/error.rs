//! Error types for the medaka core library.
//!
//! Defines error enums exposed by the public API and a convenient result
//! alias. Every variant carries a stable machine-readable code so callers
//! (and the CLI) can report failures without matching on display strings.

use thiserror::Error;

/// An error produced while constructing or reading a [`crate::PointSet`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PointSetError {
    /// The point set contained no points.
    #[error("point set contains no points")]
    Empty,
    /// The first point had zero coordinates, so no dimension can be fixed.
    #[error("points must have positive dimension")]
    ZeroDimension,
    /// A point's length disagreed with the dimension fixed by the first point.
    #[error("point {index} has {got} coordinates but the point set dimension is {expected}")]
    RaggedPoint {
        /// Index of the offending point.
        index: usize,
        /// Dimension fixed by the first point.
        expected: usize,
        /// Number of coordinates actually supplied.
        got: usize,
    },
    /// Two vectors of different dimension were compared.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Dimensionality of the left-hand vector.
        left: usize,
        /// Dimensionality of the right-hand vector.
        right: usize,
    },
    /// A point or center index was outside the valid range.
    #[error("index {index} is out of bounds for length {len}")]
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// Length of the indexed collection.
        len: usize,
    },
}

impl PointSetError {
    /// Return the stable machine-readable code for this error.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty => "POINT_SET_EMPTY",
            Self::ZeroDimension => "POINT_SET_ZERO_DIMENSION",
            Self::RaggedPoint { .. } => "POINT_SET_RAGGED_POINT",
            Self::DimensionMismatch { .. } => "POINT_SET_DIMENSION_MISMATCH",
            Self::OutOfBounds { .. } => "POINT_SET_OUT_OF_BOUNDS",
        }
    }
}

/// Error type produced when configuring or running a clustering pass.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ClusterError {
    /// The requested cluster count was zero.
    #[error("cluster count must be at least 1 (got 0)")]
    ZeroClusterCount,
    /// The requested cluster count exceeded the point count.
    #[error("cluster count must be between 1 and {points} (got {got})")]
    InvalidClusterCount {
        /// The invalid count supplied by the caller.
        got: usize,
        /// Number of points available for clustering.
        points: usize,
    },
    /// A nearest-center query restricted itself to an invalid prefix.
    #[error("center limit must be between 1 and {centers} (got {limit})")]
    InvalidCenterLimit {
        /// The prefix length supplied by the caller.
        limit: usize,
        /// Number of centers actually available.
        centers: usize,
    },
    /// A refinement pass left a center with no assigned points, so its
    /// centroid is undefined.
    #[error("refinement produced an empty cluster for center {center}")]
    EmptyCluster {
        /// Index of the center whose bucket was empty.
        center: usize,
    },
    /// A point-set operation failed while running the algorithm.
    #[error(transparent)]
    PointSet(#[from] PointSetError),
}

impl ClusterError {
    /// Return the stable machine-readable code for this error.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ZeroClusterCount => "CLUSTER_ZERO_COUNT",
            Self::InvalidClusterCount { .. } => "CLUSTER_INVALID_COUNT",
            Self::InvalidCenterLimit { .. } => "CLUSTER_INVALID_CENTER_LIMIT",
            Self::EmptyCluster { .. } => "CLUSTER_EMPTY_CLUSTER",
            Self::PointSet(inner) => inner.code(),
        }
    }
}

/// Convenient alias for results returned by the clustering API.
pub type Result<T> = core::result::Result<T, ClusterError>;
