//! Medaka core library.
//!
//! Clustering and optimization primitives for exploratory analysis of
//! biological point data: a validated point/center store, D²-seeded Lloyd
//! refinement and farthest-point greedy seeding, an agglomerative
//! average-linkage (UPGMA) builder over a reducing distance matrix, and a
//! local-search heuristic selecting explanatory SNP markers.

mod builder;
mod centers;
mod distance;
mod error;
mod kmeans;
mod linkage;
mod markers;
mod medaka;
mod points;
mod result;

pub use crate::{
    builder::{MedakaBuilder, SeedingStrategy},
    centers::CenterSet,
    distance::{euclidean_distance, squared_distance},
    error::{ClusterError, PointSetError, Result},
    linkage::{
        AgeTree, AverageLinkageMatrix, ClosestPair, Dendrogram, LinkageError, LinkageMatrix,
        MergeEngine, MergeRecord, TreePath, UpgmaOutcome, build_dendrogram, upgma_from_points,
    },
    markers::{MarkerError, MarkerPanel, MarkerTest, search_markers},
    medaka::Medaka,
    points::PointSet,
    result::ClusteringOutcome,
};
