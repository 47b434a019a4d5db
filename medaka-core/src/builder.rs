//! Builder utilities for configuring clustering runs.
//!
//! Exposes the seeding strategy selection surface and builder validation
//! used before constructing [`Medaka`] instances.

use std::num::NonZeroUsize;

use crate::{Result, error::ClusterError, medaka::Medaka};

/// Selects how a [`Medaka`] run chooses its initial centers.
///
/// The set of strategies is fixed and small, so it is a closed enum rather
/// than an open trait hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingStrategy {
    /// Probability-weighted seeding proportional to squared distance to the
    /// nearest existing center, followed by Lloyd refinement.
    DSquared,
    /// Deterministic greedy k-center seeding; no refinement pass.
    FarthestPoint,
}

/// Configures and constructs [`Medaka`] instances.
///
/// # Examples
/// ```
/// use medaka_core::{MedakaBuilder, SeedingStrategy};
///
/// let medaka = MedakaBuilder::new()
///     .with_cluster_count(3)
///     .with_strategy(SeedingStrategy::FarthestPoint)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(medaka.cluster_count().get(), 3);
/// assert_eq!(medaka.strategy(), SeedingStrategy::FarthestPoint);
/// ```
#[derive(Debug, Clone)]
pub struct MedakaBuilder {
    cluster_count: usize,
    strategy: SeedingStrategy,
    seed: Option<u64>,
}

impl Default for MedakaBuilder {
    fn default() -> Self {
        Self {
            cluster_count: 2,
            strategy: SeedingStrategy::DSquared,
            seed: None,
        }
    }
}

impl MedakaBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of clusters to request.
    #[must_use]
    pub fn with_cluster_count(mut self, count: usize) -> Self {
        self.cluster_count = count;
        self
    }

    /// Returns the configured cluster count.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Sets the seeding strategy to use when running.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SeedingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the currently configured seeding strategy.
    #[must_use]
    pub fn strategy(&self) -> SeedingStrategy {
        self.strategy
    }

    /// Fixes the random seed so D² seeding becomes reproducible.
    ///
    /// Without a seed the generator draws fresh entropy per run.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`Medaka`] instance.
    ///
    /// The cluster count is also checked against the point count at run
    /// time, since the builder does not know the data yet.
    ///
    /// # Errors
    /// Returns [`ClusterError::ZeroClusterCount`] when the cluster count is
    /// zero.
    pub fn build(self) -> Result<Medaka> {
        let cluster_count =
            NonZeroUsize::new(self.cluster_count).ok_or(ClusterError::ZeroClusterCount)?;
        Ok(Medaka::new(cluster_count, self.strategy, self.seed))
    }
}
