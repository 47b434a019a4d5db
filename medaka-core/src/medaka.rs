//! Core clustering orchestration for the medaka library.
//!
//! Provides the [`Medaka`] runtime entry point that seeds centers with the
//! configured strategy and, for D² seeding, refines them with Lloyd's
//! iterative relocation until the centers stabilise.

use std::num::NonZeroUsize;

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::{
    Result,
    builder::SeedingStrategy,
    centers::CenterSet,
    error::ClusterError,
    kmeans::{assignments, dsquared_seed, farthest_seed, refine},
    points::PointSet,
    result::ClusteringOutcome,
};

/// Entry point for running a center-based clustering pass.
///
/// # Examples
/// ```
/// use medaka_core::{MedakaBuilder, PointSet, SeedingStrategy};
///
/// let points = PointSet::new(vec![
///     vec![0.0, 0.0],
///     vec![0.0, 1.0],
///     vec![10.0, 0.0],
///     vec![10.0, 1.0],
/// ])?;
/// let medaka = MedakaBuilder::new()
///     .with_cluster_count(2)
///     .with_seed(7)
///     .build()?;
/// let outcome = medaka.run(&points)?;
/// assert_eq!(outcome.centers().len(), 2);
/// assert_eq!(outcome.assignments().len(), 4);
/// # Ok::<(), medaka_core::ClusterError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Medaka {
    cluster_count: NonZeroUsize,
    strategy: SeedingStrategy,
    seed: Option<u64>,
}

impl Medaka {
    pub(crate) fn new(
        cluster_count: NonZeroUsize,
        strategy: SeedingStrategy,
        seed: Option<u64>,
    ) -> Self {
        Self {
            cluster_count,
            strategy,
            seed,
        }
    }

    /// Returns the number of clusters this instance will request.
    #[must_use]
    pub fn cluster_count(&self) -> NonZeroUsize {
        self.cluster_count
    }

    /// Returns the seeding strategy that will be used when running.
    #[must_use]
    pub fn strategy(&self) -> SeedingStrategy {
        self.strategy
    }

    /// Returns the fixed random seed, if one was configured.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Executes a clustering pass against `points`.
    ///
    /// D² seeding runs the full Lloyd refinement loop; farthest-point
    /// seeding is an approximation algorithm in its own right and returns
    /// its seeds directly.
    ///
    /// # Errors
    /// Returns [`ClusterError::InvalidClusterCount`] when the configured
    /// count exceeds the number of points, and
    /// [`ClusterError::EmptyCluster`] when a refinement pass strands a
    /// center with no assigned points.
    #[instrument(
        name = "core.run",
        err,
        skip(self, points),
        fields(
            points = points.len(),
            dim = points.dim(),
            cluster_count = %self.cluster_count,
            strategy = ?self.strategy,
        ),
    )]
    pub fn run(&self, points: &PointSet) -> Result<ClusteringOutcome> {
        let count = self.cluster_count.get();
        let (centers, iterations) = match self.strategy {
            SeedingStrategy::DSquared => {
                let mut rng = match self.seed {
                    Some(seed) => SmallRng::seed_from_u64(seed),
                    None => SmallRng::from_entropy(),
                };
                let mut centers = dsquared_seed(points, count, &mut rng)?;
                let iterations = refine(points, &mut centers)?;
                (centers, iterations)
            }
            SeedingStrategy::FarthestPoint => (farthest_seed(points, count)?, 0),
        };

        let assignments = assignments(points, &centers)?;
        let distortion = centers.distortion(points)?;
        info!(distortion, iterations, "clustering pass completed");
        Ok(ClusteringOutcome::new(
            centers.to_vec(),
            assignments,
            distortion,
            iterations,
        ))
    }
}
