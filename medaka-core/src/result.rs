//! Result types for clustering runs.

/// Represents the output of a [`crate::Medaka::run`] invocation.
///
/// Centers are handed over by value, so the caller owns them outright and
/// nothing inside the library can alias or mutate them afterwards.
///
/// # Examples
/// ```
/// use medaka_core::{MedakaBuilder, PointSet, SeedingStrategy};
///
/// let points = PointSet::new(vec![vec![0.0], vec![1.0], vec![8.0]])?;
/// let medaka = MedakaBuilder::new()
///     .with_cluster_count(2)
///     .with_strategy(SeedingStrategy::FarthestPoint)
///     .build()?;
/// let outcome = medaka.run(&points)?;
/// assert_eq!(outcome.centers().len(), 2);
/// assert_eq!(outcome.assignments().len(), 3);
/// # Ok::<(), medaka_core::ClusterError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusteringOutcome {
    centers: Vec<Vec<f64>>,
    assignments: Vec<usize>,
    distortion: f64,
    iterations: usize,
}

impl ClusteringOutcome {
    pub(crate) fn new(
        centers: Vec<Vec<f64>>,
        assignments: Vec<usize>,
        distortion: f64,
        iterations: usize,
    ) -> Self {
        Self {
            centers,
            assignments,
            distortion,
            iterations,
        }
    }

    /// Returns the final centers, one vector per cluster.
    #[must_use]
    pub fn centers(&self) -> &[Vec<f64>] {
        &self.centers
    }

    /// Returns the index of the nearest center for every point, in point
    /// order. Ties go to the lowest center index.
    #[must_use]
    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// Returns the mean squared distance from every point to its nearest
    /// center.
    #[must_use]
    pub fn distortion(&self) -> f64 {
        self.distortion
    }

    /// Returns how many refinement iterations ran. Zero for strategies that
    /// seed without refining.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}
