//! Lloyd's iterative relocation loop.

use crate::{
    centers::CenterSet,
    error::{ClusterError, Result},
    points::PointSet,
};

/// A refinement pass ends once every coordinate of every center moved by at
/// most this much.
const CONVERGENCE_TOLERANCE: f64 = 0.001;

/// Runs relocate-and-recompute passes until the centers stabilise, returning
/// the number of passes executed.
///
/// # Errors
/// Returns [`ClusterError::EmptyCluster`] when a pass strands a center with
/// no assigned points; the centroid of zero points is undefined and the
/// failure is surfaced rather than guessed around.
pub(crate) fn refine(points: &PointSet, centers: &mut CenterSet) -> Result<usize> {
    let mut iterations = 0;
    loop {
        let shift = refine_step(points, centers)?;
        iterations += 1;
        if shift <= CONVERGENCE_TOLERANCE {
            return Ok(iterations);
        }
    }
}

/// Executes one relocate-and-recompute pass and returns the largest absolute
/// coordinate shift of any center.
///
/// Buckets are rebuilt from scratch each pass: every point joins the bucket
/// of its nearest center (ties to the lowest center index), then each center
/// moves to its bucket's coordinate-wise mean.
pub(crate) fn refine_step(points: &PointSet, centers: &mut CenterSet) -> Result<f64> {
    let snapshot = centers.to_vec();
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); centers.len()];
    for (index, point) in points.iter().enumerate() {
        let (nearest, _) = centers.nearest(point)?;
        if let Some(bucket) = buckets.get_mut(nearest) {
            bucket.push(index);
        }
    }

    let mut max_shift = 0.0f64;
    for (center_index, bucket) in buckets.iter().enumerate() {
        if bucket.is_empty() {
            return Err(ClusterError::EmptyCluster {
                center: center_index,
            });
        }
        let centroid = centroid_of(points, bucket)?;
        if let Some(previous) = snapshot.get(center_index) {
            for (new, old) in centroid.iter().zip(previous.iter()) {
                let shift = (new - old).abs();
                if shift > max_shift {
                    max_shift = shift;
                }
            }
        }
        centers.set(center_index, centroid)?;
    }
    Ok(max_shift)
}

/// Computes the nearest-center index for every point, in point order.
pub(crate) fn assignments(points: &PointSet, centers: &CenterSet) -> Result<Vec<usize>> {
    let mut out = Vec::with_capacity(points.len());
    for point in points.iter() {
        let (nearest, _) = centers.nearest(point)?;
        out.push(nearest);
    }
    Ok(out)
}

fn centroid_of(points: &PointSet, bucket: &[usize]) -> Result<Vec<f64>> {
    let mut sums = vec![0.0f64; points.dim()];
    for &index in bucket {
        for (sum, &coordinate) in sums.iter_mut().zip(points.point(index)?.iter()) {
            *sum += coordinate;
        }
    }
    let count = bucket.len() as f64;
    for sum in &mut sums {
        *sum /= count;
    }
    Ok(sums)
}
