//! Seeding strategies for center-based clustering.

use rand::Rng;

use crate::{centers::CenterSet, error::Result, points::PointSet};

/// Seeds `count` centers by D² sampling: the first center is the first
/// point, and each subsequent center is drawn with probability proportional
/// to its squared minimum distance to the centers chosen so far.
///
/// The draw walks the cumulative weight sum and selects the first point
/// whose running total strictly exceeds the uniform draw, so zero-weight
/// points (those coinciding with an existing center) are never picked. When
/// every remaining point has zero weight the lowest-index point is used.
pub(crate) fn dsquared_seed<R: Rng>(
    points: &PointSet,
    count: usize,
    rng: &mut R,
) -> Result<CenterSet> {
    let mut centers = CenterSet::new_zeroed(count, points)?;
    centers.set(0, points.point(0)?.to_vec())?;

    for chosen in 1..count {
        let mut weights = Vec::with_capacity(points.len());
        let mut total = 0.0f64;
        for point in points.iter() {
            let distance = centers.min_distance_within(point, chosen)?;
            let weight = distance * distance;
            weights.push(weight);
            total += weight;
        }

        let selected = if total > 0.0 {
            weighted_pick(&weights, rng.gen_range(0.0..total))
        } else {
            // Every point coincides with an existing center; fall back to
            // the lowest index so the run stays total-order deterministic.
            0
        };
        centers.set(chosen, points.point(selected)?.to_vec())?;
    }
    Ok(centers)
}

/// Returns the first index whose cumulative weight strictly exceeds `draw`.
///
/// `draw` lies in `[0, total)`, so some prefix sum always exceeds it; the
/// final index is a guard against floating-point accumulation drift.
fn weighted_pick(weights: &[f64], draw: f64) -> usize {
    let mut acc = 0.0f64;
    for (index, weight) in weights.iter().enumerate() {
        acc += weight;
        if acc > draw {
            return index;
        }
    }
    weights.len().saturating_sub(1)
}

/// Seeds `count` centers by farthest-point greedy selection: the first
/// center is the first point, and each subsequent center is the point
/// maximizing its minimum distance to the centers chosen so far. Ties go to
/// the lowest point index.
pub(crate) fn farthest_seed(points: &PointSet, count: usize) -> Result<CenterSet> {
    let mut centers = CenterSet::new_zeroed(count, points)?;
    centers.set(0, points.point(0)?.to_vec())?;

    for chosen in 1..count {
        let mut best_index = 0;
        let mut best_distance = f64::NEG_INFINITY;
        for (index, point) in points.iter().enumerate() {
            let distance = centers.min_distance_within(point, chosen)?;
            if distance > best_distance {
                best_index = index;
                best_distance = distance;
            }
        }
        centers.set(chosen, points.point(best_index)?.to_vec())?;
    }
    Ok(centers)
}

#[cfg(test)]
mod tests {
    use super::weighted_pick;
    use rstest::rstest;

    #[rstest]
    #[case(&[1.0, 2.0, 3.0], 0.0, 0)]
    #[case(&[1.0, 2.0, 3.0], 0.5, 0)]
    #[case(&[1.0, 2.0, 3.0], 1.0, 1)]
    #[case(&[1.0, 2.0, 3.0], 2.5, 1)]
    #[case(&[1.0, 2.0, 3.0], 3.0, 2)]
    #[case(&[1.0, 2.0, 3.0], 5.999, 2)]
    fn walks_the_cumulative_sum(#[case] weights: &[f64], #[case] draw: f64, #[case] expected: usize) {
        assert_eq!(weighted_pick(weights, draw), expected);
    }

    #[test]
    fn skips_zero_weight_points() {
        // A point sitting exactly on a center must never be drawn.
        assert_eq!(weighted_pick(&[0.0, 4.0, 0.0, 4.0], 4.0), 3);
        assert_eq!(weighted_pick(&[0.0, 4.0, 0.0, 4.0], 3.999), 1);
    }
}
