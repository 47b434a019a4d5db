//! Local-search selection of explanatory SNP markers.
//!
//! Given a binary explain vector over the samples, a candidate set of
//! markers is scored by the fraction of differing sample pairs that at
//! least one chosen marker also distinguishes. The search hill-climbs over
//! single-position substitutions with greedy first-improvement acceptance;
//! a single run can land in different local optima depending on marker
//! ordering, and no randomized restarts are attempted.

use thiserror::Error;
use tracing::{info, instrument};

/// Error type produced by marker panels and the local search.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MarkerError {
    /// The panel contained no markers.
    #[error("marker panel contains no markers")]
    Empty,
    /// The first marker covered zero samples.
    #[error("markers must cover at least one sample")]
    ZeroSamples,
    /// A marker's sample count disagreed with the first marker's.
    #[error("marker {index} covers {got} samples but the panel covers {expected}")]
    RaggedMarker {
        /// Index of the offending marker.
        index: usize,
        /// Sample count fixed by the first marker.
        expected: usize,
        /// Sample count actually supplied.
        got: usize,
    },
    /// The requested marker-set size was zero or exceeded the panel.
    #[error("marker count must be between 1 and {markers} (got {got})")]
    InvalidMarkerCount {
        /// The invalid count supplied by the caller.
        got: usize,
        /// Number of markers in the panel.
        markers: usize,
    },
    /// The explain vector's length disagreed with the panel's sample count.
    #[error("explain vector covers {explain} samples but the panel covers {samples}")]
    ExplainLengthMismatch {
        /// Length of the explain vector.
        explain: usize,
        /// Sample count of the panel.
        samples: usize,
    },
    /// The explain vector was constant, so no sample pair needs explaining
    /// and the score's denominator would be zero.
    #[error("explain vector is uniform; no sample pairs need explaining")]
    UniformExplainVector,
}

impl MarkerError {
    /// Return the stable machine-readable code for this error.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Empty => "MARKER_PANEL_EMPTY",
            Self::ZeroSamples => "MARKER_ZERO_SAMPLES",
            Self::RaggedMarker { .. } => "MARKER_RAGGED",
            Self::InvalidMarkerCount { .. } => "MARKER_INVALID_COUNT",
            Self::ExplainLengthMismatch { .. } => "MARKER_EXPLAIN_LENGTH_MISMATCH",
            Self::UniformExplainVector => "MARKER_UNIFORM_EXPLAIN",
        }
    }
}

/// A validated marker-major binary matrix: one row per marker, one column
/// per sample.
///
/// # Examples
/// ```
/// use medaka_core::MarkerPanel;
///
/// let panel = MarkerPanel::new(vec![
///     vec![true, false, true],
///     vec![false, false, true],
/// ])?;
/// assert_eq!(panel.len(), 2);
/// assert_eq!(panel.samples(), 3);
/// # Ok::<(), medaka_core::MarkerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPanel {
    markers: Vec<Vec<bool>>,
    samples: usize,
}

impl MarkerPanel {
    /// Validates and wraps a marker matrix.
    ///
    /// # Errors
    /// Returns [`MarkerError::Empty`] when no markers are supplied,
    /// [`MarkerError::ZeroSamples`] when the first marker is empty, and
    /// [`MarkerError::RaggedMarker`] when sample counts disagree.
    pub fn new(markers: Vec<Vec<bool>>) -> Result<Self, MarkerError> {
        let Some(first) = markers.first() else {
            return Err(MarkerError::Empty);
        };
        let samples = first.len();
        if samples == 0 {
            return Err(MarkerError::ZeroSamples);
        }
        for (index, marker) in markers.iter().enumerate() {
            if marker.len() != samples {
                return Err(MarkerError::RaggedMarker {
                    index,
                    expected: samples,
                    got: marker.len(),
                });
            }
        }
        Ok(Self { markers, samples })
    }

    /// Returns the number of markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns whether the panel holds no markers. Construction rejects
    /// empty panels, so this is always `false`; it exists for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns the number of samples every marker covers.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }

    fn distinguishes(&self, marker: usize, left: usize, right: usize) -> bool {
        self.markers
            .get(marker)
            .is_some_and(|row| row.get(left) != row.get(right))
    }
}

/// An ordered set of marker indices together with its explanatory score.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTest {
    indices: Vec<usize>,
    score: f64,
}

impl MarkerTest {
    /// Returns the chosen marker indices, in slot order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the fraction of differing sample pairs the chosen markers
    /// distinguish, in `[0, 1]`.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Hill-climbs from the first `count` markers towards a set maximizing the
/// explanatory score against `explain`.
///
/// Every pass tries each slot against every replacement marker and adopts
/// the first strict improvement immediately; the search stops when a full
/// pass accepts no change. A slot may transiently duplicate another slot's
/// marker if that scores better.
///
/// # Errors
/// Returns [`MarkerError::InvalidMarkerCount`] when `count` is zero or
/// exceeds the panel, [`MarkerError::ExplainLengthMismatch`] when `explain`
/// does not cover the panel's samples, and
/// [`MarkerError::UniformExplainVector`] when no sample pair differs in
/// `explain` (the score would divide by zero).
#[instrument(
    name = "core.marker_search",
    err,
    skip(panel, explain),
    fields(markers = panel.len(), samples = panel.samples(), count = count),
)]
pub fn search_markers(
    panel: &MarkerPanel,
    explain: &[bool],
    count: usize,
) -> Result<MarkerTest, MarkerError> {
    if count == 0 || count > panel.len() {
        return Err(MarkerError::InvalidMarkerCount {
            got: count,
            markers: panel.len(),
        });
    }
    if explain.len() != panel.samples() {
        return Err(MarkerError::ExplainLengthMismatch {
            explain: explain.len(),
            samples: panel.samples(),
        });
    }

    let pairs = differing_pairs(explain);
    if pairs.is_empty() {
        return Err(MarkerError::UniformExplainVector);
    }

    let mut indices: Vec<usize> = (0..count).collect();
    let mut best_score = score_of(panel, &indices, &pairs);
    loop {
        let mut improved = false;
        for slot in 0..count {
            for candidate in 0..panel.len() {
                let Some(current) = indices.get(slot).copied() else {
                    continue;
                };
                if candidate == current {
                    continue;
                }
                if let Some(entry) = indices.get_mut(slot) {
                    *entry = candidate;
                }
                let attempt = score_of(panel, &indices, &pairs);
                if attempt > best_score {
                    best_score = attempt;
                    improved = true;
                } else if let Some(entry) = indices.get_mut(slot) {
                    *entry = current;
                }
            }
        }
        if !improved {
            break;
        }
    }

    info!(score = best_score, "marker search converged");
    Ok(MarkerTest {
        indices,
        score: best_score,
    })
}

/// Sample pairs whose explain bits differ; only these need explaining.
fn differing_pairs(explain: &[bool]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, &left) in explain.iter().enumerate() {
        for (j, &right) in explain.iter().enumerate().skip(i + 1) {
            if left != right {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

fn score_of(panel: &MarkerPanel, indices: &[usize], pairs: &[(usize, usize)]) -> f64 {
    let explained = pairs
        .iter()
        .filter(|&&(left, right)| {
            indices
                .iter()
                .any(|&marker| panel.distinguishes(marker, left, right))
        })
        .count();
    explained as f64 / pairs.len() as f64
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn panel() -> MarkerPanel {
        // Marker 0 is uninformative; marker 1 splits samples {0,1} from
        // {2,3}; marker 2 splits sample 3 from the rest.
        MarkerPanel::new(vec![
            vec![false, false, false, false],
            vec![false, false, true, true],
            vec![false, false, false, true],
        ])
        .expect("valid panel")
    }

    #[test]
    fn rejects_empty_panels() {
        let err = MarkerPanel::new(vec![]).expect_err("empty panels are invalid");
        assert_eq!(err, MarkerError::Empty);
    }

    #[test]
    fn rejects_ragged_markers() {
        let err = MarkerPanel::new(vec![vec![true, false], vec![true]])
            .expect_err("ragged markers are invalid");
        assert_eq!(
            err,
            MarkerError::RaggedMarker {
                index: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    fn rejects_out_of_range_counts(#[case] count: usize) {
        let err = search_markers(&panel(), &[true, true, false, false], count)
            .expect_err("count is out of range");
        assert_eq!(err, MarkerError::InvalidMarkerCount { got: count, markers: 3 });
    }

    #[test]
    fn rejects_mismatched_explain_length() {
        let err = search_markers(&panel(), &[true, false], 1)
            .expect_err("explain length is wrong");
        assert_eq!(err, MarkerError::ExplainLengthMismatch { explain: 2, samples: 4 });
    }

    #[rstest]
    #[case(&[false, false, false, false])]
    #[case(&[true, true, true, true])]
    fn rejects_uniform_explain_vectors(#[case] explain: &[bool]) {
        let err = search_markers(&panel(), explain, 1)
            .expect_err("uniform explain vectors have no pairs to explain");
        assert_eq!(err, MarkerError::UniformExplainVector);
    }

    #[test]
    fn climbs_away_from_the_uninformative_marker() {
        // Explain bits follow marker 1 exactly, so the search must swap the
        // initial uninformative marker 0 for marker 1 and reach score 1.
        let test = search_markers(&panel(), &[false, false, true, true], 1)
            .expect("search must succeed");
        assert_eq!(test.indices(), &[1]);
        assert!((test.score() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn combines_markers_to_cover_all_pairs() {
        // Explaining {0,1} vs {2} vs {3} splits needs both informative
        // markers; the pair (2,3) is only distinguished by marker 2.
        let explain = [false, false, true, false];
        let test = search_markers(&panel(), &explain, 2).expect("search must succeed");
        assert!((test.score() - 1.0).abs() < 1e-12);
        assert!(test.indices().contains(&1) || test.indices().contains(&2));
    }

    #[test]
    fn search_never_scores_below_the_initial_set() {
        let explain = [false, true, false, true];
        let initial_pairs = differing_pairs(&explain);
        let initial = score_of(&panel(), &[0, 1], &initial_pairs);
        let test = search_markers(&panel(), &explain, 2).expect("search must succeed");
        assert!(test.score() >= initial);
    }

    proptest! {
        /// The score is always a fraction of explained pairs.
        #[test]
        fn score_stays_in_unit_interval(
            rows in prop::collection::vec(prop::collection::vec(any::<bool>(), 5), 1..6),
            explain in prop::collection::vec(any::<bool>(), 5),
            count in 1usize..3,
        ) {
            let panel = MarkerPanel::new(rows).expect("generated panel is valid");
            let count = count.min(panel.len());
            match search_markers(&panel, &explain, count) {
                Ok(test) => {
                    prop_assert!(test.score() >= 0.0);
                    prop_assert!(test.score() <= 1.0);
                    prop_assert_eq!(test.indices().len(), count);
                }
                Err(MarkerError::UniformExplainVector) => {}
                Err(other) => return Err(TestCaseError::fail(format!("unexpected error: {other:?}"))),
            }
        }
    }
}
