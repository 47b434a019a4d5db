//! Error types for text ingestion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while reading or parsing an input file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CoordsError {
    /// File I/O failed while loading the input.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input ended before both header tokens were present.
    #[error("input is missing the `{name}` header token")]
    MissingHeader {
        /// Which header token was absent.
        name: &'static str,
    },
    /// A header token did not parse as a positive integer.
    #[error("header token `{name}` must be a positive integer (got `{token}`)")]
    InvalidHeader {
        /// Which header token was malformed.
        name: &'static str,
        /// The raw token encountered.
        token: String,
    },
    /// The coordinate stream ended partway through a point.
    #[error("input ends with a partial point: {got} of {dim} coordinates")]
    TrailingCoordinates {
        /// Coordinates read for the unfinished point.
        got: usize,
        /// Dimension every point requires.
        dim: usize,
    },
    /// No complete point could be formed from the coordinate stream.
    #[error("input contains no complete points")]
    NoPoints,
    /// A marker-panel token was not a `0` or `1` bit.
    #[error("expected a binary token in the {section} section, got `{token}`")]
    InvalidBit {
        /// Section of the file being scanned.
        section: &'static str,
        /// The raw token encountered.
        token: String,
    },
    /// The input ended before the explain vector was complete.
    #[error("input ends with a partial explain vector: {got} of {samples} bits")]
    TruncatedExplain {
        /// Bits read for the explain vector.
        got: usize,
        /// Bits the sample count requires.
        samples: usize,
    },
    /// The marker stream ended partway through a marker.
    #[error("input ends with a partial marker: {got} of {samples} bits")]
    TrailingMarker {
        /// Bits read for the unfinished marker.
        got: usize,
        /// Bits every marker requires.
        samples: usize,
    },
    /// No complete marker followed the explain vector.
    #[error("input contains no markers after the explain vector")]
    NoMarkers,
}

impl CoordsError {
    /// Return the stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "COORDS_IO",
            Self::MissingHeader { .. } => "COORDS_MISSING_HEADER",
            Self::InvalidHeader { .. } => "COORDS_INVALID_HEADER",
            Self::TrailingCoordinates { .. } => "COORDS_TRAILING_COORDINATES",
            Self::NoPoints => "COORDS_NO_POINTS",
            Self::InvalidBit { .. } => "COORDS_INVALID_BIT",
            Self::TruncatedExplain { .. } => "COORDS_TRUNCATED_EXPLAIN",
            Self::TrailingMarker { .. } => "COORDS_TRAILING_MARKER",
            Self::NoMarkers => "COORDS_NO_MARKERS",
        }
    }
}
