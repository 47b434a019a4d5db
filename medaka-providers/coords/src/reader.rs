//! Whitespace-token parsers for the coordinate and marker-panel formats.

use std::fs;
use std::path::Path;

use crate::errors::CoordsError;

/// A parsed coordinate file: the requested cluster count, the point
/// dimension, and the raw points (validated downstream by the core
/// `PointSet` constructor).
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateFile {
    /// Number of clusters the file requests.
    pub cluster_count: usize,
    /// Dimensionality of every point.
    pub dim: usize,
    /// Points formed by greedily consuming `dim` floats at a time.
    pub points: Vec<Vec<f64>>,
}

/// A parsed marker-panel file: the requested marker-set size, the explain
/// vector, and the raw markers (validated downstream by the core
/// `MarkerPanel` constructor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFile {
    /// Number of markers the file asks the search to select.
    pub marker_count: usize,
    /// Binary explain vector, one bit per sample.
    pub explain: Vec<bool>,
    /// Markers formed by greedily consuming one bit per sample.
    pub markers: Vec<Vec<bool>>,
}

/// Reads and parses a coordinate file from disk.
///
/// # Errors
/// Returns [`CoordsError::Io`] when the file cannot be read, plus any
/// [`parse_coordinates`] error.
pub fn read_coordinates(path: &Path) -> Result<CoordinateFile, CoordsError> {
    let input = fs::read_to_string(path).map_err(|source| CoordsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_coordinates(&input)
}

/// Parses the coordinate format: cluster count, dimension, then a float
/// stream.
///
/// Non-numeric tokens encountered while scanning for coordinates are
/// skipped; points are formed by greedily consuming `dim` valid floats at a
/// time until the input is exhausted.
///
/// # Examples
/// ```
/// use medaka_providers_coords::parse_coordinates;
///
/// let file = parse_coordinates("2 2  0.0 0.0  # comment\n 10.0 1.0")?;
/// assert_eq!(file.cluster_count, 2);
/// assert_eq!(file.points, vec![vec![0.0, 0.0], vec![10.0, 1.0]]);
/// # Ok::<(), medaka_providers_coords::CoordsError>(())
/// ```
///
/// # Errors
/// Returns [`CoordsError::MissingHeader`] or [`CoordsError::InvalidHeader`]
/// for a malformed header, [`CoordsError::TrailingCoordinates`] when the
/// stream ends partway through a point, and [`CoordsError::NoPoints`] when
/// no complete point exists.
pub fn parse_coordinates(input: &str) -> Result<CoordinateFile, CoordsError> {
    let mut tokens = input.split_whitespace();
    let cluster_count = header(tokens.next(), "cluster count")?;
    let dim = header(tokens.next(), "dimension")?;

    let mut points = Vec::new();
    let mut current = Vec::with_capacity(dim);
    for token in tokens {
        let Ok(value) = token.parse::<f64>() else {
            // Stray annotations inside the coordinate stream are skipped.
            continue;
        };
        current.push(value);
        if current.len() == dim {
            points.push(std::mem::replace(&mut current, Vec::with_capacity(dim)));
        }
    }
    if !current.is_empty() {
        return Err(CoordsError::TrailingCoordinates {
            got: current.len(),
            dim,
        });
    }
    if points.is_empty() {
        return Err(CoordsError::NoPoints);
    }
    Ok(CoordinateFile {
        cluster_count,
        dim,
        points,
    })
}

/// Reads and parses a marker-panel file from disk.
///
/// # Errors
/// Returns [`CoordsError::Io`] when the file cannot be read, plus any
/// [`parse_marker_panel`] error.
pub fn read_marker_panel(path: &Path) -> Result<MarkerFile, CoordsError> {
    let input = fs::read_to_string(path).map_err(|source| CoordsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_marker_panel(&input)
}

/// Parses the marker-panel format: marker-set size, sample count, the
/// explain vector, then one marker per `n` bits.
///
/// Marker data is exact, so unlike the coordinate stream every token must be
/// a literal `0` or `1`.
///
/// # Errors
/// Returns [`CoordsError::MissingHeader`]/[`CoordsError::InvalidHeader`] for
/// a malformed header, [`CoordsError::InvalidBit`] for non-binary tokens,
/// [`CoordsError::TrailingMarker`] when the stream ends partway through a
/// marker, and [`CoordsError::NoMarkers`] when no marker follows the
/// explain vector.
pub fn parse_marker_panel(input: &str) -> Result<MarkerFile, CoordsError> {
    let mut tokens = input.split_whitespace();
    let marker_count = header(tokens.next(), "marker count")?;
    let samples = header(tokens.next(), "sample count")?;

    let mut explain = Vec::with_capacity(samples);
    while explain.len() < samples {
        let token = tokens.next().ok_or(CoordsError::TruncatedExplain {
            got: explain.len(),
            samples,
        })?;
        explain.push(bit(token, "explain")?);
    }

    let mut markers = Vec::new();
    let mut current = Vec::with_capacity(samples);
    for token in tokens {
        current.push(bit(token, "marker")?);
        if current.len() == samples {
            markers.push(std::mem::replace(&mut current, Vec::with_capacity(samples)));
        }
    }
    if !current.is_empty() {
        return Err(CoordsError::TrailingMarker {
            got: current.len(),
            samples,
        });
    }
    if markers.is_empty() {
        return Err(CoordsError::NoMarkers);
    }
    Ok(MarkerFile {
        marker_count,
        explain,
        markers,
    })
}

fn header(token: Option<&str>, name: &'static str) -> Result<usize, CoordsError> {
    let token = token.ok_or(CoordsError::MissingHeader { name })?;
    match token.parse::<usize>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(CoordsError::InvalidHeader {
            name,
            token: token.to_owned(),
        }),
    }
}

fn bit(token: &str, section: &'static str) -> Result<bool, CoordsError> {
    match token {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(CoordsError::InvalidBit {
            section,
            token: other.to_owned(),
        }),
    }
}
