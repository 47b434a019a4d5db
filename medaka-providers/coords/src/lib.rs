//! Plain-text ingestion for the medaka clustering pipeline.
//!
//! Two whitespace-token formats are supported: coordinate files (cluster
//! count, dimension, then a float stream consumed greedily one point at a
//! time) and binary marker-panel files (marker-set size, sample count, the
//! explain vector, then one marker per `n` bits).

mod errors;
mod reader;

pub use errors::CoordsError;
pub use reader::{
    CoordinateFile, MarkerFile, parse_coordinates, parse_marker_panel, read_coordinates,
    read_marker_panel,
};
