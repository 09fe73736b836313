use thiserror::Error;

/// Errors returned by [`crate::RouteOptions::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteOptionsError {
    /// Fewer than two coordinates were supplied.
    #[error("at least two coordinates are required, got {count}")]
    TooFewCoordinates {
        /// Number of coordinates supplied.
        count: usize,
    },
    /// A coordinate lies outside the WGS84 range.
    #[error("coordinate {index} ({longitude}, {latitude}) is outside the valid range")]
    InvalidCoordinate {
        /// Position of the offending coordinate.
        index: usize,
        /// Longitude in degrees.
        longitude: f64,
        /// Latitude in degrees.
        latitude: f64,
    },
}
