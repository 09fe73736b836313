use thiserror::Error;

use crate::{Attribute, polyline::PolylineError};

/// Errors raised while decoding a directions response.
///
/// Any of these fails the whole response; no partial routes are returned.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not JSON of the expected shape.
    #[error("malformed directions response: {source}")]
    Malformed {
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// The service reported a failure code.
    #[error("directions service returned {code}: {message}")]
    Unsuccessful {
        /// Status code such as `NoRoute` or `InvalidInput`.
        code: String,
        /// Accompanying message, empty when absent.
        message: String,
    },
    /// An overview was requested but the route carries no geometry.
    #[error("route {route} has no geometry")]
    MissingGeometry {
        /// Index of the route in the response.
        route: usize,
    },
    /// The geometry could not be read in the requested format.
    #[error("route {route} geometry is not a valid {format}: {reason}")]
    Shape {
        /// Index of the route in the response.
        route: usize,
        /// Requested shape format identifier.
        format: &'static str,
        /// Description of the problem.
        reason: String,
    },
    /// The polyline geometry could not be decoded.
    #[error("route {route} polyline is invalid: {source}")]
    Polyline {
        /// Index of the route in the response.
        route: usize,
        /// Underlying codec failure.
        #[source]
        source: PolylineError,
    },
    /// A requested annotation is absent from a leg.
    #[error("route {route} leg {leg} is missing the requested {attribute} annotation")]
    MissingAnnotation {
        /// Index of the route in the response.
        route: usize,
        /// Index of the leg in the route.
        leg: usize,
        /// Attribute that was requested.
        attribute: Attribute,
    },
    /// An annotation array length disagrees with the leg's segment count.
    #[error(
        "route {route} leg {leg} {attribute} annotation has {actual} entries, expected {expected}"
    )]
    LengthMismatch {
        /// Index of the route in the response.
        route: usize,
        /// Index of the leg in the route.
        leg: usize,
        /// Attribute whose array is inconsistent.
        attribute: Attribute,
        /// Length implied by the other arrays or the geometry.
        expected: usize,
        /// Length found in the payload.
        actual: usize,
    },
    /// The geometry and the annotated segments disagree.
    #[error(
        "route {route} has {coordinates} coordinates but its legs annotate {segments} segments"
    )]
    SegmentCountMismatch {
        /// Index of the route in the response.
        route: usize,
        /// Number of decoded coordinates.
        coordinates: usize,
        /// Sum of the legs' segment counts.
        segments: usize,
    },
    /// A numeric value is outside its domain.
    #[error("{field} value {value} is invalid")]
    InvalidValue {
        /// Payload field holding the value.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
}

impl From<serde_json::Error> for DecodeError {
    fn from(source: serde_json::Error) -> Self {
        Self::Malformed { source }
    }
}
