//! Typed options describing a directions request.
//!
//! [`RouteOptions`] carries the waypoints, the routing profile and the
//! response shaping switches. The request builder in [`crate::request`]
//! turns it into a path and query parameters; the decoder reads it back to
//! know which shape format and annotations to expect.

mod attributes;
mod error;

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::ProfileIdentifier;

pub use attributes::{Attribute, AttributeOptions};
pub use error::RouteOptionsError;

/// Encoding used for route geometry in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeFormat {
    /// GeoJSON `LineString` object.
    #[serde(rename = "geojson")]
    GeoJson,
    /// Encoded polyline with five decimal digits of precision.
    #[default]
    Polyline,
    /// Encoded polyline with six decimal digits of precision.
    Polyline6,
}

impl ShapeFormat {
    /// Value of the `geometries` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GeoJson => "geojson",
            Self::Polyline => "polyline",
            Self::Polyline6 => "polyline6",
        }
    }

    /// Decimal precision of the encoded polyline variants.
    #[must_use]
    pub const fn polyline_precision(&self) -> Option<u32> {
        match self {
            Self::GeoJson => None,
            Self::Polyline => Some(5),
            Self::Polyline6 => Some(6),
        }
    }
}

/// Level of detail of the route geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteShapeResolution {
    /// No overview geometry.
    None,
    /// Simplified overview geometry.
    #[default]
    Low,
    /// Full-resolution geometry, one coordinate per annotated node.
    Full,
}

impl RouteShapeResolution {
    /// Value of the `overview` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "false",
            Self::Low => "simplified",
            Self::Full => "full",
        }
    }
}

/// Options for a single directions request.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypath_core::{Attribute, ProfileIdentifier, RouteOptions, ShapeFormat};
///
/// let options = RouteOptions::new(
///     vec![
///         Coord { x: -122.431373, y: 37.780602 },
///         Coord { x: -122.404058, y: 37.758859 },
///     ],
///     ProfileIdentifier::AutomobileAvoidingTraffic,
/// )
/// .with_shape_format(ShapeFormat::Polyline6)
/// .with_attribute(Attribute::Distance);
///
/// assert!(options.validate().is_ok());
/// assert!(options.attributes.contains(Attribute::Distance));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteOptions {
    /// Waypoints in travel order; `x` is longitude, `y` latitude.
    pub coordinates: Vec<Coord<f64>>,
    /// Routing profile.
    #[serde(default)]
    pub profile: ProfileIdentifier,
    /// Geometry encoding of the response.
    #[serde(default)]
    pub shape_format: ShapeFormat,
    /// Level of detail of the response geometry.
    #[serde(default)]
    pub shape_resolution: RouteShapeResolution,
    /// Whether turn-by-turn steps are requested.
    #[serde(default)]
    pub include_steps: bool,
    /// Whether alternative routes are requested.
    #[serde(default)]
    pub include_alternatives: bool,
    /// Whether the route may turn around at intermediate waypoints.
    #[serde(default)]
    pub allows_u_turn_at_waypoint: bool,
    /// Per-segment annotations to request.
    #[serde(default)]
    pub attributes: AttributeOptions,
}

impl RouteOptions {
    /// Construct options with default shaping for the given waypoints.
    #[must_use]
    pub fn new(coordinates: Vec<Coord<f64>>, profile: ProfileIdentifier) -> Self {
        Self {
            coordinates,
            profile,
            shape_format: ShapeFormat::default(),
            shape_resolution: RouteShapeResolution::default(),
            include_steps: false,
            include_alternatives: false,
            allows_u_turn_at_waypoint: false,
            attributes: AttributeOptions::new(),
        }
    }

    /// Set the geometry encoding.
    #[must_use]
    pub const fn with_shape_format(mut self, shape_format: ShapeFormat) -> Self {
        self.shape_format = shape_format;
        self
    }

    /// Set the geometry resolution.
    #[must_use]
    pub const fn with_shape_resolution(mut self, resolution: RouteShapeResolution) -> Self {
        self.shape_resolution = resolution;
        self
    }

    /// Request or suppress turn-by-turn steps.
    #[must_use]
    pub const fn with_steps(mut self, include_steps: bool) -> Self {
        self.include_steps = include_steps;
        self
    }

    /// Request or suppress alternative routes.
    #[must_use]
    pub const fn with_alternatives(mut self, include_alternatives: bool) -> Self {
        self.include_alternatives = include_alternatives;
        self
    }

    /// Allow or forbid U-turns at intermediate waypoints.
    #[must_use]
    pub const fn with_u_turn_at_waypoint(mut self, allowed: bool) -> Self {
        self.allows_u_turn_at_waypoint = allowed;
        self
    }

    /// Replace the requested attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributeOptions) -> Self {
        self.attributes = attributes;
        self
    }

    /// Add one requested attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute);
        self
    }

    /// Check the waypoints before a request is issued.
    ///
    /// # Errors
    ///
    /// Returns [`RouteOptionsError::TooFewCoordinates`] for fewer than two
    /// waypoints and [`RouteOptionsError::InvalidCoordinate`] for a
    /// coordinate outside `[-180, 180] x [-90, 90]` or a non-finite one.
    pub fn validate(&self) -> Result<(), RouteOptionsError> {
        if self.coordinates.len() < 2 {
            return Err(RouteOptionsError::TooFewCoordinates {
                count: self.coordinates.len(),
            });
        }
        let invalid = self.coordinates.iter().enumerate().find(|(_, coord)| {
            !(-180.0..=180.0).contains(&coord.x) || !(-90.0..=90.0).contains(&coord.y)
        });
        match invalid {
            Some((index, coord)) => Err(RouteOptionsError::InvalidCoordinate {
                index,
                longitude: coord.x,
                latitude: coord.y,
            }),
            None => Ok(()),
        }
    }
}
