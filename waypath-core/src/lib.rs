//! Core types for the Waypath directions client.
//!
//! This crate holds everything that does not touch the network:
//!
//! - [`RouteOptions`] and its enums describe a request.
//! - [`RouteOptions::path`] and [`RouteOptions::query_parameters`] shape the
//!   request URL.
//! - [`decode_response`] turns a response body into a [`DirectionsResponse`].
//! - [`polyline`] encodes and decodes route geometry.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use waypath_core::{Attribute, ProfileIdentifier, RouteOptions};
//!
//! let options = RouteOptions::new(
//!     vec![Coord { x: -0.1, y: 51.5 }, Coord { x: -0.2, y: 51.6 }],
//!     ProfileIdentifier::Walking,
//! )
//! .with_attribute(Attribute::Distance)
//! .with_attribute(Attribute::CongestionLevel);
//!
//! let params = options.query_parameters("token");
//! assert!(params.contains(&("annotations", "distance,congestion".to_string())));
//! ```

mod annotation;
mod decode;
mod options;
pub mod polyline;
mod profile;
mod request;
mod route;

pub use annotation::{CongestionLevel, SpeedLimit, SpeedUnit};
pub use decode::{DecodeError, decode_response};
pub use options::{
    Attribute, AttributeOptions, RouteOptions, RouteOptionsError, RouteShapeResolution,
    ShapeFormat,
};
pub use profile::ProfileIdentifier;
pub use request::{ACCESS_TOKEN_PARAMETER, DIRECTIONS_API_PATH, QueryParameters};
pub use route::{DirectionsResponse, Route, RouteLeg, Waypoint};
