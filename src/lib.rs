//! Facade crate for the Waypath directions client.
//!
//! This crate re-exports the request and response types and, behind the
//! `client` feature, the asynchronous client that talks to the service.

#![forbid(unsafe_code)]

pub use waypath_core::{
    Attribute, AttributeOptions, CongestionLevel, DecodeError, DirectionsResponse,
    ProfileIdentifier, Route, RouteLeg, RouteOptions, RouteOptionsError, RouteShapeResolution,
    ShapeFormat, SpeedLimit, SpeedUnit, Waypoint, decode_response, polyline,
};

#[cfg(feature = "client")]
pub use waypath_client::{
    ClientBuildError, DirectionsClient, DirectionsConfig, DirectionsError, DirectionsTask,
    TaskState, Transport, TransportError,
};
