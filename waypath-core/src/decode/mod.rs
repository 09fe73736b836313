//! Decode a directions response body into typed routes.
//!
//! The decoder is strict: geometry must be readable in the requested
//! [`ShapeFormat`], every requested annotation must be present in every leg,
//! and parallel annotation arrays must agree in length. Any violation fails
//! the whole response.

mod error;
mod wire;

use std::time::Duration;

use geo::{Coord, LineString};
use log::debug;
use serde_json::Value;

use crate::{
    Attribute, DirectionsResponse, Route, RouteLeg, RouteOptions, RouteShapeResolution,
    ShapeFormat, Waypoint, polyline,
};

pub use error::DecodeError;

use wire::{AnnotationPayload, DirectionsPayload, LegPayload, RoutePayload, StatusPayload};

/// Decode a directions response body.
///
/// `options` must be the options the request was built from; they decide
/// how the geometry is read and which annotations are required.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use waypath_core::{ProfileIdentifier, RouteOptions, decode_response};
///
/// let options = RouteOptions::new(
///     vec![Coord { x: -120.2, y: 38.5 }, Coord { x: -126.453, y: 43.252 }],
///     ProfileIdentifier::Automobile,
/// );
/// let body = r#"{
///     "code": "Ok",
///     "uuid": "abc",
///     "waypoints": [],
///     "routes": [{
///         "geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
///         "distance": 1200.0,
///         "duration": 95.5,
///         "legs": [{"summary": "A1", "distance": 1200.0, "duration": 95.5}]
///     }]
/// }"#;
///
/// let response = decode_response(body, &options)?;
/// assert_eq!(response.routes[0].coordinates.len(), 3);
/// assert_eq!(response.routes[0].identifier, "abc");
/// # Ok::<(), waypath_core::DecodeError>(())
/// ```
///
/// # Errors
///
/// Returns [`DecodeError`] when the body is malformed, reports a failure
/// code, or is inconsistent with `options`.
pub fn decode_response(
    body: &str,
    options: &RouteOptions,
) -> Result<DirectionsResponse, DecodeError> {
    let status: StatusPayload = serde_json::from_str(body)?;
    if !status.is_ok() {
        return Err(DecodeError::Unsuccessful {
            code: status.code,
            message: status.message.unwrap_or_default(),
        });
    }

    let payload: DirectionsPayload = serde_json::from_str(body)?;
    let identifier = payload.uuid.unwrap_or_default();
    let waypoints = payload
        .waypoints
        .into_iter()
        .map(|waypoint| Waypoint {
            name: waypoint.name,
            coordinate: Coord {
                x: waypoint.location[0],
                y: waypoint.location[1],
            },
        })
        .collect();
    let routes = payload
        .routes
        .into_iter()
        .enumerate()
        .map(|(index, route)| decode_route(index, route, &identifier, options))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "decoded {} route(s) for response '{identifier}'",
        routes.len()
    );
    Ok(DirectionsResponse {
        identifier,
        waypoints,
        routes,
    })
}

fn decode_route(
    index: usize,
    payload: RoutePayload,
    identifier: &str,
    options: &RouteOptions,
) -> Result<Route, DecodeError> {
    let coordinates = match options.shape_resolution {
        RouteShapeResolution::None => Vec::new(),
        RouteShapeResolution::Low | RouteShapeResolution::Full => {
            let geometry = payload
                .geometry
                .ok_or(DecodeError::MissingGeometry { route: index })?;
            decode_geometry(index, geometry, options.shape_format)?
        }
    };

    let legs = payload
        .legs
        .into_iter()
        .enumerate()
        .map(|(leg_index, leg)| decode_leg(index, leg_index, leg, options))
        .collect::<Result<Vec<_>, _>>()?;

    if options.shape_resolution == RouteShapeResolution::Full && !coordinates.is_empty() {
        check_segment_total(index, coordinates.len(), &legs)?;
    }

    Ok(Route {
        identifier: identifier.to_owned(),
        coordinates,
        distance: payload.distance,
        expected_travel_time: duration("duration", payload.duration)?,
        legs,
    })
}

fn decode_geometry(
    route: usize,
    geometry: Value,
    format: ShapeFormat,
) -> Result<Vec<Coord<f64>>, DecodeError> {
    let shape_error = |reason: String| DecodeError::Shape {
        route,
        format: format.as_str(),
        reason,
    };

    match (format.polyline_precision(), geometry) {
        (Some(precision), Value::String(encoded)) => polyline::decode(&encoded, precision)
            .map_err(|source| DecodeError::Polyline { route, source }),
        (Some(_), _) => Err(shape_error("expected an encoded polyline string".to_owned())),
        (None, geometry @ Value::Object(_)) => {
            let geometry: geojson::Geometry =
                serde_json::from_value(geometry).map_err(|err| shape_error(err.to_string()))?;
            let line = LineString::<f64>::try_from(geometry.value)
                .map_err(|err| shape_error(err.to_string()))?;
            Ok(line.into_inner())
        }
        (None, _) => Err(shape_error("expected a GeoJSON object".to_owned())),
    }
}

fn decode_leg(
    route: usize,
    leg: usize,
    payload: LegPayload,
    options: &RouteOptions,
) -> Result<RouteLeg, DecodeError> {
    let annotation = payload.annotation.unwrap_or_default();
    if let Some(attribute) = options
        .attributes
        .iter()
        .find(|attribute| !has_annotation(&annotation, *attribute))
    {
        return Err(DecodeError::MissingAnnotation {
            route,
            leg,
            attribute,
        });
    }
    check_lengths(route, leg, &annotation)?;

    let expected_segment_travel_times = annotation
        .duration
        .map(|values| {
            values
                .into_iter()
                .map(|value| duration("annotation.duration", value))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(RouteLeg {
        name: payload.summary,
        distance: payload.distance,
        expected_travel_time: duration("leg.duration", payload.duration)?,
        openstreetmap_node_identifiers: annotation.nodes,
        segment_distances: annotation.distance,
        expected_segment_travel_times,
        segment_speeds: annotation.speed,
        segment_congestion_levels: annotation.congestion,
        segment_maximum_speed_limits: annotation.maxspeed.map(|entries| {
            entries
                .into_iter()
                .map(|entry| entry.unwrap_or_default().into_speed_limit())
                .collect()
        }),
    })
}

const fn has_annotation(annotation: &AnnotationPayload, attribute: Attribute) -> bool {
    match attribute {
        Attribute::OpenStreetMapNodeIdentifier => annotation.nodes.is_some(),
        Attribute::Distance => annotation.distance.is_some(),
        Attribute::ExpectedTravelTime => annotation.duration.is_some(),
        Attribute::Speed => annotation.speed.is_some(),
        Attribute::CongestionLevel => annotation.congestion.is_some(),
        Attribute::MaximumSpeedLimit => annotation.maxspeed.is_some(),
    }
}

/// Check that the parallel arrays of one leg agree.
///
/// Segment arrays must share one length; `nodes` must be one longer.
fn check_lengths(
    route: usize,
    leg: usize,
    annotation: &AnnotationPayload,
) -> Result<(), DecodeError> {
    let segment_lengths = [
        (Attribute::Distance, annotation.distance.as_ref().map(Vec::len)),
        (
            Attribute::ExpectedTravelTime,
            annotation.duration.as_ref().map(Vec::len),
        ),
        (Attribute::Speed, annotation.speed.as_ref().map(Vec::len)),
        (
            Attribute::CongestionLevel,
            annotation.congestion.as_ref().map(Vec::len),
        ),
        (
            Attribute::MaximumSpeedLimit,
            annotation.maxspeed.as_ref().map(Vec::len),
        ),
    ];
    let mut present = segment_lengths
        .into_iter()
        .filter_map(|(attribute, len)| len.map(|len| (attribute, len)));

    let Some((_, expected)) = present.next() else {
        return Ok(());
    };
    if let Some((attribute, actual)) = present.find(|(_, len)| *len != expected) {
        return Err(DecodeError::LengthMismatch {
            route,
            leg,
            attribute,
            expected,
            actual,
        });
    }

    match annotation.nodes.as_ref().map(Vec::len) {
        Some(actual) if actual != expected + 1 => Err(DecodeError::LengthMismatch {
            route,
            leg,
            attribute: Attribute::OpenStreetMapNodeIdentifier,
            expected: expected + 1,
            actual,
        }),
        _ => Ok(()),
    }
}

/// With full geometry every coordinate pair is one annotated segment.
///
/// Skipped when any leg carries no annotation.
fn check_segment_total(
    route: usize,
    coordinates: usize,
    legs: &[RouteLeg],
) -> Result<(), DecodeError> {
    let Some(segments) = legs
        .iter()
        .map(RouteLeg::segment_count)
        .sum::<Option<usize>>()
    else {
        return Ok(());
    };
    if legs.is_empty() || segments + 1 == coordinates {
        return Ok(());
    }
    Err(DecodeError::SegmentCountMismatch {
        route,
        coordinates,
        segments,
    })
}

fn duration(field: &'static str, seconds: f64) -> Result<Duration, DecodeError> {
    Duration::try_from_secs_f64(seconds).map_err(|_| DecodeError::InvalidValue {
        field,
        value: seconds,
    })
}
