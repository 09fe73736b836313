//! Decoded routes, legs and waypoints.

use std::time::Duration;

use geo::Coord;
use serde::Serialize;

use crate::{CongestionLevel, SpeedLimit};

/// An input location snapped onto the road network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    /// Name of the street the waypoint snapped to; may be empty.
    pub name: String,
    /// Snapped location; `x` is longitude, `y` latitude.
    pub coordinate: Coord<f64>,
}

/// The portion of a route between two consecutive waypoints.
///
/// Annotation arrays are parallel: each has one entry per segment, except
/// [`RouteLeg::openstreetmap_node_identifiers`] which has one entry per
/// coordinate. Arrays that were not requested stay `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RouteLeg {
    /// Summary of the most significant roads on the leg.
    pub name: String,
    /// Length in metres.
    pub distance: f64,
    /// Expected travel time.
    pub expected_travel_time: Duration,
    /// OpenStreetMap node identifier of every coordinate.
    pub openstreetmap_node_identifiers: Option<Vec<u64>>,
    /// Length of each segment in metres.
    pub segment_distances: Option<Vec<f64>>,
    /// Expected travel time of each segment.
    pub expected_segment_travel_times: Option<Vec<Duration>>,
    /// Average speed of each segment in metres per second.
    pub segment_speeds: Option<Vec<f64>>,
    /// Congestion level of each segment.
    pub segment_congestion_levels: Option<Vec<CongestionLevel>>,
    /// Posted maximum speed of each segment.
    pub segment_maximum_speed_limits: Option<Vec<SpeedLimit>>,
}

impl RouteLeg {
    /// Number of segments described by the populated annotation arrays.
    ///
    /// Returns `None` when no annotation was decoded.
    #[must_use]
    pub fn segment_count(&self) -> Option<usize> {
        self.segment_distances
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.expected_segment_travel_times.as_ref().map(Vec::len))
            .or_else(|| self.segment_speeds.as_ref().map(Vec::len))
            .or_else(|| self.segment_congestion_levels.as_ref().map(Vec::len))
            .or_else(|| self.segment_maximum_speed_limits.as_ref().map(Vec::len))
            .or_else(|| {
                self.openstreetmap_node_identifiers
                    .as_ref()
                    .map(|nodes| nodes.len().saturating_sub(1))
            })
    }
}

/// One route between the requested waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Identifier of the response this route belongs to.
    pub identifier: String,
    /// Route geometry; empty when no overview was requested.
    pub coordinates: Vec<Coord<f64>>,
    /// Length in metres.
    pub distance: f64,
    /// Expected travel time.
    pub expected_travel_time: Duration,
    /// Legs in travel order.
    pub legs: Vec<RouteLeg>,
}

/// Everything decoded from one directions response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsResponse {
    /// Response identifier, empty when the service sent none.
    pub identifier: String,
    /// Snapped waypoints in request order.
    pub waypoints: Vec<Waypoint>,
    /// Routes, best first.
    pub routes: Vec<Route>,
}
