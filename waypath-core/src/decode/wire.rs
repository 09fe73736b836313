//! Serde types mirroring the directions response body.
//!
//! These stay private to the decoder; [`super::decode_response`] validates
//! them and converts them into [`crate::Route`] values.

use serde::Deserialize;
use serde_json::Value;

use crate::{CongestionLevel, SpeedLimit, SpeedUnit};

/// Status fields read before the rest of the body.
///
/// A failure response may omit or malform `routes`, so the code is checked
/// on its own first.
#[derive(Debug, Deserialize)]
pub(super) struct StatusPayload {
    /// `"Ok"` on success, otherwise a failure code such as `"NoRoute"`.
    pub code: String,
    pub message: Option<String>,
}

impl StatusPayload {
    pub(super) fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct DirectionsPayload {
    pub uuid: Option<String>,
    #[serde(default)]
    pub waypoints: Vec<WaypointPayload>,
    #[serde(default)]
    pub routes: Vec<RoutePayload>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WaypointPayload {
    #[serde(default)]
    pub name: String,
    /// `[longitude, latitude]`.
    pub location: [f64; 2],
}

#[derive(Debug, Deserialize)]
pub(super) struct RoutePayload {
    /// Polyline string or GeoJSON object, depending on `geometries`.
    pub geometry: Option<Value>,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<LegPayload>,
}

#[derive(Debug, Deserialize)]
pub(super) struct LegPayload {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    pub annotation: Option<AnnotationPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct AnnotationPayload {
    pub nodes: Option<Vec<u64>>,
    pub distance: Option<Vec<f64>>,
    pub duration: Option<Vec<f64>>,
    pub speed: Option<Vec<f64>>,
    pub congestion: Option<Vec<CongestionLevel>>,
    pub maxspeed: Option<Vec<Option<MaxSpeedPayload>>>,
}

/// One `maxspeed` entry: `{speed, unit}`, `{unknown: true}` or `{none: true}`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct MaxSpeedPayload {
    pub speed: Option<f64>,
    pub unit: Option<String>,
    #[serde(default)]
    pub unknown: bool,
    #[serde(default)]
    pub none: bool,
}

impl MaxSpeedPayload {
    pub(super) fn into_speed_limit(self) -> SpeedLimit {
        if self.unknown {
            return SpeedLimit::UNLIMITED;
        }
        if self.none {
            return SpeedLimit::INVALID;
        }
        match self.speed {
            Some(value) => SpeedLimit::new(value, SpeedUnit::from_payload(self.unit.as_deref())),
            None => SpeedLimit::INVALID,
        }
    }
}
