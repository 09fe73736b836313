//! Test utilities for the directions client.
//!
//! This module provides [`StubTransport`], a deterministic [`Transport`] that
//! replays canned bodies without touching the network, and the recorded
//! annotation fixture used across the workspace's tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::{Transport, TransportError, TransportRequest};

/// Recorded response for a two-coordinate driving request with `nodes`,
/// `distance`, `duration`, `speed`, `congestion` and `maxspeed` annotations:
/// one route, one leg, 128 coordinates.
pub const ANNOTATION_FIXTURE: &str = include_str!("../tests/fixtures/annotation.json");

/// Status returned when a request does not match the stub's expectations.
const UNMATCHED_STATUS: u16 = 404;

/// Stub [`Transport`] for tests.
///
/// The stub answers every request with one pre-configured outcome. Optional
/// expectations on host, path prefix and query parameters make unmatched
/// requests fail with an HTTP 404, so tests also verify what was sent.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use geo::Coord;
/// use waypath_client::{DirectionsClient, DirectionsConfig};
/// use waypath_client::test_support::{ANNOTATION_FIXTURE, StubTransport};
/// use waypath_core::{ProfileIdentifier, RouteOptions, RouteShapeResolution};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = StubTransport::with_body(ANNOTATION_FIXTURE)
///     .expect_host("api.mapbox.com")
///     .expect_query("overview", "full");
/// let client = DirectionsClient::with_transport(
///     DirectionsConfig::new("token"),
///     Arc::new(transport),
/// )?;
/// let options = RouteOptions::new(
///     vec![
///         Coord { x: -122.431373, y: 37.780602 },
///         Coord { x: -122.404058, y: 37.758859 },
///     ],
///     ProfileIdentifier::AutomobileAvoidingTraffic,
/// )
/// .with_shape_resolution(RouteShapeResolution::Full);
///
/// let response = client.fetch_directions(&options).await?;
/// assert_eq!(response.routes[0].coordinates.len(), 128);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StubTransport {
    response: StubResponse,
    host: Option<String>,
    path_prefix: Option<String>,
    query: Vec<(String, String)>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Body(String),
    Error(TransportError),
}

impl StubTransport {
    fn with_response(response: StubResponse) -> Self {
        Self {
            response,
            host: None,
            path_prefix: None,
            query: Vec::new(),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a stub that answers with `body`.
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        Self::with_response(StubResponse::Body(body.into()))
    }

    /// Create a stub that fails with `error`.
    #[must_use]
    pub fn with_error(error: TransportError) -> Self {
        Self::with_response(StubResponse::Error(error))
    }

    /// Only answer requests to `host`.
    #[must_use]
    pub fn expect_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Only answer requests whose path starts with `prefix`.
    #[must_use]
    pub fn expect_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(prefix.into());
        self
    }

    /// Only answer requests carrying `key=value`.
    #[must_use]
    pub fn expect_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Wait for `delay` before answering.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn mismatch(&self, request: &TransportRequest) -> Option<String> {
        if let Some(host) = &self.host
            && request.url.host_str() != Some(host.as_str())
        {
            return Some(format!("expected host {host}"));
        }
        if let Some(prefix) = &self.path_prefix
            && !request.url.path().starts_with(prefix.as_str())
        {
            return Some(format!("expected path prefix {prefix}"));
        }
        self.query
            .iter()
            .find(|(key, value)| request.query_value(key) != Some(value.as_str()))
            .map(|(key, value)| format!("expected query parameter {key}={value}"))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, request: &TransportRequest) -> Result<String, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.mismatch(request) {
            return Err(TransportError::Http {
                url: request.url.to_string(),
                status: UNMATCHED_STATUS,
                message,
            });
        }
        match &self.response {
            StubResponse::Body(body) => Ok(body.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
