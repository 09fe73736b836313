use std::sync::Arc;

use geo::Coord;
use waypath_client::test_support::StubTransport;
use waypath_client::{DirectionsClient, DirectionsConfig};
use waypath_core::{
    Attribute, AttributeOptions, ProfileIdentifier, RouteOptions, RouteShapeResolution,
    ShapeFormat,
};

/// Token sent by every test client.
pub const TEST_TOKEN: &str = "bogus-token";

/// Options matching the recorded annotation fixture.
pub fn annotation_options() -> RouteOptions {
    RouteOptions::new(
        vec![
            Coord {
                x: -122.431373,
                y: 37.780602,
            },
            Coord {
                x: -122.404058,
                y: 37.758859,
            },
        ],
        ProfileIdentifier::AutomobileAvoidingTraffic,
    )
    .with_shape_format(ShapeFormat::Polyline)
    .with_shape_resolution(RouteShapeResolution::Full)
    .with_steps(false)
    .with_alternatives(false)
    .with_attributes(AttributeOptions::from_iter([
        Attribute::OpenStreetMapNodeIdentifier,
        Attribute::Distance,
        Attribute::ExpectedTravelTime,
        Attribute::Speed,
        Attribute::CongestionLevel,
    ]))
}

/// Build a client for the default host that talks to `transport`.
pub fn client_with(transport: StubTransport) -> DirectionsClient {
    DirectionsClient::with_transport(DirectionsConfig::new(TEST_TOKEN), Arc::new(transport))
        .unwrap_or_else(|err| panic!("client should build: {err}"))
}
