//! Property-based tests for request shaping and geometry decoding.
//!
//! # Invariants tested
//!
//! - **Annotation order:** the `annotations` parameter lists the requested
//!   attributes once each, in first-request order.
//! - **Annotation omission:** no attribute means no `annotations` key.
//! - **Polyline precision:** encoding then decoding moves a coordinate by at
//!   most half a unit of the last encoded digit.

use geo::Coord;
use proptest::prelude::*;
use waypath_core::{Attribute, AttributeOptions, ProfileIdentifier, RouteOptions, polyline};

fn attribute_strategy() -> impl Strategy<Value = Attribute> {
    prop::sample::select(Attribute::ALL.to_vec())
}

fn coordinate_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-180.0_f64..=180.0, -90.0_f64..=90.0).prop_map(|(x, y)| Coord { x, y })
}

fn build_options(attributes: &[Attribute]) -> RouteOptions {
    RouteOptions::new(
        vec![Coord { x: -0.1, y: 51.5 }, Coord { x: -0.2, y: 51.6 }],
        ProfileIdentifier::Automobile,
    )
    .with_attributes(attributes.iter().copied().collect::<AttributeOptions>())
}

fn annotations_value(options: &RouteOptions) -> Option<String> {
    options
        .query_parameters("token")
        .into_iter()
        .find(|(key, _)| *key == "annotations")
        .map(|(_, value)| value)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the annotations value is the deduplicated request order.
    #[test]
    fn annotations_preserve_first_request_order(
        attributes in prop::collection::vec(attribute_strategy(), 1..12),
    ) {
        let mut expected: Vec<&str> = Vec::new();
        for attribute in &attributes {
            if !expected.contains(&attribute.as_str()) {
                expected.push(attribute.as_str());
            }
        }

        let options = build_options(&attributes);

        prop_assert_eq!(annotations_value(&options), Some(expected.join(",")));
    }

    /// Property: parameter building is independent of the token value except
    /// for the `access_token` entry itself.
    #[test]
    fn token_only_changes_access_token(
        attributes in prop::collection::vec(attribute_strategy(), 0..6),
        token in "[A-Za-z0-9.]{1,24}",
    ) {
        let options = build_options(&attributes);
        let with_token = options.query_parameters(&token);
        let with_other = options.query_parameters("other");

        prop_assert_eq!(with_token.len(), with_other.len());
        for (left, right) in with_token.iter().zip(&with_other) {
            prop_assert_eq!(left.0, right.0);
            if left.0 == "access_token" {
                prop_assert_eq!(&left.1, &token);
            } else {
                prop_assert_eq!(&left.1, &right.1);
            }
        }
        prop_assert_eq!(annotations_value(&options).is_some(), !attributes.is_empty());
    }

    /// Property: polyline encoding loses at most half a unit of precision.
    #[test]
    fn polyline_decoding_stays_within_precision(
        coords in prop::collection::vec(coordinate_strategy(), 0..32),
        precision in 5_u32..=6,
    ) {
        let encoded = polyline::encode(&coords, precision);
        let decoded = polyline::decode(&encoded, precision).expect("encoded polyline decodes");
        let tolerance = 0.5 / 10_f64.powi(precision as i32) + 1e-9;

        prop_assert_eq!(decoded.len(), coords.len());
        for (original, restored) in coords.iter().zip(&decoded) {
            prop_assert!((original.x - restored.x).abs() <= tolerance);
            prop_assert!((original.y - restored.y).abs() <= tolerance);
        }
    }
}
