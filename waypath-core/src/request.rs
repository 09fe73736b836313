//! Serialise [`RouteOptions`] into the request path and query parameters.
//!
//! Both functions are pure: the same options always produce the same
//! path and the same ordered parameter list.

use crate::RouteOptions;

/// Version segment of the directions endpoint.
pub const DIRECTIONS_API_PATH: &str = "directions/v5";

/// Query parameter carrying the credential.
pub const ACCESS_TOKEN_PARAMETER: &str = "access_token";

/// Ordered key/value pairs appended to the request URL.
pub type QueryParameters = Vec<(&'static str, String)>;

impl RouteOptions {
    /// Build the endpoint path relative to the service host.
    ///
    /// The format is `directions/v5/{profile}/{coordinates}.json` where the
    /// coordinates are semicolon-separated `lon,lat` pairs.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use waypath_core::{ProfileIdentifier, RouteOptions};
    ///
    /// let options = RouteOptions::new(
    ///     vec![Coord { x: -0.1, y: 51.5 }, Coord { x: -0.2, y: 51.6 }],
    ///     ProfileIdentifier::Walking,
    /// );
    /// assert_eq!(
    ///     options.path(),
    ///     "directions/v5/mapbox/walking/-0.1,51.5;-0.2,51.6.json"
    /// );
    /// ```
    #[must_use]
    pub fn path(&self) -> String {
        let coords = self
            .coordinates
            .iter()
            .map(|coord| format!("{},{}", coord.x, coord.y))
            .collect::<Vec<_>>()
            .join(";");
        format!("{DIRECTIONS_API_PATH}/{}/{coords}.json", self.profile)
    }

    /// Build the ordered query parameters for these options.
    ///
    /// The `annotations` parameter is present only when at least one
    /// attribute was requested.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use waypath_core::{Attribute, ProfileIdentifier, RouteOptions};
    ///
    /// let options = RouteOptions::new(
    ///     vec![Coord { x: -0.1, y: 51.5 }, Coord { x: -0.2, y: 51.6 }],
    ///     ProfileIdentifier::Cycling,
    /// )
    /// .with_attribute(Attribute::Speed);
    ///
    /// let params = options.query_parameters("token");
    /// assert!(params.contains(&("annotations", "speed".to_string())));
    /// assert!(params.contains(&("access_token", "token".to_string())));
    /// ```
    #[must_use]
    pub fn query_parameters(&self, access_token: &str) -> QueryParameters {
        let mut params = vec![
            ("alternatives", self.include_alternatives.to_string()),
            ("geometries", self.shape_format.as_str().to_owned()),
            ("overview", self.shape_resolution.as_str().to_owned()),
            ("steps", self.include_steps.to_string()),
            (
                "continue_straight",
                (!self.allows_u_turn_at_waypoint).to_string(),
            ),
            (ACCESS_TOKEN_PARAMETER, access_token.to_owned()),
        ];
        if !self.attributes.is_empty() {
            params.push(("annotations", self.attributes.to_query_value()));
        }
        params
    }
}
