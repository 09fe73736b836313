//! Routing profiles understood by the directions service.
//!
//! The enum offers compile-time safety for the profile path segment.
//!
//! # Examples
//! ```
//! use waypath_core::ProfileIdentifier;
//!
//! assert_eq!(ProfileIdentifier::Cycling.as_str(), "mapbox/cycling");
//! assert_eq!(
//!     ProfileIdentifier::AutomobileAvoidingTraffic.to_string(),
//!     "mapbox/driving-traffic"
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Mode of travel used to compute a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileIdentifier {
    /// Driving, taking live and historic traffic into account.
    #[default]
    AutomobileAvoidingTraffic,
    /// Driving without traffic information.
    Automobile,
    /// Bicycle-friendly roads and paths.
    Cycling,
    /// Pedestrian paths and sidewalks.
    Walking,
}

impl ProfileIdentifier {
    /// Return the wire identifier used in the request path.
    ///
    /// # Examples
    /// ```
    /// use waypath_core::ProfileIdentifier;
    ///
    /// assert_eq!(ProfileIdentifier::Walking.as_str(), "mapbox/walking");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AutomobileAvoidingTraffic => "mapbox/driving-traffic",
            Self::Automobile => "mapbox/driving",
            Self::Cycling => "mapbox/cycling",
            Self::Walking => "mapbox/walking",
        }
    }
}

impl std::fmt::Display for ProfileIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileIdentifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let bare = trimmed.strip_prefix("mapbox/").unwrap_or(&trimmed);
        match bare {
            "driving-traffic" => Ok(Self::AutomobileAvoidingTraffic),
            "driving" => Ok(Self::Automobile),
            "cycling" => Ok(Self::Cycling),
            "walking" => Ok(Self::Walking),
            _ => Err(format!("unknown profile '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(ProfileIdentifier::AutomobileAvoidingTraffic)]
    #[case(ProfileIdentifier::Automobile)]
    #[case(ProfileIdentifier::Cycling)]
    #[case(ProfileIdentifier::Walking)]
    fn display_parses_back(#[case] profile: ProfileIdentifier) {
        let parsed = ProfileIdentifier::from_str(&profile.to_string()).expect("known profile");
        assert_eq!(parsed, profile);
    }

    #[rstest]
    fn parsing_accepts_bare_identifier() {
        assert_eq!(
            ProfileIdentifier::from_str("Driving"),
            Ok(ProfileIdentifier::Automobile)
        );
    }

    #[rstest]
    fn parsing_rejects_unknown() {
        let err = ProfileIdentifier::from_str("mapbox/sailing").expect_err("unknown profile");
        assert!(err.contains("unknown profile"));
    }
}
