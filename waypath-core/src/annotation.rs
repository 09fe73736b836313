//! Value types carried by per-segment route annotations.

use serde::{Deserialize, Serialize};

/// Traffic density along one segment of a leg.
///
/// Any level the decoder does not recognise becomes [`CongestionLevel::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    /// Free-flowing traffic.
    Low,
    /// Some slowdown.
    Moderate,
    /// Significant slowdown.
    Heavy,
    /// Standstill or near standstill.
    Severe,
    /// No traffic data is available.
    #[default]
    #[serde(other)]
    Unknown,
}

/// Unit of a [`SpeedLimit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedUnit {
    /// Miles per hour.
    #[serde(rename = "mph")]
    MilesPerHour,
    /// Kilometres per hour.
    #[serde(rename = "km/h")]
    KilometersPerHour,
}

impl SpeedUnit {
    /// Map a payload unit string; only `mph` selects miles per hour.
    #[must_use]
    pub fn from_payload(unit: Option<&str>) -> Self {
        match unit {
            Some("mph") => Self::MilesPerHour,
            _ => Self::KilometersPerHour,
        }
    }
}

/// Posted maximum speed of one segment.
///
/// Two sentinels stand in for segments without a concrete limit and are
/// never equal to each other:
///
/// - [`SpeedLimit::UNLIMITED`]: the limit is unknown or absent, so travel
///   is not capped.
/// - [`SpeedLimit::INVALID`]: no limit applies to the segment, for example
///   a ferry crossing.
///
/// # Examples
/// ```
/// use waypath_core::{SpeedLimit, SpeedUnit};
///
/// let limit = SpeedLimit::new(30.0, SpeedUnit::MilesPerHour);
/// assert!(!limit.is_unlimited());
/// assert_ne!(SpeedLimit::UNLIMITED, SpeedLimit::INVALID);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimit {
    /// Numeric limit in `unit`.
    pub value: f64,
    /// Unit of `value`.
    pub unit: SpeedUnit,
}

impl SpeedLimit {
    /// Sentinel for an unknown limit; the greatest finite `f64`.
    pub const UNLIMITED: Self = Self {
        value: f64::MAX,
        unit: SpeedUnit::KilometersPerHour,
    };

    /// Sentinel for a segment where no limit applies.
    pub const INVALID: Self = Self {
        value: -1.0,
        unit: SpeedUnit::KilometersPerHour,
    };

    /// Construct a concrete limit.
    #[must_use]
    pub const fn new(value: f64, unit: SpeedUnit) -> Self {
        Self { value, unit }
    }

    /// Whether this is the [`SpeedLimit::UNLIMITED`] sentinel.
    #[must_use]
    pub fn is_unlimited(&self) -> bool {
        *self == Self::UNLIMITED
    }

    /// Whether this is the [`SpeedLimit::INVALID`] sentinel.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        *self == Self::INVALID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("\"low\"", CongestionLevel::Low)]
    #[case("\"severe\"", CongestionLevel::Severe)]
    #[case("\"unknown\"", CongestionLevel::Unknown)]
    #[case("\"gridlock\"", CongestionLevel::Unknown)]
    fn congestion_decodes_with_fallback(#[case] json: &str, #[case] expected: CongestionLevel) {
        let level: CongestionLevel = serde_json::from_str(json).expect("string decodes");
        assert_eq!(level, expected);
    }

    #[rstest]
    fn unknown_congestion_is_the_default_and_serialises_lowercase() {
        assert_eq!(CongestionLevel::default(), CongestionLevel::Unknown);
        let json = serde_json::to_string(&[CongestionLevel::Heavy, CongestionLevel::Unknown])
            .expect("levels serialise");
        assert_eq!(json, r#"["heavy","unknown"]"#);
    }

    #[rstest]
    #[case(Some("mph"), SpeedUnit::MilesPerHour)]
    #[case(Some("km/h"), SpeedUnit::KilometersPerHour)]
    #[case(Some("knots"), SpeedUnit::KilometersPerHour)]
    #[case(None, SpeedUnit::KilometersPerHour)]
    fn unit_defaults_to_kilometres(#[case] raw: Option<&str>, #[case] expected: SpeedUnit) {
        assert_eq!(SpeedUnit::from_payload(raw), expected);
    }

    #[rstest]
    fn sentinels_are_distinct() {
        assert!(SpeedLimit::UNLIMITED.is_unlimited());
        assert!(!SpeedLimit::UNLIMITED.is_invalid());
        assert!(SpeedLimit::INVALID.is_invalid());
        assert!(!SpeedLimit::INVALID.is_unlimited());
    }
}
