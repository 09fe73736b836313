//! Per-segment attributes that can be requested alongside a route.

use serde::{Deserialize, Serialize};

/// A single annotation attribute.
///
/// # Examples
/// ```
/// use waypath_core::Attribute;
///
/// assert_eq!(Attribute::ExpectedTravelTime.as_str(), "duration");
/// assert_eq!(Attribute::OpenStreetMapNodeIdentifier.to_string(), "nodes");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    /// OpenStreetMap node identifier for every coordinate.
    #[serde(rename = "nodes")]
    OpenStreetMapNodeIdentifier,
    /// Distance of each segment in metres.
    #[serde(rename = "distance")]
    Distance,
    /// Expected travel time of each segment.
    #[serde(rename = "duration")]
    ExpectedTravelTime,
    /// Average speed of each segment in metres per second.
    #[serde(rename = "speed")]
    Speed,
    /// Traffic congestion level of each segment.
    #[serde(rename = "congestion")]
    CongestionLevel,
    /// Posted maximum speed of each segment.
    #[serde(rename = "maxspeed")]
    MaximumSpeedLimit,
}

impl Attribute {
    /// Every attribute, in the order the service documents them.
    pub const ALL: [Self; 6] = [
        Self::OpenStreetMapNodeIdentifier,
        Self::Distance,
        Self::ExpectedTravelTime,
        Self::Speed,
        Self::CongestionLevel,
        Self::MaximumSpeedLimit,
    ];

    /// Return the identifier used in the `annotations` query parameter and
    /// as the key of the response annotation block.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenStreetMapNodeIdentifier => "nodes",
            Self::Distance => "distance",
            Self::ExpectedTravelTime => "duration",
            Self::Speed => "speed",
            Self::CongestionLevel => "congestion",
            Self::MaximumSpeedLimit => "maxspeed",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.as_str() == s.trim())
            .ok_or_else(|| format!("unknown attribute '{s}'"))
    }
}

/// Order-preserving set of requested attributes.
///
/// Inserting an attribute twice keeps its first position, so the
/// serialised `annotations` parameter mirrors the caller's request order.
///
/// # Examples
/// ```
/// use waypath_core::{Attribute, AttributeOptions};
///
/// let attributes = AttributeOptions::from_iter([
///     Attribute::Speed,
///     Attribute::Distance,
///     Attribute::Speed,
/// ]);
/// assert_eq!(attributes.len(), 2);
/// assert_eq!(attributes.to_query_value(), "speed,distance");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct AttributeOptions {
    attributes: Vec<Attribute>,
}

impl AttributeOptions {
    /// Construct an empty attribute set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Add an attribute; returns `false` when it was already present.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        if self.contains(attribute) {
            return false;
        }
        self.attributes.push(attribute);
        true
    }

    /// Builder-style variant of [`AttributeOptions::insert`].
    #[must_use]
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.insert(attribute);
        self
    }

    /// Whether the attribute has been requested.
    #[must_use]
    pub fn contains(&self, attribute: Attribute) -> bool {
        self.attributes.contains(&attribute)
    }

    /// Number of requested attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether no attribute has been requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate over the attributes in request order.
    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.attributes.iter().copied()
    }

    /// Comma-joined identifiers in request order.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        self.iter()
            .map(|attribute| attribute.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<Attribute> for AttributeOptions {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut options = Self::new();
        for attribute in iter {
            options.insert(attribute);
        }
        options
    }
}

impl From<Vec<Attribute>> for AttributeOptions {
    fn from(attributes: Vec<Attribute>) -> Self {
        attributes.into_iter().collect()
    }
}

impl From<AttributeOptions> for Vec<Attribute> {
    fn from(options: AttributeOptions) -> Self {
        options.attributes
    }
}
