//! Connection settings for [`crate::DirectionsClient`].

use std::time::Duration;

/// Default directions service host.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Default user agent for directions requests.
pub const DEFAULT_USER_AGENT: &str = "waypath-directions/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::DirectionsClient`].
///
/// The access token is redacted from the `Debug` output.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use waypath_client::DirectionsConfig;
///
/// let config = DirectionsConfig::new("pk.test")
///     .with_base_url("http://localhost:8080")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url, "http://localhost:8080");
/// assert!(!format!("{config:?}").contains("pk.test"));
/// ```
#[derive(Clone)]
pub struct DirectionsConfig {
    /// Service host, e.g. `"https://api.mapbox.com"`.
    pub base_url: String,
    /// Credential sent as the `access_token` query parameter.
    pub access_token: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            access_token: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl std::fmt::Debug for DirectionsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionsConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl DirectionsConfig {
    /// Create a configuration for the default host with the given token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    /// Set the service host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
