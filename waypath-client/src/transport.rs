//! Network seam between the client and the directions service.
//!
//! [`DirectionsClient`](crate::DirectionsClient) hands a [`TransportRequest`]
//! to a [`Transport`] and decodes whatever body comes back. [`HttpTransport`]
//! performs a real GET with `reqwest`; tests substitute
//! [`StubTransport`](crate::test_support::StubTransport).

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;
use url::Url;
use waypath_core::QueryParameters;

use crate::{ClientBuildError, DirectionsConfig, TransportError};

/// A GET request to the directions service.
///
/// The query is kept apart from the URL so the access token never leaks
/// into error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    /// Endpoint URL without a query string.
    pub url: Url,
    /// Ordered query parameters, including the access token.
    pub query: QueryParameters,
}

impl TransportRequest {
    /// Look up the value of a query parameter.
    ///
    /// # Examples
    /// ```
    /// use url::Url;
    /// use waypath_client::TransportRequest;
    ///
    /// let request = TransportRequest {
    ///     url: Url::parse("https://api.mapbox.com/directions/v5/x.json")?,
    ///     query: vec![("steps", "false".to_owned())],
    /// };
    /// assert_eq!(request.query_value("steps"), Some("false"));
    /// assert_eq!(request.query_value("overview"), None);
    /// # Ok::<(), url::ParseError>(())
    /// ```
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Executes directions requests and returns the raw response body.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Perform `request` and return the body text of a successful response.
    async fn get(&self, request: &TransportRequest) -> Result<String, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Build an HTTP transport honouring the timeout and user agent of
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError::HttpClient`] if the client fails to build.
    pub fn new(config: &DirectionsConfig) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    fn convert_reqwest_error(&self, error: reqwest::Error, url: &Url) -> TransportError {
        // The reqwest error message embeds the full URL, token included.
        let error = error.without_url();
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return TransportError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        TransportError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: &TransportRequest) -> Result<String, TransportError> {
        debug!("GET {}", request.url);
        let response = self
            .client
            .get(request.url.clone())
            .query(&request.query)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &request.url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &request.url))?;

        response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &request.url))
    }
}
