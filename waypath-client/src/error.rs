//! Errors surfaced by the directions client.

use thiserror::Error;
use waypath_core::{DecodeError, RouteOptionsError};

/// Failures while talking to the directions service.
///
/// URLs never include the query string, so the access token stays out of
/// error messages and logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("HTTP {status} from {url}: {message}")]
    Http {
        /// Request URL without the query string.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL without the query string.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// Connection, TLS or body transfer failure.
    #[error("network error for {url}: {message}")]
    Network {
        /// Request URL without the query string.
        url: String,
        /// Error description.
        message: String,
    },
}

/// Errors delivered by [`crate::DirectionsClient`].
#[derive(Debug, Error)]
pub enum DirectionsError {
    /// The options failed validation; no request was sent.
    #[error(transparent)]
    InvalidOptions(#[from] RouteOptionsError),
    /// The request URL could not be built.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The request failed in transit.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The task was cancelled before it completed.
    #[error("directions request was cancelled")]
    Cancelled,
}

/// Errors raised while constructing a [`crate::DirectionsClient`].
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured base URL is not an absolute URL.
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        /// Configured base URL.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
}
