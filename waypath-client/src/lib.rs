//! Asynchronous client for the directions service.
//!
//! [`DirectionsClient`] validates [`RouteOptions`](waypath_core::RouteOptions),
//! issues one GET per request through a [`Transport`] and decodes the body
//! with [`waypath_core::decode_response`]. Two entry points are offered:
//!
//! - [`DirectionsClient::fetch_directions`] returns a future.
//! - [`DirectionsClient::calculate`] spawns the request, returns a
//!   cancellable [`DirectionsTask`] immediately and reports through a
//!   completion callback.

mod client;
mod config;
mod error;
mod task;
mod transport;

#[doc(hidden)]
pub mod test_support;

pub use client::DirectionsClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, DirectionsConfig};
pub use error::{ClientBuildError, DirectionsError, TransportError};
pub use task::{DirectionsTask, TaskState};
pub use transport::{HttpTransport, Transport, TransportRequest};
