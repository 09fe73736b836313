//! Asynchronous directions client.
//!
//! # Runtime behaviour
//!
//! The client spawns [`DirectionsClient::calculate`] work onto a Tokio
//! runtime chosen at construction. Built inside a runtime (detected via
//! [`Handle::try_current`]) it reuses that runtime's handle. Built outside
//! one it owns a small multi-threaded runtime, so callers without Tokio can
//! still use the callback API. Such a client must not be dropped from
//! within an async context. Dropping it shuts its runtime down; requests
//! still in flight are then reported as [`DirectionsError::Cancelled`] and
//! their handles move to [`TaskState::Canceled`].
//!
//! [`DirectionsClient::fetch_directions`] is a plain future and runs on
//! whichever executor polls it.

use std::sync::Arc;

use log::{debug, warn};
use tokio::runtime::{Handle, Runtime};
use url::Url;
use waypath_core::{DirectionsResponse, RouteOptions, decode_response};

use crate::{
    ClientBuildError, DirectionsConfig, DirectionsError, DirectionsTask, HttpTransport, TaskState,
    Transport, TransportRequest,
};

enum Executor {
    Ambient(Handle),
    Owned(Runtime),
}

impl Executor {
    fn detect() -> Result<Self, ClientBuildError> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self::Ambient(handle));
        }
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("waypath-directions")
            .enable_all()
            .build()
            .map(Self::Owned)
            .map_err(ClientBuildError::Runtime)
    }

    fn handle(&self) -> &Handle {
        match self {
            Self::Ambient(handle) => handle,
            Self::Owned(runtime) => runtime.handle(),
        }
    }
}

/// Completion callback that fires exactly once.
///
/// If the spawned future is dropped before delivering (runtime shutdown),
/// the task is cancelled and the callback receives
/// [`DirectionsError::Cancelled`].
struct Completion<F>
where
    F: FnOnce(Result<DirectionsResponse, DirectionsError>),
{
    task: DirectionsTask,
    callback: Option<F>,
}

impl<F> Completion<F>
where
    F: FnOnce(Result<DirectionsResponse, DirectionsError>),
{
    fn new(task: DirectionsTask, callback: F) -> Self {
        Self {
            task,
            callback: Some(callback),
        }
    }

    fn deliver(mut self, result: Result<DirectionsResponse, DirectionsError>) {
        if let Some(callback) = self.callback.take() {
            callback(result);
        }
    }
}

impl<F> Drop for Completion<F>
where
    F: FnOnce(Result<DirectionsResponse, DirectionsError>),
{
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            self.task.cancel();
            warn!("directions task dropped before completion; reporting cancellation");
            callback(Err(DirectionsError::Cancelled));
        }
    }
}

struct ClientInner {
    config: DirectionsConfig,
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl ClientInner {
    fn request_for(&self, options: &RouteOptions) -> Result<TransportRequest, DirectionsError> {
        options.validate()?;
        let url = self.base_url.join(&options.path())?;
        Ok(TransportRequest {
            url,
            query: options.query_parameters(&self.config.access_token),
        })
    }

    async fn fetch(&self, options: &RouteOptions) -> Result<DirectionsResponse, DirectionsError> {
        let request = self.request_for(options)?;
        let body = self.transport.get(&request).await.inspect_err(|err| {
            warn!("directions request failed: {err}");
        })?;
        let response = decode_response(&body, options).inspect_err(|err| {
            warn!("directions response from {} rejected: {err}", request.url);
        })?;
        debug!(
            "received {} route(s) from {}",
            response.routes.len(),
            request.url
        );
        Ok(response)
    }
}

/// Client for the directions service.
///
/// # Examples
/// ```no_run
/// use geo::Coord;
/// use waypath_client::DirectionsClient;
/// use waypath_core::{Attribute, ProfileIdentifier, RouteOptions};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DirectionsClient::new("pk.my-token")?;
/// let options = RouteOptions::new(
///     vec![
///         Coord { x: -122.431373, y: 37.780602 },
///         Coord { x: -122.404058, y: 37.758859 },
///     ],
///     ProfileIdentifier::AutomobileAvoidingTraffic,
/// )
/// .with_attribute(Attribute::CongestionLevel);
///
/// let response = client.fetch_directions(&options).await?;
/// println!("{} route(s)", response.routes.len());
/// # Ok(())
/// # }
/// ```
pub struct DirectionsClient {
    inner: Arc<ClientInner>,
    executor: Executor,
}

impl std::fmt::Debug for DirectionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let executor = match self.executor {
            Executor::Ambient(_) => "<ambient runtime>",
            Executor::Owned(_) => "<owned runtime>",
        };
        f.debug_struct("DirectionsClient")
            .field("config", &self.inner.config)
            .field("transport", &self.inner.transport)
            .field("executor", &executor)
            .finish()
    }
}

impl DirectionsClient {
    /// Create a client for the default host.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(access_token: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(DirectionsConfig::new(access_token))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: DirectionsConfig) -> Result<Self, ClientBuildError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the Tokio runtime
    /// fails to build.
    pub fn with_transport(
        config: DirectionsConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ClientBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let executor = Executor::detect()?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                base_url,
                transport,
            }),
            executor,
        })
    }

    /// Configuration the client was built with.
    #[must_use]
    pub fn config(&self) -> &DirectionsConfig {
        &self.inner.config
    }

    /// Build the request that `options` would issue.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionsError::InvalidOptions`] when the options fail
    /// validation.
    pub fn request_for(&self, options: &RouteOptions) -> Result<TransportRequest, DirectionsError> {
        self.inner.request_for(options)
    }

    /// Fetch and decode directions for `options`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionsError`] when validation, transport or decoding
    /// fails.
    pub async fn fetch_directions(
        &self,
        options: &RouteOptions,
    ) -> Result<DirectionsResponse, DirectionsError> {
        self.inner.fetch(options).await
    }

    /// Start a request in the background and return its handle at once.
    ///
    /// `completion` runs exactly once, on a runtime worker. If the handle is
    /// cancelled before the request finishes it receives
    /// [`DirectionsError::Cancelled`] instead of the outcome.
    ///
    /// # Examples
    /// ```no_run
    /// use geo::Coord;
    /// use waypath_client::DirectionsClient;
    /// use waypath_core::{ProfileIdentifier, RouteOptions};
    ///
    /// let client = DirectionsClient::new("pk.my-token")?;
    /// let options = RouteOptions::new(
    ///     vec![Coord { x: -0.1, y: 51.5 }, Coord { x: -0.2, y: 51.6 }],
    ///     ProfileIdentifier::Walking,
    /// );
    /// let task = client.calculate(options, |result| match result {
    ///     Ok(response) => println!("{} route(s)", response.routes.len()),
    ///     Err(err) => eprintln!("{err}"),
    /// });
    /// task.cancel();
    /// # Ok::<(), waypath_client::ClientBuildError>(())
    /// ```
    pub fn calculate<F>(&self, options: RouteOptions, completion: F) -> DirectionsTask
    where
        F: FnOnce(Result<DirectionsResponse, DirectionsError>) + Send + 'static,
    {
        let task = DirectionsTask::new();
        let handle = task.clone();
        let inner = Arc::clone(&self.inner);
        let completion = Completion::new(task.clone(), completion);

        self.executor.handle().spawn(async move {
            if !handle.start() {
                debug!("directions task cancelled before it started");
                completion.deliver(Err(DirectionsError::Cancelled));
                return;
            }

            let result = inner.fetch(&options).await;
            let outcome = if result.is_ok() {
                TaskState::Completed
            } else {
                TaskState::Failed
            };

            if handle.finish(outcome) {
                completion.deliver(result);
            } else {
                warn!("directions task finished after cancellation; discarding result");
                completion.deliver(Err(DirectionsError::Cancelled));
            }
        });

        task
    }
}

/// Parse the base URL so that joining a relative path appends to it.
fn parse_base_url(raw: &str) -> Result<Url, ClientBuildError> {
    let normalised = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalised).map_err(|source| ClientBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubTransport;
    use geo::Coord;
    use rstest::{fixture, rstest};
    use waypath_core::{ProfileIdentifier, RouteOptionsError};

    #[fixture]
    fn options() -> RouteOptions {
        RouteOptions::new(
            vec![Coord { x: -0.1, y: 51.5 }, Coord { x: -0.2, y: 51.6 }],
            ProfileIdentifier::Walking,
        )
    }

    fn client(base_url: &str) -> DirectionsClient {
        DirectionsClient::with_transport(
            DirectionsConfig::new("token").with_base_url(base_url),
            Arc::new(StubTransport::with_body("{}")),
        )
        .expect("client should build")
    }

    #[rstest]
    #[case("https://api.example.com")]
    #[case("https://api.example.com/")]
    fn request_url_joins_path(options: RouteOptions, #[case] base_url: &str) {
        let request = client(base_url)
            .request_for(&options)
            .expect("valid options");
        assert_eq!(
            request.url.as_str(),
            "https://api.example.com/directions/v5/mapbox/walking/-0.1,51.5;-0.2,51.6.json"
        );
        assert_eq!(request.url.query(), None);
        assert_eq!(request.query_value("access_token"), Some("token"));
    }

    #[rstest]
    fn request_url_keeps_base_path(options: RouteOptions) {
        let request = client("http://localhost:8080/proxy")
            .request_for(&options)
            .expect("valid options");
        assert!(
            request
                .url
                .as_str()
                .starts_with("http://localhost:8080/proxy/directions/v5/")
        );
    }

    #[rstest]
    fn invalid_options_are_rejected_before_sending(mut options: RouteOptions) {
        options.coordinates.truncate(1);
        let err = client("https://api.example.com")
            .request_for(&options)
            .expect_err("one coordinate is not enough");
        assert!(matches!(
            err,
            DirectionsError::InvalidOptions(RouteOptionsError::TooFewCoordinates { count: 1 })
        ));
    }

    #[rstest]
    fn invalid_base_url_fails_construction() {
        let err = DirectionsClient::with_transport(
            DirectionsConfig::new("token").with_base_url("not a url"),
            Arc::new(StubTransport::with_body("{}")),
        )
        .expect_err("relative base URL");
        assert!(matches!(err, ClientBuildError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", client("https://api.example.com"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("<owned runtime>"));
    }

    #[rstest]
    fn undelivered_completion_reports_cancellation() {
        let task = DirectionsTask::new();
        assert!(task.start());
        let (tx, rx) = std::sync::mpsc::channel();

        drop(Completion::new(task.clone(), move |result| {
            let _ = tx.send(result);
        }));

        let result = rx.try_recv().expect("completion must run on drop");
        assert!(matches!(result, Err(DirectionsError::Cancelled)));
        assert_eq!(task.state(), TaskState::Canceled);
    }

    #[rstest]
    fn delivered_completion_runs_once() {
        let task = DirectionsTask::new();
        let (tx, rx) = std::sync::mpsc::channel();

        Completion::new(task.clone(), move |result| {
            let _ = tx.send(result);
        })
        .deliver(Err(DirectionsError::Cancelled));

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
        assert_eq!(task.state(), TaskState::Pending);
    }

    #[rstest]
    #[tokio::test]
    async fn construction_inside_runtime_reuses_handle() {
        let rendered = format!("{:?}", client("https://api.example.com"));
        assert!(rendered.contains("<ambient runtime>"));
    }
}
