//! Route command implementation for the Waypath CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;
use waypath_client::{DEFAULT_BASE_URL, DirectionsClient, DirectionsConfig};
use waypath_core::DirectionsResponse;

use crate::{
    ARG_ACCESS_TOKEN, ARG_BASE_URL, ARG_OPTIONS, ARG_OUTPUT, ARG_TIMEOUT_SECS, CliError,
    ENV_ROUTE_ACCESS_TOKEN, ENV_ROUTE_OPTIONS, load_route_options, require_existing,
    write_routes,
};

/// Request timeout used when none is configured.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Request directions from a Mapbox-compatible service. The \
                 waypoints, profile and requested annotations come from a \
                 JSON-encoded RouteOptions file; the decoded routes are \
                 printed as JSON.",
    about = "Request annotated directions"
)]
#[ortho_config(prefix = "WAYPATH")]
pub(crate) struct RouteArgs {
    /// Path to a JSON file containing RouteOptions.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) options_path: Option<Utf8PathBuf>,
    /// Access token sent with the request.
    #[arg(long = ARG_ACCESS_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) access_token: Option<String>,
    /// Service host (e.g. "https://api.mapbox.com").
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Write the routes to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct RouteConfig {
    pub(crate) options_path: Utf8PathBuf,
    pub(crate) access_token: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl std::fmt::Debug for RouteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteConfig")
            .field("options_path", &self.options_path)
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("output", &self.output)
            .finish()
    }
}

impl RouteConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.options_path, ARG_OPTIONS)
    }

    /// Client settings for this invocation.
    pub(crate) fn directions_config(&self) -> DirectionsConfig {
        DirectionsConfig::new(self.access_token.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout)
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let options_path = args.options_path.ok_or(CliError::MissingArgument {
            field: ARG_OPTIONS,
            env: ENV_ROUTE_OPTIONS,
        })?;
        let access_token = args
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_ACCESS_TOKEN,
                env: ENV_ROUTE_ACCESS_TOKEN,
            })?;
        let base_url = args
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::ZeroTimeout {
                field: ARG_TIMEOUT_SECS,
            });
        }
        let timeout = Duration::from_secs(timeout_secs);

        Ok(Self {
            options_path,
            access_token,
            base_url,
            timeout,
            output: args.output,
        })
    }
}

/// Builds a directions client for the current route invocation.
pub(super) trait RouteClientBuilder {
    fn build(&self, config: &RouteConfig) -> Result<DirectionsClient, CliError>;
}

pub(super) struct DefaultRouteClientBuilder;

impl RouteClientBuilder for DefaultRouteClientBuilder {
    fn build(&self, config: &RouteConfig) -> Result<DirectionsClient, CliError> {
        DirectionsClient::with_config(config.directions_config()).map_err(CliError::from)
    }
}

pub(super) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRouteClientBuilder;
    run_route_with(args, &builder, &mut stdout)
}

pub(super) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouteClientBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_route_config(args)?;
    let response = execute_route(&config, builder)?;
    write_routes(writer, config.output.as_deref(), &response)
}

fn resolve_route_config(args: RouteArgs) -> Result<RouteConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_route(
    config: &RouteConfig,
    builder: &dyn RouteClientBuilder,
) -> Result<DirectionsResponse, CliError> {
    let options = load_route_options(&config.options_path)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::BuildRuntime)?;
    // Built inside the runtime so the client reuses its handle.
    runtime.block_on(async {
        let client = builder.build(config)?;
        client
            .fetch_directions(&options)
            .await
            .map_err(|source| CliError::Directions { source })
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
