//! Error types emitted by the Waypath CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waypath_client::{ClientBuildError, DirectionsError};
use waypath_core::DecodeError;

/// Errors emitted by the Waypath CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A timeout of zero seconds would fail every request.
    #[error("{field} must be at least 1 second")]
    ZeroTimeout { field: &'static str },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading an input file failed.
    #[error("failed to read {field} file {path:?}: {source}")]
    ReadInput {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Route options JSON could not be decoded.
    #[error("failed to parse route options JSON at {path:?}: {source}")]
    ParseRouteOptions {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A saved directions response could not be decoded.
    #[error("failed to decode directions response at {path:?}: {source}")]
    DecodeResponse {
        path: Utf8PathBuf,
        #[source]
        source: DecodeError,
    },
    /// Constructing the directions client failed.
    #[error(transparent)]
    BuildClient(#[from] ClientBuildError),
    /// Constructing the async runtime failed.
    #[error("failed to build Tokio runtime: {0}")]
    BuildRuntime(#[source] std::io::Error),
    /// The directions request failed.
    #[error("directions request failed: {source}")]
    Directions { source: DirectionsError },
    /// Serialising the decoded routes failed.
    #[error("failed to serialise routes: {0}")]
    SerialiseRoutes(#[source] serde_json::Error),
    /// Writing the routes to stdout failed.
    #[error("failed to write routes: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the routes to the output file failed.
    #[error("failed to write routes to {path:?}: {source}")]
    WriteOutputFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
