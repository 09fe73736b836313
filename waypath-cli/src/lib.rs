//! Command-line interface for requesting and decoding driving directions.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use log::info;
use std::io::{BufReader, Write};
use waypath_core::{DirectionsResponse, RouteOptions};
use waypath_fs::open_utf8_file;

mod decode;
mod error;
mod route;

pub use error::CliError;

use decode::{DecodeArgs, run_decode};
use route::{RouteArgs, run_route};

const ARG_OPTIONS: &str = "options";
const ARG_ACCESS_TOKEN: &str = "access-token";
const ARG_BASE_URL: &str = "base-url";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_RESPONSE: &str = "response";
const ARG_OUTPUT: &str = "output";
const ENV_ROUTE_OPTIONS: &str = "WAYPATH_CMDS_ROUTE_OPTIONS_PATH";
const ENV_ROUTE_ACCESS_TOKEN: &str = "WAYPATH_CMDS_ROUTE_ACCESS_TOKEN";
const ENV_DECODE_OPTIONS: &str = "WAYPATH_CMDS_DECODE_OPTIONS_PATH";
const ENV_DECODE_RESPONSE: &str = "WAYPATH_CMDS_DECODE_RESPONSE_PATH";

/// Run the Waypath CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => run_route(args),
        Command::Decode(args) => run_decode(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "waypath",
    about = "Request and decode annotated driving directions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Request directions for a set of route options.
    Route(RouteArgs),
    /// Decode a saved directions response against its route options.
    Decode(DecodeArgs),
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match waypath_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads JSON-encoded [`RouteOptions`] from disk.
fn load_route_options(path: &Utf8Path) -> Result<RouteOptions, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::ReadInput {
        field: ARG_OPTIONS,
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRouteOptions {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the decoded routes as pretty JSON, to `output` when given and to
/// `writer` otherwise.
fn write_routes(
    writer: &mut dyn Write,
    output: Option<&Utf8Path>,
    response: &DirectionsResponse,
) -> Result<(), CliError> {
    let mut payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialiseRoutes)?;
    payload.push('\n');
    if let Some(path) = output {
        waypath_fs::write_utf8_file(path, payload.as_bytes()).map_err(|source| {
            CliError::WriteOutputFile {
                path: path.to_path_buf(),
                source,
            }
        })?;
        info!("wrote {} route(s) to {path}", response.routes.len());
        return Ok(());
    }
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)
}

#[cfg(test)]
mod tests;
