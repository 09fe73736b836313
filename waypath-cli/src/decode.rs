//! Decode command implementation for the Waypath CLI.
//!
//! Replays a saved directions response through the same decoder the client
//! uses, which is handy for checking recorded fixtures offline.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use waypath_core::{DirectionsResponse, decode_response};
use waypath_fs::read_utf8_to_string;

use crate::{
    ARG_OPTIONS, ARG_OUTPUT, ARG_RESPONSE, CliError, ENV_DECODE_OPTIONS, ENV_DECODE_RESPONSE,
    load_route_options, require_existing, write_routes,
};

/// CLI arguments for the `decode` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Decode a directions response saved on disk, checking its \
                 annotations against the RouteOptions that requested it.",
    about = "Decode a saved directions response"
)]
#[ortho_config(prefix = "WAYPATH")]
pub(crate) struct DecodeArgs {
    /// Path to a JSON file containing RouteOptions.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) options_path: Option<Utf8PathBuf>,
    /// Path to the saved directions response body.
    #[arg(long = ARG_RESPONSE, value_name = "path")]
    #[serde(default)]
    pub(crate) response: Option<Utf8PathBuf>,
    /// Write the routes to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl DecodeArgs {
    pub(crate) fn into_config(self) -> Result<DecodeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DecodeConfig::try_from(merged)
    }
}

/// Resolved `decode` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodeConfig {
    pub(crate) options_path: Utf8PathBuf,
    pub(crate) response_path: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl DecodeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.options_path, ARG_OPTIONS)?;
        require_existing(&self.response_path, ARG_RESPONSE)?;
        Ok(())
    }
}

impl TryFrom<DecodeArgs> for DecodeConfig {
    type Error = CliError;

    fn try_from(args: DecodeArgs) -> Result<Self, Self::Error> {
        let options_path = args.options_path.ok_or(CliError::MissingArgument {
            field: ARG_OPTIONS,
            env: ENV_DECODE_OPTIONS,
        })?;
        let response_path = args.response.ok_or(CliError::MissingArgument {
            field: ARG_RESPONSE,
            env: ENV_DECODE_RESPONSE,
        })?;
        Ok(Self {
            options_path,
            response_path,
            output: args.output,
        })
    }
}

pub(super) fn run_decode(args: DecodeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_decode_with(args, &mut stdout)
}

pub(super) fn run_decode_with(args: DecodeArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let response = execute_decode(&config)?;
    write_routes(writer, config.output.as_deref(), &response)
}

fn execute_decode(config: &DecodeConfig) -> Result<DirectionsResponse, CliError> {
    let options = load_route_options(&config.options_path)?;
    let body = read_utf8_to_string(&config.response_path).map_err(|source| {
        CliError::ReadInput {
            field: ARG_RESPONSE,
            path: config.response_path.clone(),
            source,
        }
    })?;
    decode_response(&body, &options).map_err(|source| CliError::DecodeResponse {
        path: config.response_path.clone(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DecodeConfig, CliError> {
    let merged = DecodeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DecodeConfig::try_from(merged)
}
