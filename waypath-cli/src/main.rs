//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use env_logger::{Builder, Env};
use waypath_cli::CliError;

fn main() -> eyre::Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    match waypath_cli::run() {
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        other => other.map_err(eyre::Report::from),
    }
}
