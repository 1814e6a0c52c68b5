//! Rollout: push a canonical CI workflow file to every repository in a list.
//!
//! This is the main entry point for the `rollout` CLI. It parses arguments,
//! sets up logging, dispatches to the selected mode, and maps errors to exit
//! codes.

mod cli;
mod clone;
mod commands;
mod config;
mod context;
mod error;
mod exit_codes;
mod fs;
mod git;
mod history;
mod reconcile;
mod repos;
mod scratch;
mod tools;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV_VAR: &str = "ROLLOUT_LOG";

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => return ExitCode::from(cli::report_parse_error(&err) as u8),
    };

    init_tracing();

    match commands::dispatch(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("rollout=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
