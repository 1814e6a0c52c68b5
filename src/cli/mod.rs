//! CLI argument parsing for rollout.
//!
//! Uses clap derive macros. The tool has no subcommands: a bare invocation
//! runs the full batch, `--dry-run` only lists repositories, and `--force`
//! commits even when a workflow is already up to date.

use crate::exit_codes;
use clap::Parser;
use clap::error::ErrorKind;

/// Roll out the canonical CI workflow to every repository in the list.
///
/// Each repository is cloned into a scratch directory, the workflow file is
/// copied to `.github/workflows/`, and a commit is pushed when the file
/// changed. Configuration is read from `rollout.yaml` (or `$ROLLOUT_CONFIG`).
#[derive(Parser, Debug)]
#[command(name = "rollout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the repositories that would be processed, then exit.
    #[arg(long, conflicts_with = "force")]
    pub dry_run: bool,

    /// Commit (possibly empty) even when the workflow is already up to date.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse arguments from the process environment.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Cli::try_parse()
    }
}

/// Print a parse failure (or help/version output) and pick the exit code.
///
/// Help and version requests exit 0; every other parse error exits 1.
pub fn report_parse_error(err: &clap::Error) -> i32 {
    // Printing only fails on a closed stdout/stderr; nothing useful to do then.
    let _ = err.print();
    parse_error_exit_code(err)
}

fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::SUCCESS,
        _ => exit_codes::FAILURE,
    }
}
