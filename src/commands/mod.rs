//! Command implementations for rollout.
//!
//! The tool has two modes: a full run (optionally forced) and a dry run that
//! only lists repositories. Both return the process exit code on success.

mod dry_run;
mod run;

use crate::cli::Cli;
use crate::error::Result;

/// Route parsed arguments to the matching mode.
pub fn dispatch(cli: Cli) -> Result<i32> {
    if cli.dry_run {
        dry_run::cmd_dry_run()
    } else {
        run::cmd_run(cli.force)
    }
}
