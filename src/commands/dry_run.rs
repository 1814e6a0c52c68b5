//! `rollout --dry-run`: list the repositories a full run would process.
//!
//! Reads configuration and the repository list only. Nothing is cloned, no
//! tools are resolved, and the scratch directory is never created.

use crate::config::locate_config;
use crate::error::{Result, RolloutError};
use crate::exit_codes;
use crate::repos::RepoList;
use std::io::Write;
use std::path::Path;

pub fn cmd_dry_run() -> Result<i32> {
    let cwd = std::env::current_dir().map_err(|e| {
        RolloutError::UserError(format!("failed to get current working directory: {}", e))
    })?;
    let repos = load_repos(&cwd)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    repos
        .write_lines(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| RolloutError::UserError(format!("failed to write repository list: {}", e)))?;

    eprintln!("Dry run: {} repositories would be processed", repos.len());
    Ok(exit_codes::SUCCESS)
}

fn load_repos(cwd: &Path) -> Result<RepoList> {
    let (config, base_dir) = locate_config(cwd)?;
    RepoList::load(base_dir.join(&config.repos_file))
}
