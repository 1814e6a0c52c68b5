//! Repository cloning with hosting-CLI-first, plain-git fallback.
//!
//! # Procedure
//!
//! 1. Remove any stale working copy left by an earlier, interrupted run.
//! 2. If a hosting CLI was resolved, try `<cli> repo clone <org>/<name> <dest>`.
//! 3. Otherwise, or if that attempt fails or leaves no usable working copy,
//!    run `git clone <base>/<org>/<name>.git <dest>`.
//!
//! There is no retry beyond this single fallback.

use crate::context::RunContext;
use crate::error::{Result, RolloutError};
use crate::fs::remove_dir_if_exists;
use crate::git::{self, run_command};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Why the hosting CLI path was not the one that produced the working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliSkip {
    /// No hosting CLI is configured or resolvable.
    Absent,
    /// The hosting CLI ran but did not produce a working copy.
    Failed(String),
}

/// Result of cloning one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    /// Cloned by the hosting CLI.
    HostingCli,
    /// Cloned by plain git after the hosting CLI path was skipped.
    Git { skipped: CliSkip },
    /// Neither method produced a working copy.
    Failed { skipped: CliSkip, error: String },
}

impl CloneOutcome {
    pub fn is_cloned(&self) -> bool {
        !matches!(self, CloneOutcome::Failed { .. })
    }
}

impl fmt::Display for CloneOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloneOutcome::HostingCli => write!(f, "cloned via hosting CLI"),
            CloneOutcome::Git { skipped: CliSkip::Absent } => write!(f, "cloned via git"),
            CloneOutcome::Git {
                skipped: CliSkip::Failed(_),
            } => write!(f, "cloned via git (hosting CLI failed)"),
            CloneOutcome::Failed { skipped, error } => match skipped {
                CliSkip::Absent => write!(f, "clone failed: {}", error),
                CliSkip::Failed(cli_error) => write!(
                    f,
                    "clone failed: hosting CLI: {}; git: {}",
                    cli_error, error
                ),
            },
        }
    }
}

/// Produce a fresh working copy of `repo` at `ctx.working_copy(repo)`.
///
/// Only filesystem errors while clearing the destination are returned as
/// `Err`; clone failures are reported through `CloneOutcome::Failed`.
pub fn clone_repo(ctx: &RunContext, repo: &str) -> Result<CloneOutcome> {
    let dest = ctx.working_copy(repo);
    remove_dir_if_exists(&dest)?;
    std::fs::create_dir_all(&ctx.scratch_dir).map_err(|e| {
        RolloutError::UserError(format!(
            "failed to create scratch directory '{}': {}",
            ctx.scratch_dir.display(),
            e
        ))
    })?;

    let skipped = match &ctx.hosting_cli {
        None => CliSkip::Absent,
        Some(cli) => match clone_with_cli(ctx, cli, repo, &dest) {
            Ok(()) => return Ok(CloneOutcome::HostingCli),
            Err(reason) => {
                debug!(repo, reason = %reason, "hosting CLI clone failed, falling back to git");
                remove_dir_if_exists(&dest)?;
                CliSkip::Failed(reason)
            }
        },
    };

    let url = ctx.clone_url(repo);
    let result = git::clone(&ctx.scratch_dir, &url, &dest).and_then(|()| {
        if is_working_copy(&dest) {
            Ok(())
        } else {
            Err(RolloutError::GitError(format!(
                "git clone of {} produced no working copy",
                url
            )))
        }
    });

    match result {
        Ok(()) => Ok(CloneOutcome::Git { skipped }),
        Err(e) => {
            remove_dir_if_exists(&dest)?;
            Ok(CloneOutcome::Failed {
                skipped,
                error: e.to_string(),
            })
        }
    }
}

fn clone_with_cli(
    ctx: &RunContext,
    cli: &Path,
    repo: &str,
    dest: &Path,
) -> std::result::Result<(), String> {
    let qualified = ctx.qualified_name(repo);
    let dest_arg = dest.to_string_lossy();

    run_command(cli, &ctx.scratch_dir, &["repo", "clone", &qualified, &dest_arg])
        .map_err(|e| e.to_string())?;

    if is_working_copy(dest) {
        Ok(())
    } else {
        Err(format!("{} exited successfully but produced no working copy", cli.display()))
    }
}

fn is_working_copy(dest: &Path) -> bool {
    dest.join(".git").exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TEST_ORG, create_remote, test_context};
    use crate::tools::resolve_optional;
    use tempfile::TempDir;

    #[test]
    fn test_clone_without_hosting_cli_uses_git() {
        let temp_dir = TempDir::new().unwrap();
        create_remote(temp_dir.path(), TEST_ORG, "api", &[]);
        let ctx = test_context(temp_dir.path());

        let outcome = clone_repo(&ctx, "api").unwrap();

        assert_eq!(outcome, CloneOutcome::Git { skipped: CliSkip::Absent });
        assert!(ctx.working_copy("api").join("README.md").exists());
    }

    #[test]
    fn test_failing_hosting_cli_falls_back_to_git() {
        let temp_dir = TempDir::new().unwrap();
        create_remote(temp_dir.path(), TEST_ORG, "api", &[]);
        let mut ctx = test_context(temp_dir.path());
        ctx.hosting_cli = resolve_optional("false");
        assert!(ctx.hosting_cli.is_some(), "`false` should be on PATH");

        let outcome = clone_repo(&ctx, "api").unwrap();

        assert!(matches!(
            outcome,
            CloneOutcome::Git {
                skipped: CliSkip::Failed(_)
            }
        ));
        assert!(outcome.is_cloned());
    }

    #[test]
    fn test_hosting_cli_without_working_copy_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        create_remote(temp_dir.path(), TEST_ORG, "api", &[]);
        let mut ctx = test_context(temp_dir.path());
        // `true` exits 0 without cloning anything.
        ctx.hosting_cli = resolve_optional("true");

        let outcome = clone_repo(&ctx, "api").unwrap();

        match outcome {
            CloneOutcome::Git {
                skipped: CliSkip::Failed(reason),
            } => assert!(reason.contains("produced no working copy")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_stale_working_copy_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        create_remote(temp_dir.path(), TEST_ORG, "api", &[]);
        let ctx = test_context(temp_dir.path());

        let stale = ctx.working_copy("api");
        std::fs::create_dir_all(stale.join("leftover/dir")).unwrap();
        std::fs::write(stale.join("leftover/dir/old.txt"), "stale").unwrap();
        std::fs::write(stale.join("README.md"), "stale readme").unwrap();

        let outcome = clone_repo(&ctx, "api").unwrap();

        assert!(outcome.is_cloned());
        assert!(!stale.join("leftover").exists());
        assert_eq!(std::fs::read_to_string(stale.join("README.md")).unwrap(), "# api\n");
    }

    #[test]
    fn test_missing_remote_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = test_context(temp_dir.path());
        ctx.hosting_cli = resolve_optional("false");

        let outcome = clone_repo(&ctx, "ghost").unwrap();

        match &outcome {
            CloneOutcome::Failed {
                skipped: CliSkip::Failed(_),
                error,
            } => assert!(error.contains("git clone failed")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(!outcome.is_cloned());
        assert!(!ctx.working_copy("ghost").exists());
        assert!(outcome.to_string().starts_with("clone failed"));
    }
}
