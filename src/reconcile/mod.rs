//! Workflow reconciliation for a single working copy.
//!
//! # Procedure
//!
//! 1. Ensure `.github/workflows/` exists in the working copy
//! 2. Note whether the target workflow file already exists
//! 3. Copy the canonical workflow over the target
//! 4. Stage the workflow directory and compute the change set against `HEAD`;
//!    an ignored workflow path yields an empty change set
//! 5. Commit and push when the change set is non-empty, or when forced
//!
//! Running twice with no upstream change produces no second commit unless
//! the force flag is set.

mod message;


pub use message::CommitKind;

use crate::context::RunContext;
use crate::error::{Result, RolloutError};
use crate::fs::install_file;
use crate::git;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// What reconciling one working copy did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// A commit was created and pushed.
    Committed { kind: CommitKind, sha: String },
    /// The workflow already matched; nothing was committed.
    UpToDate,
    /// Nothing was staged even though the workflow did not exist before.
    NoChanges,
}

impl ReconcileOutcome {
    /// Short label used in history records.
    pub fn label(&self) -> &'static str {
        match self {
            ReconcileOutcome::Committed { kind, .. } => kind.label(),
            ReconcileOutcome::UpToDate => "up_to_date",
            ReconcileOutcome::NoChanges => "no_changes",
        }
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileOutcome::Committed { kind, sha } => {
                write!(f, "{} workflow and pushed {}", kind.label(), sha)
            }
            ReconcileOutcome::UpToDate => write!(f, "already up to date"),
            ReconcileOutcome::NoChanges => write!(f, "no changes staged"),
        }
    }
}

/// Bring the workflow in `working_copy` in line with the canonical file.
pub fn reconcile(ctx: &RunContext, working_copy: &Path) -> Result<ReconcileOutcome> {
    let workflow_dir = working_copy.join(ctx.workflow_dir());
    std::fs::create_dir_all(&workflow_dir).map_err(|e| {
        RolloutError::WorkflowError(format!(
            "failed to create '{}': {}",
            workflow_dir.display(),
            e
        ))
    })?;

    let target = working_copy.join(&ctx.workflow_target);
    let file_existed = target.exists();

    install_file(&ctx.workflow_source, &target)?;

    let changed = if git::is_ignored(working_copy, &ctx.workflow_target.to_string_lossy())? {
        debug!(
            working_copy = %working_copy.display(),
            "workflow path is ignored; nothing to stage"
        );
        Vec::new()
    } else {
        let pathspec = ctx.workflow_dir().to_string_lossy().to_string();
        git::stage(working_copy, &pathspec)?;
        git::staged_paths(working_copy, &pathspec)?
    };
    debug!(
        working_copy = %working_copy.display(),
        file_existed,
        changed = changed.len(),
        "computed change set"
    );

    let Some(kind) = CommitKind::select(file_existed, !changed.is_empty(), ctx.force) else {
        return Ok(if file_existed {
            ReconcileOutcome::UpToDate
        } else {
            ReconcileOutcome::NoChanges
        });
    };

    git::commit(
        working_copy,
        &kind.message(&ctx.workflow_target),
        kind == CommitKind::Refresh,
        ctx.commit_author.as_ref(),
    )?;
    let sha = git::head_short_sha(working_copy)?;

    git::push(working_copy, &ctx.remote, &ctx.branch).map_err(|e| {
        RolloutError::GitError(format!(
            "failed to push to {}/{}: {}\n\n\
             The remote branch may have moved or push access may be missing.\n\
             Rerun the rollout once the repository accepts pushes.",
            ctx.remote, ctx.branch, e
        ))
    })?;

    Ok(ReconcileOutcome::Committed { kind, sha })
}
