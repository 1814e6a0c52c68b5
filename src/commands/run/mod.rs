//! Implementation of a full rollout run.
//!
//! # What a run does
//!
//! 1. Loads and validates `rollout.yaml`, requiring an organization
//! 2. Resolves mandatory tools (fatal if missing) and the optional hosting CLI
//! 3. Loads the repository list (fatal if missing, malformed, or invalid)
//! 4. Creates the scratch directory and arms interrupt cleanup
//! 5. For each repository, in order: clone, reconcile, report
//! 6. Prints the summary, appends run history, removes the scratch directory
//!
//! Steps 1-3 abort before any repository is touched. From step 5 on, a
//! failing repository is counted and the batch moves on.

mod display;
mod summary;


pub use summary::{RepoOutcome, RunSummary};

use crate::clone::clone_repo;
use crate::config::locate_config;
use crate::context::RunContext;
use crate::error::{Result, RolloutError};
use crate::history::{HistoryAction, HistoryRecord, append_records};
use crate::reconcile::{ReconcileOutcome, reconcile};
use crate::repos::RepoList;
use crate::scratch::{ScratchDir, install_interrupt_cleanup};
use crate::tools::ToolSet;
use serde_json::json;
use tracing::{info, warn};

/// Execute a full run from the current working directory.
pub fn cmd_run(force: bool) -> Result<i32> {
    let cwd = std::env::current_dir().map_err(|e| {
        RolloutError::UserError(format!("failed to get current working directory: {}", e))
    })?;

    let (config, base_dir) = locate_config(&cwd)?;
    config.validate_for_run()?;
    let tools = ToolSet::detect(&config)?;
    for (tool, path) in &tools.required {
        info!(tool = %tool, path = %path.display(), "using required tool");
    }
    let ctx = RunContext::new(&config, &base_dir, &tools, force);
    let repos = RepoList::load(base_dir.join(&config.repos_file))?;

    install_interrupt_cleanup(ctx.scratch_dir.clone())?;

    let summary = execute(&ctx, &repos)?;
    Ok(summary.exit_code())
}

/// Process every repository in `repos` and return the counters.
///
/// The scratch directory exists only for the duration of this call.
pub fn execute(ctx: &RunContext, repos: &RepoList) -> Result<RunSummary> {
    let scratch = ScratchDir::create(&ctx.scratch_dir)?;
    info!(
        repos = repos.len(),
        force = ctx.force,
        scratch = %scratch.path().display(),
        "starting rollout"
    );

    if repos.is_empty() {
        warn!("repository list is empty; nothing to roll out");
    }

    let mut summary = RunSummary::default();
    let mut records = Vec::with_capacity(repos.len() + 1);

    for (index, repo) in repos.iter().enumerate() {
        display::print_banner(index + 1, repos.len(), repo);

        let outcome = process_repo(ctx, repo);

        display::print_outcome(repo, &outcome);
        display::print_separator();

        summary.record(repo, &outcome);
        records.push(repo_record(repo, &outcome));
    }

    display::print_summary(&summary);

    if let Some(path) = &ctx.history_file {
        records.push(summary_record(ctx, &summary));
        if let Err(e) = append_records(path, &records) {
            warn!("run history not written: {}", e);
        }
    }

    Ok(summary)
}

/// Clone then reconcile one repository. Never aborts the batch.
pub fn process_repo(ctx: &RunContext, repo: &str) -> RepoOutcome {
    let cloned = match clone_repo(ctx, repo) {
        Ok(outcome) => outcome,
        Err(e) => return RepoOutcome::CloneFailed(e.to_string()),
    };

    if !cloned.is_cloned() {
        return RepoOutcome::CloneFailed(cloned.to_string());
    }
    display::print_clone(&cloned);

    match reconcile(ctx, &ctx.working_copy(repo)) {
        Ok(ReconcileOutcome::NoChanges) => {
            warn!(
                repo,
                "{} was created but nothing was staged; check .gitignore rules",
                ctx.workflow_target.display()
            );
            RepoOutcome::Reconciled(ReconcileOutcome::NoChanges)
        }
        Ok(outcome) => RepoOutcome::Reconciled(outcome),
        Err(e) => RepoOutcome::ReconcileFailed(e.to_string()),
    }
}

fn repo_record(repo: &str, outcome: &RepoOutcome) -> HistoryRecord {
    let sha = match outcome {
        RepoOutcome::Reconciled(ReconcileOutcome::Committed { sha, .. }) => Some(sha.as_str()),
        _ => None,
    };

    HistoryRecord::new(HistoryAction::Repository)
        .with_repo(repo)
        .with_details(json!({
            "status": if outcome.is_success() { "succeeded" } else { "failed" },
            "outcome": outcome.label(),
            "commit": sha,
            "error": outcome.error(),
        }))
}

fn summary_record(ctx: &RunContext, summary: &RunSummary) -> HistoryRecord {
    HistoryRecord::new(HistoryAction::Summary).with_details(json!({
        "organization": ctx.organization,
        "force": ctx.force,
        "total": summary.total,
        "succeeded": summary.succeeded,
        "failed": summary.failed,
        "failed_repos": summary.failed_repos,
    }))
}
