//! Per-repository outcomes and batch counters.

use crate::exit_codes;
use crate::reconcile::ReconcileOutcome;

/// Final state of one repository in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoOutcome {
    /// Neither clone method produced a working copy.
    CloneFailed(String),
    /// The working copy was cloned but could not be reconciled or pushed.
    ReconcileFailed(String),
    /// Reconciliation finished (with or without a commit).
    Reconciled(ReconcileOutcome),
}

impl RepoOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RepoOutcome::Reconciled(_))
    }

    /// Short label used in history records.
    pub fn label(&self) -> &'static str {
        match self {
            RepoOutcome::CloneFailed(_) => "clone_failed",
            RepoOutcome::ReconcileFailed(_) => "reconcile_failed",
            RepoOutcome::Reconciled(outcome) => outcome.label(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RepoOutcome::CloneFailed(e) | RepoOutcome::ReconcileFailed(e) => Some(e),
            RepoOutcome::Reconciled(_) => None,
        }
    }
}

/// Counters for one batch.
///
/// Every recorded repository increments exactly one of `succeeded` and
/// `failed`, so `total == succeeded + failed` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Names of failed repositories, in processing order.
    pub failed_repos: Vec<String>,
}

impl RunSummary {
    pub fn record(&mut self, repo: &str, outcome: &RepoOutcome) {
        self.total += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
            self.failed_repos.push(repo.to_string());
        }
    }

    /// `SUCCESS` iff no repository failed.
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 {
            exit_codes::SUCCESS
        } else {
            exit_codes::FAILURE
        }
    }
}
