//! Console output for a batch run.
//!
//! Progress and informational lines go to stdout; failures go to stderr.

use super::summary::{RepoOutcome, RunSummary};
use crate::clone::CloneOutcome;
use crate::reconcile::ReconcileOutcome;

const SEPARATOR: &str = "----------------------------------------";

pub fn print_banner(index: usize, total: usize, repo: &str) {
    println!("==> [{}/{}] {}", index, total, repo);
}

pub fn print_clone(outcome: &CloneOutcome) {
    println!("    {}", outcome);
}

pub fn print_outcome(repo: &str, outcome: &RepoOutcome) {
    let line = outcome_line(repo, outcome);
    match outcome.error() {
        Some(error) => {
            eprintln!("{}", line);
            for detail in error.lines().filter(|l| !l.trim().is_empty()) {
                eprintln!("    {}", detail);
            }
        }
        None => println!("{}", line),
    }
}

pub fn print_separator() {
    println!("{}", SEPARATOR);
}

/// One labeled line per repository.
pub fn outcome_line(repo: &str, outcome: &RepoOutcome) -> String {
    match outcome {
        RepoOutcome::Reconciled(ReconcileOutcome::NoChanges) => {
            format!("[warn] {}: no changes staged for a new workflow", repo)
        }
        RepoOutcome::Reconciled(result) => format!("[ok] {}: {}", repo, result),
        RepoOutcome::CloneFailed(_) => format!("[failed] {}: clone failed", repo),
        RepoOutcome::ReconcileFailed(_) => format!("[failed] {}: workflow not deployed", repo),
    }
}

pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("Rollout summary:");
    println!("  Total:     {}", summary.total);
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed:    {}", summary.failed);

    if !summary.failed_repos.is_empty() {
        eprintln!();
        eprintln!("Failed repositories ({}):", summary.failed_repos.len());
        for repo in &summary.failed_repos {
            eprintln!("  - {}", repo);
        }
    }
}
