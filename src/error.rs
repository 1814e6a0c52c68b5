//! Error types for the rollout CLI.
//!
//! Uses thiserror for derive macros and provides operator-actionable messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for rollout operations.
///
/// Startup errors (`UserError`, `PrerequisiteError`) abort the run before any
/// repository is touched. `GitError` and `WorkflowError` are raised while
/// processing a single repository and are counted against that repository only.
#[derive(Error, Debug)]
pub enum RolloutError {
    /// Invalid arguments, configuration, or repository list.
    #[error("{0}")]
    UserError(String),

    /// A mandatory external tool is missing.
    #[error("missing prerequisite: {0}")]
    PrerequisiteError(String),

    /// A git (or hosting CLI) invocation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// The workflow file could not be installed into a working copy.
    #[error("Workflow install failed: {0}")]
    WorkflowError(String),
}

impl RolloutError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RolloutError::UserError(_)
            | RolloutError::PrerequisiteError(_)
            | RolloutError::GitError(_)
            | RolloutError::WorkflowError(_) => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for rollout operations.
pub type Result<T> = std::result::Result<T, RolloutError>;
