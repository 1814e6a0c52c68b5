//! Exit code constants for the rollout CLI.
//!
//! - 0: Success (full run with no failures, dry run, help/version)
//! - 1: Failure (any repository failed, bad args, config or prerequisites)
//! - 130: Interrupted by SIGINT/SIGTERM

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// A repository failed, or the run could not start.
pub const FAILURE: i32 = 1;

/// The run was interrupted by a signal (128 + SIGINT).
pub const INTERRUPTED: i32 = 130;
