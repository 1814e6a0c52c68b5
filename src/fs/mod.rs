//! Filesystem utilities for rollout.
//!
//! Atomic file installation for workflow files and tolerant directory removal
//! for working copies and the scratch directory.

pub mod atomic;

pub use atomic::install_file;

use crate::error::{RolloutError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Remove `dir` and everything under it. A missing directory is not an error.
pub fn remove_dir_if_exists<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    match std::fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RolloutError::UserError(format!(
            "failed to remove directory '{}': {}",
            dir.display(),
            e
        ))),
    }
}
