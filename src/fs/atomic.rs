//! Atomic file installation.
//!
//! The workflow file is written to a temporary sibling (`.{filename}.tmp`),
//! synced, and renamed over the target, so a working copy never holds a
//! half-written workflow. On POSIX the rename replaces an existing target
//! atomically; elsewhere an existing target is removed first.

use crate::error::{RolloutError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Copy `source` over `target` byte for byte, creating parent directories.
pub fn install_file<S: AsRef<Path>, T: AsRef<Path>>(source: S, target: T) -> Result<()> {
    let source = source.as_ref();
    let target = target.as_ref();

    let content = fs::read(source).map_err(|e| {
        RolloutError::WorkflowError(format!(
            "failed to read canonical workflow '{}': {}",
            source.display(),
            e
        ))
    })?;

    if let Some(parent) = target.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            RolloutError::WorkflowError(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(target)?;
    write_and_sync(&temp_path, &content)?;
    replace(&temp_path, target)
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            RolloutError::WorkflowError(format!("invalid target path '{}'", target.display()))
        })?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let result = File::create(path).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });

    result.map_err(|e| {
        let _ = fs::remove_file(path);
        RolloutError::WorkflowError(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        ))
    })
}

fn replace(temp: &Path, target: &Path) -> Result<()> {
    clear_target(target);

    fs::rename(temp, target).map_err(|e| {
        let _ = fs::remove_file(temp);
        RolloutError::WorkflowError(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })
}

// rename() replaces an existing file atomically on POSIX.
#[cfg(unix)]
fn clear_target(_target: &Path) {}

#[cfg(not(unix))]
fn clear_target(target: &Path) {
    let _ = fs::remove_file(target);
}
