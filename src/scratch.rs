//! Scratch directory lifecycle.
//!
//! All working copies of a batch live under one scratch directory. It is
//! removed on every way out of a run:
//!
//! - normal completion and early error returns, via `ScratchDir`'s `Drop`
//! - SIGINT/SIGTERM, via the watcher thread from `install_interrupt_cleanup`,
//!   which removes the directory and exits with status 130

use crate::error::{Result, RolloutError};
use crate::exit_codes;
use crate::fs::remove_dir_if_exists;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File marking a directory as created by rollout. `#` is not allowed in a
/// repository name, so the marker never collides with a working copy.
pub const OWNER_MARKER: &str = "#rollout-owned";

/// Owns the scratch directory for the duration of a run.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create the directory (and parents) and mark it as ours.
    ///
    /// An existing directory is reused only when it carries the owner marker,
    /// i.e. it was left behind by an earlier run. Any other existing path is
    /// refused, since the directory is removed recursively on drop.
    pub fn create<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let marker = path.join(OWNER_MARKER);

        if path.exists() && !marker.is_file() {
            return Err(RolloutError::UserError(format!(
                "scratch directory '{}' already exists and was not created by rollout.\n\n\
                 Point `scratch_dir` in rollout.yaml at a path that does not exist yet,\n\
                 or remove the directory yourself.",
                path.display()
            )));
        }

        std::fs::create_dir_all(&path)
            .and_then(|()| std::fs::write(&marker, b""))
            .map_err(|e| {
                RolloutError::UserError(format!(
                    "failed to create scratch directory '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        debug!(path = %path.display(), "created scratch directory");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        match remove_dir_if_exists(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed scratch directory"),
            Err(e) => warn!("{}", e),
        }
    }
}

/// Remove `path` and exit with `INTERRUPTED` when SIGINT or SIGTERM arrives.
///
/// Signal handlers are registered before this returns; the wait happens on a
/// detached thread running a current-thread tokio runtime.
pub fn install_interrupt_cleanup(path: PathBuf) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            RolloutError::UserError(format!("failed to start interrupt watcher: {}", e))
        })?;

    let signals = runtime.block_on(async { Signals::register() }).map_err(|e| {
        RolloutError::UserError(format!("failed to register signal handlers: {}", e))
    })?;

    std::thread::Builder::new()
        .name("interrupt-cleanup".to_string())
        .spawn(move || {
            runtime.block_on(signals.wait());
            eprintln!("Interrupted; removing {}", path.display());
            if let Err(e) = remove_dir_if_exists(&path) {
                eprintln!("Warning: {}", e);
            }
            std::process::exit(exit_codes::INTERRUPTED);
        })
        .map_err(|e| {
            RolloutError::UserError(format!("failed to start interrupt watcher: {}", e))
        })?;

    Ok(())
}

#[cfg(unix)]
struct Signals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn register() -> std::io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn wait(mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {}
            _ = self.terminate.recv() => {}
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    fn register() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn wait(self) {
        let _ = tokio::signal::ctrl_c().await;
    }
}
