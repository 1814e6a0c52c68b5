//! External tool discovery.
//!
//! Mandatory tools (by default `git` and `jq`) must resolve on `PATH` before
//! a full run starts. The hosting-service CLI is optional: when it cannot be
//! resolved the cloner goes straight to a plain `git clone`.

use crate::config::Config;
use crate::error::{RolloutError, Result};
use std::path::PathBuf;
use tracing::debug;

/// External programs resolved for a run.
#[derive(Debug, Clone, Default)]
pub struct ToolSet {
    /// Mandatory tools with their resolved paths.
    pub required: Vec<(String, PathBuf)>,
    /// Resolved hosting-service CLI, if configured and present.
    pub hosting_cli: Option<PathBuf>,
}

impl ToolSet {
    /// Resolve every configured tool, failing on the first missing mandatory one.
    pub fn detect(config: &Config) -> Result<Self> {
        let mut required = Vec::with_capacity(config.required_tools.len());
        for tool in &config.required_tools {
            let path = which::which(tool).map_err(|e| {
                RolloutError::PrerequisiteError(format!(
                    "`{}` was not found on PATH ({}).\n\n\
                     Install it, or remove it from `required_tools` in rollout.yaml.",
                    tool, e
                ))
            })?;
            required.push((tool.clone(), path));
        }

        let hosting_cli = config.hosting_cli.as_deref().and_then(resolve_optional);

        Ok(Self {
            required,
            hosting_cli,
        })
    }
}

/// Resolve an optional program, treating any lookup failure as absence.
pub fn resolve_optional(program: &str) -> Option<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            debug!(program, path = %path.display(), "found optional tool");
            Some(path)
        }
        Err(e) => {
            debug!(program, error = %e, "optional tool not available");
            None
        }
    }
}
