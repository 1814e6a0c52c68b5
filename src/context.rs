//! Run context resolution for rollout.
//!
//! A `RunContext` carries everything a single batch needs: resolved absolute
//! paths, hosting coordinates, git settings, and the force flag. It is built
//! once at startup and passed by reference to the cloner and the reconciler,
//! so neither depends on globals or on the process working directory.

use crate::config::{CommitAuthor, Config};
use crate::tools::ToolSet;
use std::path::{Path, PathBuf};

/// Resolved settings for one batch.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Organization owning every repository.
    pub organization: String,

    /// Base URL for plain clones (no trailing slash).
    pub clone_base: String,

    /// Resolved hosting-service CLI; `None` means plain clones only.
    pub hosting_cli: Option<PathBuf>,

    /// Absolute path to the canonical workflow file.
    pub workflow_source: PathBuf,

    /// Workflow path relative to a working copy root.
    pub workflow_target: PathBuf,

    /// Branch the commit is pushed to.
    pub branch: String,

    /// Remote the commit is pushed to.
    pub remote: String,

    /// Identity for rollout commits.
    pub commit_author: Option<CommitAuthor>,

    /// Absolute path to the scratch directory holding working copies.
    pub scratch_dir: PathBuf,

    /// Absolute path to the run history file, if enabled.
    pub history_file: Option<PathBuf>,

    /// Commit even when the workflow already matches.
    pub force: bool,
}

impl RunContext {
    /// Build the context from config, resolving relative paths against `base_dir`.
    pub fn new(config: &Config, base_dir: &Path, tools: &ToolSet, force: bool) -> Self {
        Self {
            organization: config.organization.clone(),
            clone_base: config.clone_base(),
            hosting_cli: tools.hosting_cli.clone(),
            workflow_source: base_dir.join(&config.workflow_source),
            workflow_target: config.workflow_target(),
            branch: config.branch.clone(),
            remote: config.remote.clone(),
            commit_author: config.commit_author.clone(),
            scratch_dir: base_dir.join(&config.scratch_dir),
            history_file: config.history_file.as_ref().map(|f| base_dir.join(f)),
            force,
        }
    }

    /// Local working copy location for `repo`.
    pub fn working_copy(&self, repo: &str) -> PathBuf {
        self.scratch_dir.join(repo)
    }

    /// `org/name` identifier used by the hosting CLI.
    pub fn qualified_name(&self, repo: &str) -> String {
        format!("{}/{}", self.organization, repo)
    }

    /// Remote URL used by a plain clone.
    pub fn clone_url(&self, repo: &str) -> String {
        format!("{}/{}/{}.git", self.clone_base, self.organization, repo)
    }

    /// Directory holding the workflow inside a working copy, relative to its root.
    pub fn workflow_dir(&self) -> &Path {
        self.workflow_target.parent().unwrap_or(Path::new("."))
    }
}
