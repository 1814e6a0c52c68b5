//! Config struct definition and default implementation.

use super::types::*;
use serde::Deserialize;

/// Configuration for a rollout.
///
/// This struct represents the contents of `rollout.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Hosting settings
    // =========================================================================
    /// Organization that owns every listed repository. Required for a full run.
    pub organization: String,

    /// Hosting-service host used to build clone URLs (default: "github.com").
    #[serde(default = "default_host")]
    pub host: String,

    /// Base URL for plain clones; overrides `https://{host}` when set.
    pub clone_base_url: Option<String>,

    /// Hosting-service CLI used for the first clone attempt. `null` disables it.
    #[serde(default = "default_hosting_cli")]
    pub hosting_cli: Option<String>,

    // =========================================================================
    // Inputs
    // =========================================================================
    /// JSON file holding the array of repository names.
    #[serde(default = "default_repos_file")]
    pub repos_file: String,

    /// Canonical workflow file copied into every repository.
    #[serde(default = "default_workflow_source")]
    pub workflow_source: String,

    /// Installed as `.github/workflows/{workflow_name}.yml`.
    #[serde(default = "default_workflow_name")]
    pub workflow_name: String,

    // =========================================================================
    // Git settings
    // =========================================================================
    /// Remote default branch that receives the commit.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Name of the remote to push to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Identity for rollout commits; falls back to git's own configuration.
    pub commit_author: Option<CommitAuthor>,

    // =========================================================================
    // Local state
    // =========================================================================
    /// Directory holding working copies; removed when the run ends.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: String,

    /// Programs that must be on PATH before a full run starts.
    #[serde(default = "default_required_tools")]
    pub required_tools: Vec<String>,

    /// NDJSON run history. `null` disables it.
    #[serde(default = "default_history_file")]
    pub history_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            organization: String::new(),
            host: default_host(),
            clone_base_url: None,
            hosting_cli: default_hosting_cli(),
            repos_file: default_repos_file(),
            workflow_source: default_workflow_source(),
            workflow_name: default_workflow_name(),
            branch: default_branch(),
            remote: default_remote(),
            commit_author: None,
            scratch_dir: default_scratch_dir(),
            required_tools: default_required_tools(),
            history_file: default_history_file(),
        }
    }
}
