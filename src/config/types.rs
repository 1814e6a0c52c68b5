//! Configuration types and defaults for rollout.

use serde::Deserialize;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rollout.yaml";

/// Identity used for rollout commits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

pub(crate) fn default_host() -> String {
    "github.com".to_string()
}
pub(crate) fn default_repos_file() -> String {
    "repos.json".to_string()
}
pub(crate) fn default_workflow_source() -> String {
    "templates/ci.yml".to_string()
}
pub(crate) fn default_workflow_name() -> String {
    "ci".to_string()
}
pub(crate) fn default_branch() -> String {
    "main".to_string()
}
pub(crate) fn default_remote() -> String {
    "origin".to_string()
}
pub(crate) fn default_scratch_dir() -> String {
    ".rollout-scratch".to_string()
}
pub(crate) fn default_hosting_cli() -> Option<String> {
    Some("gh".to_string())
}
pub(crate) fn default_required_tools() -> Vec<String> {
    vec!["git".to_string(), "jq".to_string()]
}
pub(crate) fn default_history_file() -> Option<String> {
    Some("rollout-history.ndjson".to_string())
}
