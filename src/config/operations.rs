//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::DEFAULT_CONFIG_FILE;
use crate::error::{RolloutError, Result};
use std::path::{Component, Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ROLLOUT_CONFIG";

/// Directory where workflow files live inside a target repository.
pub const WORKFLOWS_DIR: &str = ".github/workflows";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RolloutError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map of defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| RolloutError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Find and load the config for a run started in `cwd`.
    ///
    /// An `explicit` path must exist. Without one, `rollout.yaml` in `cwd` is
    /// used when present, otherwise defaults apply. Returns the config and the
    /// directory its relative paths resolve against.
    pub fn discover(cwd: &Path, explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let (path, required) = match explicit {
            Some(path) => (cwd.join(path), true),
            None => (cwd.join(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(RolloutError::UserError(format!(
                    "config file '{}' does not exist (set via {})",
                    path.display(),
                    CONFIG_ENV_VAR
                )));
            }
            return Ok((Self::default(), cwd.to_path_buf()));
        }

        let config = Self::load(&path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        Ok((config, base_dir))
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `workflow_name` and `branch` are non-empty and contain no path separators
    /// - `scratch_dir` is not a filesystem root and has no `.`/`..` components,
    ///   since it is deleted recursively when the run ends
    /// - `required_tools` entries are non-empty
    /// - `commit_author` name and email are non-empty when set
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("workflow_name", &self.workflow_name),
            ("branch", &self.branch),
        ] {
            if value.is_empty() || value.contains(['/', '\\']) {
                return Err(RolloutError::UserError(format!(
                    "config validation failed: {} must be a non-empty name without path separators (found '{}')",
                    field, value
                )));
            }
        }

        let scratch = Path::new(&self.scratch_dir);
        if self.scratch_dir.trim().is_empty()
            || scratch.parent().is_none()
            || scratch
                .components()
                .any(|c| matches!(c, Component::CurDir | Component::ParentDir))
        {
            return Err(RolloutError::UserError(format!(
                "config validation failed: scratch_dir must name a dedicated directory (found '{}')",
                self.scratch_dir
            )));
        }

        if self.remote.is_empty() {
            return Err(RolloutError::UserError(
                "config validation failed: remote must be non-empty".to_string(),
            ));
        }

        if self.required_tools.iter().any(|t| t.trim().is_empty()) {
            return Err(RolloutError::UserError(
                "config validation failed: required_tools entries must be non-empty".to_string(),
            ));
        }

        if let Some(author) = &self.commit_author
            && (author.name.trim().is_empty() || author.email.trim().is_empty())
        {
            return Err(RolloutError::UserError(
                "config validation failed: commit_author needs both name and email".to_string(),
            ));
        }

        Ok(())
    }

    /// Checks that only matter once repositories are about to be touched.
    pub fn validate_for_run(&self) -> Result<()> {
        if self.organization.trim().is_empty() {
            return Err(RolloutError::UserError(
                "config validation failed: organization is not set.\n\n\
                 Add it to rollout.yaml:\n  organization: <your-org>"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Base URL for plain clones, without a trailing slash.
    pub fn clone_base(&self) -> String {
        match &self.clone_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.host),
        }
    }

    /// Path of the installed workflow, relative to a working copy root.
    pub fn workflow_target(&self) -> PathBuf {
        Path::new(WORKFLOWS_DIR).join(format!("{}.yml", self.workflow_name))
    }
}

/// Load the config named by `ROLLOUT_CONFIG`, or the default file in `cwd`.
pub fn locate_config(cwd: &Path) -> Result<(Config, PathBuf)> {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    Config::discover(cwd, explicit.as_deref())
}
