//! Repository list loading.
//!
//! The repository list is a JSON array of repository name strings, e.g.
//! `["api", "web", "worker"]`. Names double as `org/name` path segments on
//! the hosting service and as directory names under the scratch directory,
//! so they are checked here before anything is cloned.

use crate::error::{RolloutError, Result};
use regex::Regex;
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

static REPO_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("Invalid repo name regex"));

/// Ordered list of repository names for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoList {
    names: Vec<String>,
}

impl RepoList {
    /// Read and validate the repository list file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RolloutError::UserError(format!(
                "failed to read repository list '{}': {}\n\n\
                 Create it with a JSON array of repository names, e.g. [\"api\", \"web\"]",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content)
            .map_err(|e| RolloutError::UserError(format!("{}: {}", path.display(), e)))
    }

    /// Parse a JSON array of strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let names: Vec<String> = serde_json::from_str(json).map_err(|e| {
            RolloutError::UserError(format!("expected a JSON array of repository names: {}", e))
        })?;
        Self::from_names(names)
    }

    /// Build a list from names, rejecting invalid and duplicate entries.
    pub fn from_names(names: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in &names {
            validate_repo_name(name)?;
            if !seen.insert(name.as_str()) {
                return Err(RolloutError::UserError(format!(
                    "repository '{}' is listed more than once",
                    name
                )));
            }
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Write the names to `out`, one per line.
    pub fn write_lines<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for name in &self.names {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }
}

/// A name must be usable as a single path segment both locally and remotely.
pub fn validate_repo_name(name: &str) -> Result<()> {
    if name == "." || name == ".." || !REPO_NAME_REGEX.is_match(name) {
        return Err(RolloutError::UserError(format!(
            "invalid repository name '{}': only letters, digits, '.', '_' and '-' are allowed",
            name.escape_debug()
        )));
    }
    Ok(())
}
