//! Run history log.
//!
//! Each full run appends to an NDJSON file (one JSON object per line): one
//! record per repository followed by one summary record.
//!
//! # Record Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `repository` or `summary`
//! - `actor`: the operator (`user@HOST`)
//! - `repo`: repository name, for `repository` records
//! - `details`: outcome-specific fields
//!
//! History is best-effort: callers log a warning when appending fails and
//! never count it against a repository.

use crate::error::{Result, RolloutError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Kinds of history records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// Outcome of one repository.
    Repository,
    /// Counters for the whole batch.
    Summary,
}

/// A single line of the history file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub ts: DateTime<Utc>,
    pub action: HistoryAction,
    pub actor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    pub details: Value,
}

impl HistoryRecord {
    /// Create a record stamped with the current time and operator.
    pub fn new(action: HistoryAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            repo: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            RolloutError::UserError(format!("failed to serialize history record: {}", e))
        })
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append `records` to the history file at `path`, creating it if needed.
pub fn append_records(path: &Path, records: &[HistoryRecord]) -> Result<()> {
    let mut lines = String::new();
    for record in records {
        lines.push_str(&record.to_ndjson_line()?);
        lines.push('\n');
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            RolloutError::UserError(format!(
                "failed to create history directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            RolloutError::UserError(format!(
                "failed to open history file '{}': {}",
                path.display(),
                e
            ))
        })?;

    file.write_all(lines.as_bytes()).map_err(|e| {
        RolloutError::UserError(format!(
            "failed to write history file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}
