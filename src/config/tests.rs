//! Tests for config functionality.

use crate::config::{CommitAuthor, Config};
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.organization.is_empty());
    assert_eq!(config.host, "github.com");
    assert_eq!(config.hosting_cli.as_deref(), Some("gh"));
    assert_eq!(config.repos_file, "repos.json");
    assert_eq!(config.workflow_source, "templates/ci.yml");
    assert_eq!(config.workflow_name, "ci");
    assert_eq!(config.branch, "main");
    assert_eq!(config.remote, "origin");
    assert_eq!(config.required_tools, vec!["git", "jq"]);
    assert_eq!(config.history_file.as_deref(), Some("rollout-history.ndjson"));
    assert!(config.commit_author.is_none());
}

#[test]
fn test_parse_empty_yaml_uses_defaults() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.branch, "main");
    assert_eq!(config.scratch_dir, ".rollout-scratch");
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
organization: acme
workflow_name: review
hosting_cli: null
commit_author:
  name: Rollout Bot
  email: bot@acme.test
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.organization, "acme");
    assert_eq!(config.workflow_name, "review");
    assert!(config.hosting_cli.is_none());
    assert_eq!(
        config.commit_author,
        Some(CommitAuthor {
            name: "Rollout Bot".to_string(),
            email: "bot@acme.test".to_string(),
        })
    );
    // Unspecified values keep their defaults
    assert_eq!(config.branch, "main");
    assert_eq!(config.required_tools, vec!["git", "jq"]);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let config = Config::from_yaml("organization: acme\nfuture_knob: 3\n").unwrap();
    assert_eq!(config.organization, "acme");
}

#[test]
fn test_malformed_yaml_is_user_error() {
    let err = Config::from_yaml("organization: [unclosed").unwrap_err();
    assert!(err.to_string().contains("failed to parse config YAML"));
}

#[test]
fn test_validate_rejects_workflow_name_with_separator() {
    let err = Config::from_yaml("workflow_name: ../evil\n").unwrap_err();
    assert!(err.to_string().contains("workflow_name"));
}

#[test]
fn test_validate_rejects_dangerous_scratch_dir() {
    for bad in ["", ".", "..", "/", "../elsewhere", "work/../.."] {
        let yaml = format!("scratch_dir: '{}'\n", bad);
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(err.to_string().contains("scratch_dir"), "accepted {:?}", bad);
    }
    assert!(Config::from_yaml("scratch_dir: /tmp/rollout-work\n").is_ok());
}

#[test]
fn test_validate_rejects_blank_required_tool() {
    let err = Config::from_yaml("required_tools: [git, '']\n").unwrap_err();
    assert!(err.to_string().contains("required_tools"));
}

#[test]
fn test_validate_rejects_partial_author() {
    let yaml = "commit_author:\n  name: Bot\n  email: ''\n";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("commit_author"));
}

#[test]
fn test_validate_for_run_requires_organization() {
    let config = Config::default();
    let err = config.validate_for_run().unwrap_err();
    assert!(err.to_string().contains("organization is not set"));

    let config = Config {
        organization: "acme".to_string(),
        ..Config::default()
    };
    assert!(config.validate_for_run().is_ok());
}

#[test]
fn test_clone_base() {
    let config = Config::default();
    assert_eq!(config.clone_base(), "https://github.com");

    let config = Config {
        clone_base_url: Some("https://git.internal/".to_string()),
        ..Config::default()
    };
    assert_eq!(config.clone_base(), "https://git.internal");
}

#[test]
fn test_workflow_target() {
    let config = Config::default();
    assert_eq!(config.workflow_target(), Path::new(".github/workflows/ci.yml"));
}

#[test]
fn test_discover_without_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let (config, base) = Config::discover(temp_dir.path(), None).unwrap();
    assert_eq!(config.repos_file, "repos.json");
    assert_eq!(base, temp_dir.path());
}

#[test]
fn test_discover_reads_default_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("rollout.yaml"), "organization: acme\n").unwrap();

    let (config, base) = Config::discover(temp_dir.path(), None).unwrap();
    assert_eq!(config.organization, "acme");
    assert_eq!(base, temp_dir.path());
}

#[test]
fn test_discover_explicit_file_sets_base_dir() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("deploy");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(nested.join("custom.yaml"), "organization: acme\n").unwrap();

    let (config, base) =
        Config::discover(temp_dir.path(), Some(Path::new("deploy/custom.yaml"))).unwrap();
    assert_eq!(config.organization, "acme");
    assert_eq!(base, nested);
}

#[test]
fn test_discover_missing_explicit_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::discover(temp_dir.path(), Some(Path::new("nope.yaml"))).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_null_disables_history_and_hosting_cli() {
    let yaml = "organization: acme\nhistory_file: null\nhosting_cli: null\n";
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.organization, "acme");
    assert!(config.history_file.is_none());
    assert!(config.hosting_cli.is_none());
}
