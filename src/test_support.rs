use crate::config::CommitAuthor;
use crate::context::RunContext;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub(crate) const TEST_ORG: &str = "acme";
pub(crate) const CANONICAL_WORKFLOW: &str = "name: CI\non: [push, pull_request]\njobs: {}\n";

pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    init_repo(path);
    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);

    temp_dir
}

/// Create a bare repository at `{root}/{org}/{name}.git` whose `main` holds a
/// README plus `files`. Mirrors the hosting layout the cloner expects.
pub(crate) fn create_remote(root: &Path, org: &str, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let bare = root.join(org).join(format!("{}.git", name));
    std::fs::create_dir_all(&bare).unwrap();
    git(&bare, &["init", "--bare", "--quiet"]);
    git(&bare, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    let seed = TempDir::new().unwrap();
    let seed_path = seed.path();
    init_repo(seed_path);
    std::fs::write(seed_path.join("README.md"), format!("# {}\n", name)).unwrap();
    for (rel, content) in files {
        let file = seed_path.join(rel);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, content).unwrap();
    }
    git(seed_path, &["add", "."]);
    git(seed_path, &["commit", "-m", "Initial commit"]);
    git(seed_path, &["push", "--quiet", &bare.to_string_lossy(), "main"]);

    bare
}

/// Clone `remote` into `dest` with a local identity configured.
pub(crate) fn clone_working_copy(remote: &Path, dest: &Path) {
    let parent = dest.parent().unwrap();
    std::fs::create_dir_all(parent).unwrap();
    git(
        parent,
        &["clone", "--quiet", &remote.to_string_lossy(), &dest.to_string_lossy()],
    );
    configure_identity(dest);
}

/// Commit subjects on `HEAD` of `repo`, newest first.
pub(crate) fn git_log_subjects(repo: &Path) -> Vec<String> {
    let output = git_output(repo, &["log", "--format=%s"]);
    output.lines().map(str::to_string).collect()
}

/// Number of commits reachable from `main` in `repo` (bare or not).
pub(crate) fn commit_count(repo: &Path) -> usize {
    git_output(repo, &["rev-list", "--count", "main"]).trim().parse().unwrap()
}

/// A run context whose remotes live under `root` and whose scratch directory
/// is `{root}/scratch`. The canonical workflow is written to
/// `{root}/templates/ci.yml`.
pub(crate) fn test_context(root: &Path) -> RunContext {
    let source = root.join("templates/ci.yml");
    std::fs::create_dir_all(source.parent().unwrap()).unwrap();
    std::fs::write(&source, CANONICAL_WORKFLOW).unwrap();

    RunContext {
        organization: TEST_ORG.to_string(),
        clone_base: root.to_string_lossy().to_string(),
        hosting_cli: None,
        workflow_source: source,
        workflow_target: PathBuf::from(".github/workflows/ci.yml"),
        branch: "main".to_string(),
        remote: "origin".to_string(),
        commit_author: Some(CommitAuthor {
            name: "Rollout Test".to_string(),
            email: "rollout@example.com".to_string(),
        }),
        scratch_dir: root.join("scratch"),
        history_file: None,
        force: false,
    }
}

fn init_repo(path: &Path) {
    git(path, &["init", "--quiet"]);
    // Deterministic default branch name across environments.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    configure_identity(path);
}

fn configure_identity(path: &Path) {
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
}

fn git_output(repo_dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));
    assert_success(args, &output);
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    git_output(repo_dir, args);
}

fn assert_success(args: &[&str], output: &std::process::Output) {
    if !output.status.success() {
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
