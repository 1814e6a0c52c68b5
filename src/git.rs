//! Git command runner for rollout.
//!
//! Provides a wrapper around external commands with captured stdout/stderr
//! and structured error handling. Every invocation names its working
//! directory explicitly; the process working directory is never changed.

use crate::config::CommitAuthor;
use crate::error::{RolloutError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Result of a successful command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// Run `program` with `args` inside `cwd`.
///
/// A spawn failure or non-zero exit becomes `RolloutError::GitError` carrying
/// the program's stderr (or stdout when stderr is empty).
pub fn run_command<S: AsRef<OsStr>>(program: S, cwd: &Path, args: &[&str]) -> Result<GitOutput> {
    let (label, output) = spawn(program.as_ref(), cwd, args)?;
    let captured = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(captured)
    } else {
        Err(failure(&label, args, &output, &captured))
    }
}

fn spawn(program: &OsStr, cwd: &Path, args: &[&str]) -> Result<(String, Output)> {
    let label = Path::new(program)
        .file_name()
        .unwrap_or(program)
        .to_string_lossy()
        .to_string();

    debug!(
        cwd = %cwd.display(),
        "running {} {}",
        label,
        shell_words::join(args)
    );

    let output = Command::new(program)
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            RolloutError::GitError(format!(
                "failed to execute {} {}: {}",
                label,
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    Ok((label, output))
}

fn failure(label: &str, args: &[&str], output: &Output, captured: &GitOutput) -> RolloutError {
    let exit_code = output.status.code().unwrap_or(-1);
    let error_msg = if captured.stderr.is_empty() {
        &captured.stdout
    } else {
        &captured.stderr
    };

    RolloutError::GitError(format!(
        "{} {} failed (exit code {}): {}",
        label,
        args.first().unwrap_or(&""),
        exit_code,
        error_msg
    ))
}

/// Run a git command with the specified working directory.
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    run_command("git", cwd.as_ref(), args)
}

/// Clone `url` into `dest`, running git from `parent`.
pub fn clone(parent: &Path, url: &str, dest: &Path) -> Result<()> {
    let dest = dest.to_string_lossy();
    run_git(parent, &["clone", "--quiet", url, &dest])?;
    Ok(())
}

/// Whether `path` (relative to `repo`) is excluded by ignore rules.
///
/// `git check-ignore` exits 0 for ignored paths and 1 for paths that are not.
pub fn is_ignored<P: AsRef<Path>>(repo: P, path: &str) -> Result<bool> {
    let args = ["check-ignore", "--quiet", "--", path];
    let (label, output) = spawn(OsStr::new("git"), repo.as_ref(), &args)?;

    match output.status.code() {
        Some(0) => Ok(true),
        Some(1) => Ok(false),
        _ => Err(failure(&label, &args, &output, &GitOutput::from_output(&output))),
    }
}

/// Stage everything under `pathspec`.
pub fn stage<P: AsRef<Path>>(repo: P, pathspec: &str) -> Result<()> {
    run_git(repo, &["add", "--", pathspec])?;
    Ok(())
}

/// List staged paths under `pathspec` that differ from `HEAD`.
pub fn staged_paths<P: AsRef<Path>>(repo: P, pathspec: &str) -> Result<Vec<String>> {
    let output = run_git(repo, &["diff", "--cached", "--name-only", "--", pathspec])?;
    Ok(output.lines().into_iter().map(str::to_string).collect())
}

/// Create a commit from the index.
///
/// When `author` is set it is passed as `-c user.name=… -c user.email=…`
/// so the working copy's own configuration is left untouched.
pub fn commit<P: AsRef<Path>>(
    repo: P,
    message: &str,
    allow_empty: bool,
    author: Option<&CommitAuthor>,
) -> Result<()> {
    let identity = author.map(|a| {
        (
            format!("user.name={}", a.name),
            format!("user.email={}", a.email),
        )
    });

    let mut args: Vec<&str> = Vec::new();
    if let Some((name, email)) = &identity {
        args.extend(["-c", name.as_str(), "-c", email.as_str()]);
    }
    args.extend(["commit", "--quiet", "-m", message]);
    if allow_empty {
        args.push("--allow-empty");
    }

    run_git(repo, &args).map_err(|e| {
        RolloutError::GitError(format!(
            "failed to commit: {}\n\n\
             If git reports a missing identity, set `commit_author` in rollout.yaml\n\
             or configure git user.name and user.email globally.",
            e
        ))
    })?;
    Ok(())
}

/// Push `HEAD` to `branch` on `remote`.
pub fn push<P: AsRef<Path>>(repo: P, remote: &str, branch: &str) -> Result<()> {
    let refspec = format!("HEAD:refs/heads/{}", branch);
    run_git(repo, &["push", "--quiet", remote, &refspec])?;
    Ok(())
}

/// Abbreviated SHA of `HEAD`.
pub fn head_short_sha<P: AsRef<Path>>(repo: P) -> Result<String> {
    Ok(run_git(repo, &["rev-parse", "--short", "HEAD"])?.stdout)
}
