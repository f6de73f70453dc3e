//! Version-control collaborator
//!
//! After a successful publish the copied artifact is committed and
//! pushed from the site repo. The engine treats this as
//! fire-and-forget: whatever happens here, the registry has already
//! recorded the publish, and the caller is told whether the remote
//! sync landed so it can retry that step independently.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of the remote sync step, reported alongside a successful
/// publish. Never turned into a publish failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RemoteSync {
    /// Commit and push landed
    Pushed,
    /// Nothing to commit (identical artifact already committed)
    Skipped,
    /// The sync step failed; registry truth is unaffected
    Failed { detail: String },
}

/// Site repo health, surfaced to the caller before publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoStatus {
    pub ok: bool,
    pub branch: String,
    pub dirty_files: Vec<String>,
    pub has_conflicts: bool,
    pub error: Option<String>,
}

fn git(repo: &Path, args: &[&str]) -> std::io::Result<std::process::Output> {
    Command::new("git").args(args).current_dir(repo).output()
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Inspect the site repo: current branch, dirty files (outside the
/// published-content tree), merge conflicts.
pub fn repo_status(repo: &Path, content_subdir: &str) -> RepoStatus {
    let branch = git(repo, &["branch", "--show-current"])
        .map(|o| stdout_of(&o))
        .unwrap_or_default();

    let dirty_files: Vec<String> = git(repo, &["status", "--porcelain"])
        .map(|o| {
            String::from_utf8_lossy(&o.stdout)
                .lines()
                .filter(|l| !l.contains(content_subdir))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let has_conflicts = git(repo, &["diff", "--name-only", "--diff-filter=U"])
        .map(|o| !stdout_of(&o).is_empty())
        .unwrap_or(false);

    let error = if has_conflicts {
        Some("merge conflicts - resolve before publishing".to_string())
    } else if branch.is_empty() {
        Some("detached HEAD - checkout a branch".to_string())
    } else {
        None
    };

    RepoStatus {
        ok: error.is_none(),
        branch,
        dirty_files,
        has_conflicts,
        error,
    }
}

/// Commit the published artifact and push. All failures are folded
/// into [`RemoteSync::Failed`]; this function never errors.
pub fn sync(repo: &Path, artifact: &Path, slug: &str) -> RemoteSync {
    let artifact_str = artifact.to_string_lossy();

    match git(repo, &["add", &artifact_str]) {
        Ok(output) if output.status.success() => {
            debug!(slug, "staged published artifact");
        }
        Ok(output) => {
            return failed("git add", &String::from_utf8_lossy(&output.stderr));
        }
        Err(e) => return failed("git add", &e.to_string()),
    }

    let message = format!("Publish: {}", slug);
    match git(repo, &["commit", "-m", &message]) {
        Ok(output) if output.status.success() => {}
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Republishing identical content legitimately has nothing
            // to commit
            if stdout.contains("nothing to commit") || stderr.contains("nothing to commit") {
                return RemoteSync::Skipped;
            }
            return failed("git commit", &stderr);
        }
        Err(e) => return failed("git commit", &e.to_string()),
    }

    match git(repo, &["push"]) {
        Ok(output) if output.status.success() => RemoteSync::Pushed,
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Everything up-to-date") || stderr.contains("up to date") {
                RemoteSync::Pushed
            } else {
                failed("git push", &stderr)
            }
        }
        Err(e) => failed("git push", &e.to_string()),
    }
}

fn failed(step: &str, detail: &str) -> RemoteSync {
    let detail = format!("{} failed: {}", step, detail.trim());
    warn!(%detail, "remote sync failed");
    RemoteSync::Failed { detail }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sync_outside_a_repo_reports_failed() {
        let dir = TempDir::new().unwrap();
        let artifact = dir.path().join("post.md");
        std::fs::write(&artifact, "# Post").unwrap();

        match sync(dir.path(), &artifact, "post") {
            RemoteSync::Failed { detail } => assert!(detail.contains("git")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_repo_status_outside_a_repo_is_not_ok() {
        let dir = TempDir::new().unwrap();
        let status = repo_status(dir.path(), "content/blog");
        assert!(!status.ok);
        assert!(status.branch.is_empty());
    }
}
