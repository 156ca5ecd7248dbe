//! Access to commits and tracked files of the local repository.
//!
//! Commit listing shells out to the system `git` binary so revision ranges
//! (`base...head`) and log ordering behave exactly like `git log`. File reads
//! and diffs go through git2.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Repository, Tree};
use tracing::debug;

use crate::error::GitError;

use super::commits::{Commit, LOG_FORMAT, parse_commits};

/// Read-only view of the repository used to build release proposals.
#[cfg_attr(test, mockall::automock)]
pub trait RevisionSource {
    /// List the commits selected by a revision range, newest first.
    fn list_commits(&self, revision_range: &str) -> Result<Vec<Commit>, GitError>;

    /// Read the content of `path` as of `revision`.
    fn read_file_at(&self, path: &str, revision: &str) -> Result<Vec<u8>, GitError>;

    /// Paths touched between two revisions.
    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>, GitError>;
}

/// A repository checked out on the local filesystem.
pub struct LocalRepository {
    git_path: PathBuf,
    workdir: PathBuf,
    repo: Repository,
}

impl LocalRepository {
    /// Open the repository at `path` using the `git` found in PATH.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let git_path = which::which("git").map_err(|_| GitError::NotInstalled)?;
        Self::open_with_git(path, git_path)
    }

    /// Open the repository at `path` with an explicit git executable.
    pub fn open_with_git(path: impl AsRef<Path>, git_path: PathBuf) -> Result<Self, GitError> {
        let workdir = path.as_ref().to_path_buf();
        let repo = Repository::open(&workdir).map_err(GitError::OpenRepository)?;
        Ok(Self {
            git_path,
            workdir,
            repo,
        })
    }

    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!(?args, "Running git {}", operation);

        let output = Command::new(&self.git_path)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::NonZeroExit {
                operation: operation.to_string(),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn tree_at(&self, revision: &str) -> Result<Tree<'_>, GitError> {
        self.repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_tree())
            .map_err(|e| GitError::RevisionNotFound(revision.to_string(), e))
    }
}

impl RevisionSource for LocalRepository {
    fn list_commits(&self, revision_range: &str) -> Result<Vec<Commit>, GitError> {
        let format = format!("--pretty=format:{}", LOG_FORMAT);
        let mut args = vec!["log", "--no-decorate", format.as_str()];
        if !revision_range.is_empty() {
            args.push(revision_range);
        }

        let log = self.run_git(&args, "log")?;
        parse_commits(&log)
    }

    fn read_file_at(&self, path: &str, revision: &str) -> Result<Vec<u8>, GitError> {
        let spec = format!("{}:{}", revision, path);
        let blob = self
            .repo
            .revparse_single(&spec)
            .and_then(|object| object.peel_to_blob())
            .map_err(|source| GitError::ReadFileFailed {
                path: path.to_string(),
                revision: revision.to_string(),
                source,
            })?;

        Ok(blob.content().to_vec())
    }

    fn changed_files(&self, from: &str, to: &str) -> Result<Vec<String>, GitError> {
        let from_tree = self.tree_at(from)?;
        let to_tree = self.tree_at(to)?;

        let diff = self
            .repo
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)
            .map_err(|source| GitError::DiffFailed {
                from: from.to_string(),
                to: to.to_string(),
                source,
            })?;

        let files = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .map(|p| p.to_string_lossy().into_owned())
            })
            .collect();

        Ok(files)
    }
}
