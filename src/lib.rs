//! gh-release - create GitHub releases from changes to a tracked RELEASE file.
//!
//! # Overview
//!
//! When a release file changes between the base and head of a push or pull
//! request, gh-release lists the commits since the previous tag, filters and
//! categorizes them with the rules in the release file, and renders a
//! markdown release note. Pushes create the GitHub release; pull requests get
//! a comment previewing it.

pub mod actions;
pub mod error;
pub mod git;
pub mod github;
pub mod release;

// Re-export commonly used types
pub use error::{ActionError, ConfigError, GitError, GitHubError, ReleaseError};
pub use git::{Commit, LocalRepository, RevisionSource};
pub use github::{EventKind, GitHubEvent};
pub use release::{ReleaseCommit, ReleaseConfig, ReleaseProposal};
