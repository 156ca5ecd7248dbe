//! Git operations: commit log parsing and repository access.

pub mod commits;
pub mod source;

pub use commits::{Commit, parse_commit, parse_commits};
pub use source::{LocalRepository, RevisionSource};
