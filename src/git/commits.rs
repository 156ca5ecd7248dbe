//! Commit records and `git log` output parsing.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GitError;

/// Marks the start of each commit record in the log output.
pub const LOG_SEPARATOR: &str = "__GIT_LOG_SEPARATOR__";

/// Separates the fields of a single commit record.
pub const LOG_DELIMITER: &str = "__GIT_LOG_DELIMITER__";

/// Number of fields in each record produced by [`LOG_FORMAT`].
pub const LOG_FIELD_COUNT: usize = 8;

/// `--pretty=format:` string for `git log`.
///
/// Fields: author name, committer name, author timestamp, hash,
/// abbreviated hash, parent hashes, subject, body.
pub const LOG_FORMAT: &str = concat!(
    "__GIT_LOG_SEPARATOR__",
    "%an",
    "__GIT_LOG_DELIMITER__",
    "%cn",
    "__GIT_LOG_DELIMITER__",
    "%at",
    "__GIT_LOG_DELIMITER__",
    "%H",
    "__GIT_LOG_DELIMITER__",
    "%h",
    "__GIT_LOG_DELIMITER__",
    "%P",
    "__GIT_LOG_DELIMITER__",
    "%s",
    "__GIT_LOG_DELIMITER__",
    "%b",
);

/// A single commit as reported by `git log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub author: String,
    pub committer: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    pub hash: String,
    pub abbreviated_hash: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parent_hashes: Vec<String>,
    pub subject: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl Commit {
    /// A commit with two or more parents.
    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() >= 2
    }
}

/// Parse the full output of `git log --pretty=format:LOG_FORMAT`.
///
/// Anything before the first separator is ignored, so empty output yields
/// an empty list.
pub fn parse_commits(log: &str) -> Result<Vec<Commit>, GitError> {
    log.split(LOG_SEPARATOR).skip(1).map(parse_commit).collect()
}

/// Parse one delimited commit record.
pub fn parse_commit(record: &str) -> Result<Commit, GitError> {
    let fields: Vec<&str> = record.split(LOG_DELIMITER).collect();
    if fields.len() != LOG_FIELD_COUNT {
        return Err(GitError::InvalidLogRecord {
            expected: LOG_FIELD_COUNT,
            actual: fields.len(),
        });
    }

    let raw_timestamp = fields[2].trim();
    let seconds: i64 = raw_timestamp
        .parse()
        .map_err(|source| GitError::InvalidTimestamp {
            value: raw_timestamp.to_string(),
            source,
        })?;
    let hash = fields[3].to_string();
    let created_at = Utc
        .timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| GitError::TimestampOutOfRange {
            hash: hash.clone(),
            seconds,
        })?;

    Ok(Commit {
        author: fields[0].to_string(),
        committer: fields[1].to_string(),
        created_at,
        hash,
        abbreviated_hash: fields[4].to_string(),
        parent_hashes: fields[5].split_whitespace().map(String::from).collect(),
        subject: fields[6].to_string(),
        body: fields[7].trim().to_string(),
    })
}
