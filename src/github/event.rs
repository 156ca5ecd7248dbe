//! GitHub Actions event parsing.
//!
//! The runner exposes the triggering event through `GITHUB_EVENT_NAME` and a
//! JSON payload file at `GITHUB_EVENT_PATH`. Only the fields needed to
//! locate the revision range are decoded.

use std::env;
use std::path::PathBuf;

use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitHubError;

/// Supported triggering events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Push,
    PullRequest,
    IssueComment,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::PullRequest => "pull_request",
            Self::IssueComment => "issue_comment",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" => Ok(Self::Push),
            "pull_request" => Ok(Self::PullRequest),
            "issue_comment" => Ok(Self::IssueComment),
            _ => Err(GitHubError::UnsupportedEvent(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The triggering event reduced to repository identity and revision range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubEvent {
    pub kind: EventKind,
    pub owner: String,
    pub repo: String,
    pub base_commit: String,
    pub head_commit: String,
    /// Set for pull request and issue comment events.
    pub pr_number: Option<u64>,
    /// Set for issue comment events.
    pub comment_url: Option<String>,
}

#[derive(Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Deserialize)]
struct OwnerPayload {
    login: String,
}

#[derive(Deserialize)]
struct PushPayload {
    before: String,
    after: String,
    repository: RepositoryPayload,
}

#[derive(Deserialize)]
struct PullRequestPayload {
    number: u64,
    pull_request: PullRequestRefs,
    repository: RepositoryPayload,
}

#[derive(Deserialize)]
struct PullRequestRefs {
    head: CommitRef,
    base: CommitRef,
}

#[derive(Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Deserialize)]
struct IssueCommentPayload {
    issue: IssuePayload,
    comment: CommentPayload,
    repository: RepositoryPayload,
}

#[derive(Deserialize)]
struct IssuePayload {
    number: u64,
}

#[derive(Deserialize)]
struct CommentPayload {
    html_url: String,
}

/// Read the event name and payload path set by the Actions runner.
pub fn read_event_env() -> Result<(EventKind, PathBuf), GitHubError> {
    let name = env::var("GITHUB_EVENT_NAME")
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(GitHubError::MissingEnv("GITHUB_EVENT_NAME"))?;
    let kind = name.parse::<EventKind>()?;

    let path = env::var_os("GITHUB_EVENT_PATH")
        .filter(|v| !v.is_empty())
        .ok_or(GitHubError::MissingEnv("GITHUB_EVENT_PATH"))?;

    Ok((kind, PathBuf::from(path)))
}

/// Load the triggering event from the runner environment.
pub async fn load_github_event(client: &Octocrab) -> Result<GitHubEvent, GitHubError> {
    let (kind, path) = read_event_env()?;
    let payload = tokio::fs::read(&path)
        .await
        .map_err(GitHubError::ReadPayload)?;
    parse_github_event(kind, &payload, client).await
}

/// Decode an event payload.
///
/// Issue comment payloads do not carry commit hashes, so the commented
/// pull request is fetched to find its base and head.
pub async fn parse_github_event(
    kind: EventKind,
    payload: &[u8],
    client: &Octocrab,
) -> Result<GitHubEvent, GitHubError> {
    let parse_error = |source| GitHubError::ParsePayload {
        event: kind.to_string(),
        source,
    };

    let event = match kind {
        EventKind::Push => {
            let p: PushPayload = serde_json::from_slice(payload).map_err(parse_error)?;
            GitHubEvent {
                kind,
                owner: p.repository.owner.login,
                repo: p.repository.name,
                base_commit: p.before,
                head_commit: p.after,
                pr_number: None,
                comment_url: None,
            }
        }
        EventKind::PullRequest => {
            let p: PullRequestPayload = serde_json::from_slice(payload).map_err(parse_error)?;
            GitHubEvent {
                kind,
                owner: p.repository.owner.login,
                repo: p.repository.name,
                base_commit: p.pull_request.base.sha,
                head_commit: p.pull_request.head.sha,
                pr_number: Some(p.number),
                comment_url: None,
            }
        }
        EventKind::IssueComment => {
            let p: IssueCommentPayload = serde_json::from_slice(payload).map_err(parse_error)?;
            let owner = p.repository.owner.login;
            let repo = p.repository.name;
            let number = p.issue.number;

            let pr = client.pulls(&owner, &repo).get(number).await?;
            GitHubEvent {
                kind,
                owner,
                repo,
                base_commit: pr.base.sha,
                head_commit: pr.head.sha,
                pr_number: Some(number),
                comment_url: Some(p.comment.html_url),
            }
        }
    };

    debug!(?event, "Parsed GitHub event");
    Ok(event)
}
