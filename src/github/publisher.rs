//! GitHub write operations: release creation and pull request comments.

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::info;

use crate::error::GitHubError;
use crate::release::ReleaseProposal;

use super::retry::retry_with_backoff;

/// A release created on GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRelease {
    pub tag: String,
    pub html_url: String,
}

/// Trait for GitHub write operations.
///
/// This abstraction allows mocking the API in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Create a published release from `proposal`.
    async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        proposal: &ReleaseProposal,
    ) -> Result<PublishedRelease, GitHubError>;

    /// Comment on a pull request and return the comment URL.
    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<String, GitHubError>;
}

/// Publisher backed by the GitHub REST API.
pub struct OctocrabPublisher {
    client: Octocrab,
}

impl OctocrabPublisher {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Publisher for OctocrabPublisher {
    async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        proposal: &ReleaseProposal,
    ) -> Result<PublishedRelease, GitHubError> {
        let repos = self.client.repos(owner, repo);
        let releases = repos.releases();
        let release = releases
            .create(&proposal.tag)
            .target_commitish(&proposal.target_commitish)
            .name(&proposal.title)
            .body(&proposal.release_note)
            .draft(false)
            .prerelease(proposal.prerelease)
            .send()
            .await?;
        Ok(PublishedRelease {
            tag: release.tag_name,
            html_url: release.html_url.to_string(),
        })
    }

    async fn create_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<String, GitHubError> {
        let comment = self
            .client
            .issues(owner, repo)
            .create_comment(pr_number, body)
            .await?;
        Ok(comment.html_url.to_string())
    }
}

/// Create one release per proposal, in order, stopping at the first failure.
pub async fn publish_releases<P>(
    publisher: &P,
    owner: &str,
    repo: &str,
    proposals: &[ReleaseProposal],
) -> Result<Vec<PublishedRelease>, GitHubError>
where
    P: Publisher + ?Sized,
{
    info!("Will create {} GitHub releases", proposals.len());

    let mut published = Vec::with_capacity(proposals.len());
    for proposal in proposals {
        let release = retry_with_backoff(
            || publisher.create_release(owner, repo, proposal),
            GitHubError::is_retryable,
            |e| GitHubError::RetriesExhausted(Box::new(e)),
        )
        .await?;

        info!(
            "Successfully created a new GitHub release {}\n{}",
            release.tag, release.html_url
        );
        published.push(release);
    }

    Ok(published)
}

/// Post `body` on the pull request.
pub async fn post_comment<P>(
    publisher: &P,
    owner: &str,
    repo: &str,
    pr_number: u64,
    body: &str,
) -> Result<String, GitHubError>
where
    P: Publisher + ?Sized,
{
    retry_with_backoff(
        || publisher.create_comment(owner, repo, pr_number, body),
        GitHubError::is_retryable,
        |e| GitHubError::RetriesExhausted(Box::new(e)),
    )
    .await
}
