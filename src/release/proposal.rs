//! Release proposal building.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ReleaseError;
use crate::git::{Commit, RevisionSource};
use crate::github::GitHubEvent;

use super::attribution::MergeAttribution;
use super::config::{MatcherConfig, ReleaseConfig, parse_release_config};
use super::matcher::determine_category;
use super::note::determine_release_note;
use super::render::render_release_note;

/// A commit selected for a release, with its display note and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseCommit {
    #[serde(flatten)]
    pub commit: Commit,
    pub release_note: String,
    /// Empty when no category claimed the commit.
    #[serde(rename = "categoryName", default, skip_serializing_if = "String::is_empty")]
    pub category_id: String,
}

/// Everything needed to create one GitHub release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseProposal {
    pub tag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub title: String,
    pub target_commitish: String,
    pub release_note: String,
    pub prerelease: bool,

    pub owner: String,
    pub repo: String,
    pub pre_tag: String,
    pub base_commit: String,
    pub head_commit: String,
    pub commits: Vec<ReleaseCommit>,
}

/// Build the proposal for `release_file` from the event's revision range.
///
/// The release file is read at both the base and head commits. The base
/// config's tag is the previous release and anchors the commit range
/// `<previous tag>...<head>`. Any lookup failure fails the whole proposal.
pub fn build_release_proposal<S>(
    source: &S,
    release_file: &str,
    event: &GitHubEvent,
) -> Result<ReleaseProposal, ReleaseError>
where
    S: RevisionSource + ?Sized,
{
    let base_config = load_release_config(source, release_file, &event.base_commit)?;
    let head_config = load_release_config(source, release_file, &event.head_commit)?;

    let revisions = format!("{}...{}", base_config.tag, event.head_commit);
    let commits = source.list_commits(&revisions)?;
    info!(
        "Found {} commits in {} for {}",
        commits.len(),
        revisions,
        release_file
    );

    let release_commits = build_release_commits(&commits, &head_config);

    let mut proposal = ReleaseProposal {
        tag: head_config.tag.clone(),
        name: head_config.name.clone(),
        title: head_config.title.clone(),
        target_commitish: head_config.target_commitish.clone(),
        release_note: head_config.release_note.clone(),
        prerelease: head_config.prerelease,
        owner: event.owner.clone(),
        repo: event.repo.clone(),
        pre_tag: base_config.tag,
        base_commit: event.base_commit.clone(),
        head_commit: event.head_commit.clone(),
        commits: release_commits,
    };

    if proposal.title.is_empty() {
        proposal.title = format!("Release {}", proposal.tag);
    }
    if proposal.target_commitish.is_empty() {
        proposal.target_commitish = event.head_commit.clone();
    }
    if proposal.release_note.is_empty() {
        proposal.release_note = render_release_note(&proposal, &head_config);
    }

    Ok(proposal)
}

/// Read and parse the release file as of `revision`.
pub fn load_release_config<S>(
    source: &S,
    release_file: &str,
    revision: &str,
) -> Result<ReleaseConfig, ReleaseError>
where
    S: RevisionSource + ?Sized,
{
    let data = source.read_file_at(release_file, revision)?;
    let config =
        parse_release_config(&data).map_err(|err| ReleaseError::InvalidConfig {
            path: release_file.to_string(),
            revision: revision.to_string(),
            source: err,
        })?;

    debug!(tag = %config.tag, revision, "Loaded release config from {}", release_file);
    Ok(config)
}

/// Filter `commits` through the top-level include/exclude rules and attach a
/// release note and category to each survivor, keeping the original order.
pub fn build_release_commits(commits: &[Commit], config: &ReleaseConfig) -> Vec<ReleaseCommit> {
    let attribution = MergeAttribution::build(commits);
    let use_block = config.release_note_generator.use_release_note_block;

    commits
        .iter()
        .filter(|commit| {
            let merge = attribution.merge_commit_of(&commit.hash);
            let keep = MatcherConfig::admits(
                &config.commit_include,
                &config.commit_exclude,
                commit,
                merge,
            );
            if !keep {
                debug!(
                    commit = %commit.abbreviated_hash,
                    "Skipping commit filtered by release rules"
                );
            }
            keep
        })
        .map(|commit| {
            let merge = attribution.merge_commit_of(&commit.hash);
            ReleaseCommit {
                commit: commit.clone(),
                release_note: determine_release_note(commit, use_block),
                category_id: determine_category(commit, merge, &config.commit_categories)
                    .to_string(),
            }
        })
        .collect()
}
