//! Markdown rendering of release notes.

use super::attribution::MergeAttribution;
use super::config::{MatcherConfig, NoteGeneratorConfig, ReleaseConfig};
use super::proposal::{ReleaseCommit, ReleaseProposal};

/// Render the markdown release note for `proposal`.
///
/// The note generator's own include/exclude rules are applied on top of the
/// proposal's commits. Categorized commits are grouped under `### <title>` in
/// config order, skipping empty categories; uncategorized commits follow
/// without a heading.
pub fn render_release_note(proposal: &ReleaseProposal, config: &ReleaseConfig) -> String {
    let generator = &config.release_note_generator;
    let mut note = format!(
        "## Release {} with changes since {}\n\n",
        proposal.tag, proposal.pre_tag
    );

    let attribution = MergeAttribution::build(proposal.commits.iter().map(|c| &c.commit));
    let commits: Vec<&ReleaseCommit> = proposal
        .commits
        .iter()
        .filter(|c| {
            MatcherConfig::admits(
                &generator.commit_include,
                &generator.commit_exclude,
                &c.commit,
                attribution.merge_commit_of(&c.commit.hash),
            )
        })
        .collect();

    for category in &config.commit_categories {
        let mut entries = commits
            .iter()
            .filter(|c| c.category_id == category.id)
            .peekable();
        if entries.peek().is_none() {
            continue;
        }

        note.push_str(&format!("### {}\n\n", category.title));
        for commit in entries {
            render_commit(&mut note, commit, proposal, generator);
        }
        note.push('\n');
    }

    for commit in commits.iter().filter(|c| c.category_id.is_empty()) {
        render_commit(&mut note, commit, proposal, generator);
    }

    note
}

fn render_commit(
    note: &mut String,
    commit: &ReleaseCommit,
    proposal: &ReleaseProposal,
    generator: &NoteGeneratorConfig,
) {
    note.push_str(&format!("* {}", commit.release_note));
    if generator.show_abbrev_hash {
        note.push_str(&format!(
            " [{}](https://github.com/{}/{}/commit/{})",
            commit.commit.abbreviated_hash, proposal.owner, proposal.repo, commit.commit.hash
        ));
    }
    if generator.show_committer {
        note.push_str(&format!(" - by {}", commit.commit.committer));
    }
    note.push('\n');
}
