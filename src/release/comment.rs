//! Pull request comment listing the releases a merge would create.

use super::proposal::ReleaseProposal;

const BADGE: &str = "<!-- RELEASE -->\n\
[![RELEASE](https://img.shields.io/static/v1?label=GitHub&message=RELEASE&color=success&style=flat)](https://github.com/pipe-cd/actions-gh-release)\n\n";

const NO_RELEASE_MESSAGE: &str = "This pull request does not touch any RELEASE files. It means no GitHub releases will be created once this pull request got merged.\n";

/// Build the comment body for `proposals`.
pub fn make_comment_body(proposals: &[ReleaseProposal]) -> String {
    let mut body = BADGE.to_string();

    if proposals.is_empty() {
        body.push_str(NO_RELEASE_MESSAGE);
        return body;
    }

    body.push_str(&format!(
        "The following {} GitHub releases will be created once this pull request got merged.\n",
        proposals.len()
    ));
    for proposal in proposals {
        body.push('\n');
        body.push_str(&proposal.release_note);
        body.push('\n');
    }

    body
}
