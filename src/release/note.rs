//! Release note extraction from commit messages.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::git::Commit;

/// A fenced block introduced by a `Release note:` marker (optionally bold and
/// followed by an HTML comment), or any block fenced as `release-note`.
static RELEASE_NOTE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)(?:Release note(?:\*\*)?:\s*(?:<!--[^<>]*-->\s*)?```(?:release-note)?|```release-note)(.+?)```",
    )
    .expect("release note block pattern is valid")
});

/// Text shown for `commit` in the release note.
///
/// Returns the subject unless `use_release_note_block` is set and the body
/// carries a non-empty release note block.
pub fn determine_release_note(commit: &Commit, use_release_note_block: bool) -> String {
    if !use_release_note_block {
        return commit.subject.clone();
    }

    extract_release_note_block(&commit.body)
        .map(str::to_string)
        .unwrap_or_else(|| commit.subject.clone())
}

/// Trimmed content of the first release note block in `body`, if non-empty.
pub fn extract_release_note_block(body: &str) -> Option<&str> {
    RELEASE_NOTE_BLOCK
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|note| !note.is_empty())
}
