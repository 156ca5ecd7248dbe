//! Rule matching and category assignment.

use crate::git::Commit;

use super::config::{CategoryConfig, MatcherConfig};

impl MatcherConfig {
    /// True when no prefixes and no substrings are configured.
    ///
    /// An empty include rule set means "no constraint" and an empty exclude
    /// rule set excludes nothing. An empty category matcher is a catch-all.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.contains.is_empty()
    }

    /// Check `commit` against this rule set.
    ///
    /// With `parent_of_merge_commit` set, the merge commit that brought
    /// `commit` in is checked too, one level deep.
    pub fn matches(&self, commit: &Commit, merge_commit: Option<&Commit>) -> bool {
        if self.parent_of_merge_commit
            && let Some(merge) = merge_commit
            && self.matches(merge, None)
        {
            return true;
        }

        self.prefixes
            .iter()
            .any(|prefix| commit.subject.starts_with(prefix.as_str()))
            || self
                .contains
                .iter()
                .any(|needle| commit.body.contains(needle.as_str()))
    }

    /// Keep/drop decision for an include/exclude pair.
    pub(crate) fn admits(
        include: &MatcherConfig,
        exclude: &MatcherConfig,
        commit: &Commit,
        merge_commit: Option<&Commit>,
    ) -> bool {
        if !exclude.is_empty() && exclude.matches(commit, merge_commit) {
            return false;
        }
        include.is_empty() || include.matches(commit, merge_commit)
    }
}

/// Id of the first category that claims `commit`, or `""` if none does.
///
/// Categories are checked in declaration order; one with an empty matcher
/// claims every commit that reaches it.
pub fn determine_category<'a>(
    commit: &Commit,
    merge_commit: Option<&Commit>,
    categories: &'a [CategoryConfig],
) -> &'a str {
    categories
        .iter()
        .find(|category| {
            category.matcher.is_empty() || category.matcher.matches(commit, merge_commit)
        })
        .map(|category| category.id.as_str())
        .unwrap_or("")
}
