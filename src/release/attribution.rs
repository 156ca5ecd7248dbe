//! Merge attribution: which merge commit brought a commit into history.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::git::Commit;

/// Maps commit hashes to the merge commit that merged them in through its
/// second parent.
///
/// Built once per commit list and read-only afterwards.
#[derive(Debug, Default)]
pub struct MergeAttribution<'a> {
    merges: HashMap<&'a str, &'a Commit>,
}

impl<'a> MergeAttribution<'a> {
    /// Walk the second-parent line of every merge in `commits`.
    ///
    /// From a merge with parents `[p0, p1]` the walk starts at `p1` and
    /// follows single-parent ancestry, attributing each commit to the merge.
    /// It stops on reaching `p0`, on a hash outside the list, or on a commit
    /// without exactly one parent. When merges overlap, the merge listed
    /// first keeps the commit.
    pub fn build(commits: impl IntoIterator<Item = &'a Commit>) -> Self {
        let commits: Vec<&'a Commit> = commits.into_iter().collect();
        let by_hash: HashMap<&str, &Commit> =
            commits.iter().map(|c| (c.hash.as_str(), *c)).collect();

        let mut merges: HashMap<&'a str, &'a Commit> = HashMap::new();

        for merge in commits.iter().copied().filter(|c| c.is_merge()) {
            let finish = merge.parent_hashes[0].as_str();
            let mut cursor = merge.parent_hashes[1].as_str();
            let mut visited = HashSet::new();

            while let Some(parent) = by_hash.get(cursor).copied() {
                if parent.hash == finish || parent.parent_hashes.len() != 1 {
                    break;
                }
                if !visited.insert(parent.hash.as_str()) {
                    break;
                }

                merges.entry(parent.hash.as_str()).or_insert(merge);
                cursor = parent.parent_hashes[0].as_str();
            }

            debug!(
                merge = %merge.abbreviated_hash,
                commits = visited.len(),
                "Attributed merged-in commits"
            );
        }

        Self { merges }
    }

    /// The merge commit `hash` was merged in through, if any.
    pub fn merge_commit_of(&self, hash: &str) -> Option<&'a Commit> {
        self.merges.get(hash).copied()
    }

    pub fn len(&self) -> usize {
        self.merges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }
}
