//! Release file configuration.
//!
//! A release file is YAML with camelCase keys:
//!
//! ```yaml
//! tag: v1.2.0
//! commitExclude:
//!   prefixes: ["Merge pull request"]
//! commitCategories:
//!   - title: Features
//!     prefixes: ["feat:"]
//! releaseNoteGenerator:
//!   showAbbrevHash: true
//!   useReleaseNoteBlock: true
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// Include/exclude rule set matched against commit subjects and bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatcherConfig {
    /// Also match when the merge commit this commit was merged through matches.
    #[serde(deserialize_with = "null_as_default")]
    pub parent_of_merge_commit: bool,
    /// Subject prefixes, any of which matches.
    #[serde(deserialize_with = "null_as_default")]
    pub prefixes: Vec<String>,
    /// Body substrings, any of which matches.
    #[serde(deserialize_with = "null_as_default")]
    pub contains: Vec<String>,
}

/// Treat a key written without a value (`prefixes:`) as absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A named bucket in the rendered release note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryConfig {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub matcher: MatcherConfig,
}

/// Settings for rendering the markdown release note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteGeneratorConfig {
    pub show_abbrev_hash: bool,
    pub show_committer: bool,
    pub use_release_note_block: bool,
    pub commit_include: MatcherConfig,
    pub commit_exclude: MatcherConfig,
}

impl Default for NoteGeneratorConfig {
    fn default() -> Self {
        Self {
            show_abbrev_hash: false,
            show_committer: true,
            use_release_note_block: false,
            commit_include: MatcherConfig::default(),
            commit_exclude: MatcherConfig::default(),
        }
    }
}

/// Contents of a release file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseConfig {
    pub tag: String,
    pub name: String,
    pub title: String,
    pub target_commitish: String,
    pub release_note: String,
    pub prerelease: bool,
    pub commit_include: MatcherConfig,
    pub commit_exclude: MatcherConfig,
    pub commit_categories: Vec<CategoryConfig>,
    pub release_note_generator: NoteGeneratorConfig,
}

impl ReleaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tag.is_empty() {
            return Err(ConfigError::MissingTag);
        }
        Ok(())
    }
}

/// Decode, default, and validate a release file.
///
/// Categories without an explicit id get `_category_<index>`.
pub fn parse_release_config(data: &[u8]) -> Result<ReleaseConfig, ConfigError> {
    let mut config: ReleaseConfig = serde_yaml::from_slice(data)?;

    for (index, category) in config.commit_categories.iter_mut().enumerate() {
        if category.id.is_empty() {
            category.id = format!("_category_{}", index);
        }
    }

    config.validate()?;
    Ok(config)
}
