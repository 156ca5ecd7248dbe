//! Release proposal pipeline: config, commit matching, and note rendering.

pub mod attribution;
pub mod comment;
pub mod config;
pub mod matcher;
pub mod note;
pub mod proposal;
pub mod render;

pub use attribution::MergeAttribution;
pub use comment::make_comment_body;
pub use config::{
    CategoryConfig, MatcherConfig, NoteGeneratorConfig, ReleaseConfig, parse_release_config,
};
pub use matcher::determine_category;
pub use note::{determine_release_note, extract_release_note_block};
pub use proposal::{
    ReleaseCommit, ReleaseProposal, build_release_commits, build_release_proposal,
    load_release_config,
};
pub use render::render_release_note;
