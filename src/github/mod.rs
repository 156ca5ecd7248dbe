//! GitHub integration using octocrab.

pub mod auth;
pub mod event;
pub mod publisher;
pub mod retry;

pub use auth::{build_client, resolve_token};
pub use event::{EventKind, GitHubEvent, load_github_event, parse_github_event, read_event_env};
pub use publisher::{OctocrabPublisher, PublishedRelease, Publisher, post_comment, publish_releases};
