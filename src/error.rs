//! Error types for gh-release modules using thiserror.

use thiserror::Error;

/// Errors from git operations and commit log parsing.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotInstalled,

    #[error("Failed to spawn git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with code {code}: {stderr}")]
    NonZeroExit {
        operation: String,
        code: i32,
        stderr: String,
    },

    #[error("Invalid log: log record should contain {expected} fields but got {actual}")]
    InvalidLogRecord { expected: usize, actual: usize },

    #[error("Invalid commit timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Commit {hash} has out-of-range timestamp (seconds={seconds})")]
    TimestampOutOfRange { hash: String, seconds: i64 },

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to resolve revision '{0}': {1}")]
    RevisionNotFound(String, #[source] git2::Error),

    #[error("Failed to read {path} at {revision}: {source}")]
    ReadFileFailed {
        path: String,
        revision: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to diff {from}..{to}: {source}")]
    DiffFailed {
        from: String,
        to: String,
        #[source]
        source: git2::Error,
    },
}

/// Errors from release configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to decode release config: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("tag must be specified")]
    MissingTag,
}

/// Errors from building a release proposal.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Invalid release file {path} at {revision}: {source}")]
    InvalidConfig {
        path: String,
        revision: String,
        #[source]
        source: ConfigError,
    },
}

/// Errors from GitHub event parsing and API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error(
        "GitHub authentication failed: no token found. Pass --token or set INPUT_TOKEN, GITHUB_TOKEN or GH_TOKEN"
    )]
    AuthenticationFailed,

    #[error("{0} was not defined")]
    MissingEnv(&'static str),

    #[error("This action does not support {0} event")]
    UnsupportedEvent(String),

    #[error("Failed to read event payload: {0}")]
    ReadPayload(#[source] std::io::Error),

    #[error("Failed to parse {event} event payload: {source}")]
    ParsePayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("GitHub API request failed: {0}")]
    Api(#[source] Box<octocrab::Error>),

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<GitHubError>),
}

impl GitHubError {
    /// Whether another attempt could succeed.
    ///
    /// Only transport failures and 5xx responses are transient; any other
    /// API response is final.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => match &**err {
                octocrab::Error::GitHub { source, .. } => source.status_code.is_server_error(),
                octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => false,
                _ => true,
            },
            _ => false,
        }
    }
}

impl From<octocrab::Error> for GitHubError {
    fn from(err: octocrab::Error) -> Self {
        Self::Api(Box::new(err))
    }
}

/// Errors from GitHub Actions runner integration.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Invalid release file pattern: {0}")]
    InvalidPattern(#[from] globset::Error),

    #[error("Failed to serialize output {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write output file: {0}")]
    WriteFailed(#[source] std::io::Error),
}
