//! GitHub token resolution and client construction.
//!
//! Token order:
//! 1. Explicit token (`--token` / `INPUT_TOKEN`)
//! 2. GITHUB_TOKEN environment variable
//! 3. GH_TOKEN environment variable

use std::env;

use octocrab::Octocrab;

use crate::error::GitHubError;

/// Get a GitHub token, preferring an explicitly passed one.
pub fn resolve_token(explicit: Option<&str>) -> Result<String, GitHubError> {
    if let Some(token) = explicit.filter(|t| !t.is_empty()) {
        return Ok(token.to_string());
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env::var(var)
            && !token.is_empty()
        {
            return Ok(token);
        }
    }

    Err(GitHubError::AuthenticationFailed)
}

/// Build an octocrab client, honoring `GITHUB_API_URL` for GitHub Enterprise.
///
/// Without a token the client is anonymous.
pub fn build_client(token: Option<&str>) -> Result<Octocrab, GitHubError> {
    let mut builder = Octocrab::builder();

    if let Ok(api_url) = env::var("GITHUB_API_URL")
        && !api_url.is_empty()
    {
        builder = builder.base_uri(api_url)?;
    }
    if let Some(token) = token {
        builder = builder.personal_token(token.to_string());
    }

    Ok(builder.build()?)
}
