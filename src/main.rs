//! gh-release - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use gh_release::actions::{filter_release_files, set_output};
use gh_release::git::{LocalRepository, RevisionSource};
use gh_release::github::{
    EventKind, OctocrabPublisher, build_client, load_github_event, post_comment,
    publish_releases, resolve_token,
};
use gh_release::release::{ReleaseProposal, build_release_proposal, make_comment_body};

/// Create GitHub releases from changes to RELEASE files.
#[derive(Parser, Debug)]
#[command(name = "gh-release")]
#[command(about = "Create GitHub releases from changes to RELEASE files")]
#[command(version)]
struct Cli {
    /// Release file path or glob pattern, relative to the repository root
    #[arg(long, env = "INPUT_RELEASE_FILE", default_value = "RELEASE")]
    release_file: String,

    /// GitHub token (falls back to GITHUB_TOKEN / GH_TOKEN)
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Repository checkout directory
    #[arg(long, env = "GITHUB_WORKSPACE")]
    workspace: PathBuf,

    /// Build and print proposals without creating releases or comments
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Start running gh-release");

    // Step 1: GitHub client (a token is only optional for dry runs)
    let token = match resolve_token(cli.token.as_deref()) {
        Ok(token) => Some(token),
        Err(_) if cli.dry_run => None,
        Err(e) => return Err(e).context("A GitHub token is required"),
    };
    let client = build_client(token.as_deref()).context("Failed to build GitHub client")?;

    // Step 2: Triggering event
    let event = load_github_event(&client)
        .await
        .context("Failed to parse GitHub event")?;
    info!(
        "Successfully parsed GitHub event {}\n\tbase-commit {}\n\thead-commit {}",
        event.kind, event.base_commit, event.head_commit
    );

    // Step 3: Build a proposal for every changed release file
    let proposals = build_proposals(&cli, &event)?;
    let Some(proposals) = proposals else {
        info!("Nothing to do since there were no modified release files");
        return Ok(());
    };

    set_output("releases", &proposals).context("Failed to write releases output")?;

    if cli.dry_run {
        for proposal in &proposals {
            println!("{}", proposal.release_note);
        }
        return Ok(());
    }

    // Step 4: Release on push, otherwise preview on the pull request
    let publisher = OctocrabPublisher::new(client);
    if event.kind == EventKind::Push {
        let published = publish_releases(&publisher, &event.owner, &event.repo, &proposals)
            .await
            .context("Failed to create GitHub releases")?;
        info!("Successfully created all {} GitHub releases", published.len());
        return Ok(());
    }

    let pr_number = event
        .pr_number
        .context("Event has no pull request to comment on")?;
    let body = make_comment_body(&proposals);
    let url = post_comment(&publisher, &event.owner, &event.repo, pr_number, &body)
        .await
        .context("Failed to send comment")?;
    info!("Successfully commented gh-release result on pull request\n{}", url);

    Ok(())
}

/// Build proposals for changed release files, or `None` if none changed.
fn build_proposals(
    cli: &Cli,
    event: &gh_release::GitHubEvent,
) -> Result<Option<Vec<ReleaseProposal>>> {
    let repo = LocalRepository::open(&cli.workspace)
        .with_context(|| format!("Failed to open repository at {}", cli.workspace.display()))?;

    let changed = repo
        .changed_files(&event.base_commit, &event.head_commit)
        .context("Failed to list changed files")?;
    let release_files = filter_release_files(&cli.release_file, &changed)
        .context("Failed to match release files")?;

    if release_files.is_empty() {
        return Ok(None);
    }

    let proposals = release_files
        .iter()
        .map(|file| {
            build_release_proposal(&repo, file, event)
                .with_context(|| format!("Failed to build release for {}", file))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(proposals))
}
