//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::Cell;

use git2::{Oid, Repository, Signature, Time};
use octocrab::Octocrab;
use serde_json::{Map, Value, json};
use wiremock::MockServer;

/// Seconds of the first commit created by [`TestRepo`].
pub const BASE_TIME: i64 = 1_700_000_000;

/// A test git repository builder for integration tests.
///
/// Commits are created with strictly increasing timestamps so `git log`
/// ordering is deterministic. Each commit's tree holds exactly the files
/// passed to it.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
    clock: Cell<i64>,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self {
            dir,
            repo,
            clock: Cell::new(BASE_TIME),
        }
    }

    fn signature(&self, name: &str) -> Signature<'static> {
        let seconds = self.clock.get();
        self.clock.set(seconds + 60);
        Signature::new(name, "test@example.com", &Time::new(seconds, 0))
            .expect("Failed to create signature")
    }

    /// Create a commit with the given files and parents, without moving any ref.
    pub fn commit_with(&self, message: &str, files: &[(&str, &str)], parents: &[Oid]) -> Oid {
        let mut builder = self.repo.treebuilder(None).expect("Failed to create tree builder");
        for (name, content) in files {
            let blob = self.repo.blob(content.as_bytes()).expect("Failed to write blob");
            builder
                .insert(*name, blob, 0o100644)
                .expect("Failed to insert tree entry");
        }
        let tree_id = builder.write().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parents: Vec<git2::Commit> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Failed to find parent"))
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        let author = self.signature("Test Author");
        let committer = Signature::new("Test Committer", "committer@example.com", &author.when())
            .expect("Failed to create signature");

        self.repo
            .commit(None, &author, &committer, message, &tree, &parent_refs)
            .expect("Failed to create commit")
    }

    /// Create a commit with a single `test.txt` file.
    pub fn commit(&self, message: &str, parents: &[Oid]) -> Oid {
        self.commit_with(message, &[("test.txt", message)], parents)
    }

    /// Point `refs/heads/main` and HEAD at `oid`.
    pub fn set_head(&self, oid: Oid) {
        self.repo
            .reference("refs/heads/main", oid, true, "test")
            .expect("Failed to update main");
        self.repo
            .set_head("refs/heads/main")
            .expect("Failed to set HEAD");
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }
}

/// Helper to create an octocrab client pointing to a mock server.
pub async fn mock_client(server: &MockServer) -> Octocrab {
    Octocrab::builder()
        .base_uri(server.uri())
        .expect("Failed to set base URI")
        .build()
        .expect("Failed to build octocrab")
}

/// Create a mock user object with all fields GitHub API returns.
pub fn mock_user(login: &str, id: u64) -> Value {
    let mut user = Map::new();
    user.insert("login".into(), json!(login));
    user.insert("id".into(), json!(id));
    user.insert("node_id".into(), json!(format!("MDQ6VXNlcnt{}", id)));
    user.insert("avatar_url".into(), json!(format!("https://avatars.githubusercontent.com/u/{}?v=4", id)));
    user.insert("gravatar_id".into(), json!(""));
    user.insert("url".into(), json!(format!("https://api.github.com/users/{}", login)));
    user.insert("html_url".into(), json!(format!("https://github.com/{}", login)));
    user.insert("followers_url".into(), json!(format!("https://api.github.com/users/{}/followers", login)));
    user.insert("following_url".into(), json!(format!("https://api.github.com/users/{}/following{{/other_user}}", login)));
    user.insert("gists_url".into(), json!(format!("https://api.github.com/users/{}/gists{{/gist_id}}", login)));
    user.insert("starred_url".into(), json!(format!("https://api.github.com/users/{}/starred{{/owner}}{{/repo}}", login)));
    user.insert("subscriptions_url".into(), json!(format!("https://api.github.com/users/{}/subscriptions", login)));
    user.insert("organizations_url".into(), json!(format!("https://api.github.com/users/{}/orgs", login)));
    user.insert("repos_url".into(), json!(format!("https://api.github.com/users/{}/repos", login)));
    user.insert("events_url".into(), json!(format!("https://api.github.com/users/{}/events{{/privacy}}", login)));
    user.insert("received_events_url".into(), json!(format!("https://api.github.com/users/{}/received_events", login)));
    user.insert("type".into(), json!("User"));
    user.insert("site_admin".into(), json!(false));
    Value::Object(user)
}

/// Create a mock repository object with all required fields.
pub fn mock_repo(owner: &str, name: &str) -> Value {
    let full = format!("{}/{}", owner, name);
    let api = format!("https://api.github.com/repos/{}", full);

    let mut repo = Map::new();
    repo.insert("id".into(), json!(1));
    repo.insert("node_id".into(), json!("MDEwOlJlcG9zaXRvcnkx"));
    repo.insert("name".into(), json!(name));
    repo.insert("full_name".into(), json!(full));
    repo.insert("owner".into(), mock_user(owner, 1));
    repo.insert("private".into(), json!(false));
    repo.insert("html_url".into(), json!(format!("https://github.com/{}", full)));
    repo.insert("description".into(), json!("Test repository"));
    repo.insert("fork".into(), json!(false));
    repo.insert("url".into(), json!(api));
    for (key, suffix) in [
        ("forks_url", "/forks"),
        ("keys_url", "/keys{/key_id}"),
        ("collaborators_url", "/collaborators{/collaborator}"),
        ("teams_url", "/teams"),
        ("hooks_url", "/hooks"),
        ("issue_events_url", "/issues/events{/number}"),
        ("events_url", "/events"),
        ("assignees_url", "/assignees{/user}"),
        ("branches_url", "/branches{/branch}"),
        ("tags_url", "/tags"),
        ("blobs_url", "/git/blobs{/sha}"),
        ("git_tags_url", "/git/tags{/sha}"),
        ("git_refs_url", "/git/refs{/sha}"),
        ("trees_url", "/git/trees{/sha}"),
        ("statuses_url", "/statuses/{sha}"),
        ("languages_url", "/languages"),
        ("stargazers_url", "/stargazers"),
        ("contributors_url", "/contributors"),
        ("subscribers_url", "/subscribers"),
        ("subscription_url", "/subscription"),
        ("commits_url", "/commits{/sha}"),
        ("git_commits_url", "/git/commits{/sha}"),
        ("comments_url", "/comments{/number}"),
        ("issue_comment_url", "/issues/comments{/number}"),
        ("contents_url", "/contents/{+path}"),
        ("compare_url", "/compare/{base}...{head}"),
        ("merges_url", "/merges"),
        ("archive_url", "/{archive_format}{/ref}"),
        ("downloads_url", "/downloads"),
        ("issues_url", "/issues{/number}"),
        ("pulls_url", "/pulls{/number}"),
        ("milestones_url", "/milestones{/number}"),
        ("notifications_url", "/notifications{?since,all,participating}"),
        ("labels_url", "/labels{/name}"),
        ("releases_url", "/releases{/id}"),
        ("deployments_url", "/deployments"),
    ] {
        repo.insert(key.into(), json!(format!("{}{}", api, suffix)));
    }
    Value::Object(repo)
}

/// Create a complete mock PR JSON with the given base and head commits.
pub fn mock_pr(owner: &str, name: &str, number: u64, base_sha: &str, head_sha: &str) -> Value {
    let repo = mock_repo(owner, name);
    let api = format!("https://api.github.com/repos/{}/{}", owner, name);
    let html = format!("https://github.com/{}/{}", owner, name);

    let head = json!({
        "label": format!("{}:feature", owner),
        "ref": "feature",
        "sha": head_sha,
        "user": mock_user("testuser", 100),
        "repo": repo.clone()
    });

    let base = json!({
        "label": format!("{}:main", owner),
        "ref": "main",
        "sha": base_sha,
        "user": mock_user(owner, 1),
        "repo": repo
    });

    let links = json!({
        "self": { "href": format!("{}/pulls/{}", api, number) },
        "html": { "href": format!("{}/pull/{}", html, number) },
        "issue": { "href": format!("{}/issues/{}", api, number) },
        "comments": { "href": format!("{}/issues/{}/comments", api, number) },
        "review_comments": { "href": format!("{}/pulls/{}/comments", api, number) },
        "review_comment": { "href": format!("{}/pulls/comments{{/number}}", api) },
        "commits": { "href": format!("{}/pulls/{}/commits", api, number) },
        "statuses": { "href": format!("{}/statuses/{}", api, head_sha) }
    });

    // Build the PR object using a Map to avoid macro recursion limits
    let mut pr = Map::new();
    pr.insert("url".into(), json!(format!("{}/pulls/{}", api, number)));
    pr.insert("id".into(), json!(number * 1000));
    pr.insert("node_id".into(), json!(format!("PR_{}", number)));
    pr.insert("html_url".into(), json!(format!("{}/pull/{}", html, number)));
    pr.insert("diff_url".into(), json!(format!("{}/pull/{}.diff", html, number)));
    pr.insert("patch_url".into(), json!(format!("{}/pull/{}.patch", html, number)));
    pr.insert("issue_url".into(), json!(format!("{}/issues/{}", api, number)));
    pr.insert("commits_url".into(), json!(format!("{}/pulls/{}/commits", api, number)));
    pr.insert("review_comments_url".into(), json!(format!("{}/pulls/{}/comments", api, number)));
    pr.insert("review_comment_url".into(), json!(format!("{}/pulls/comments{{/number}}", api)));
    pr.insert("comments_url".into(), json!(format!("{}/issues/{}/comments", api, number)));
    pr.insert("statuses_url".into(), json!(format!("{}/statuses/{}", api, head_sha)));
    pr.insert("number".into(), json!(number));
    pr.insert("state".into(), json!("open"));
    pr.insert("locked".into(), json!(false));
    pr.insert("title".into(), json!("Bump release"));
    pr.insert("body".into(), Value::Null);
    pr.insert("user".into(), mock_user("testuser", 100));
    pr.insert("labels".into(), json!([]));
    pr.insert("assignee".into(), Value::Null);
    pr.insert("assignees".into(), json!([]));
    pr.insert("requested_reviewers".into(), json!([]));
    pr.insert("requested_teams".into(), json!([]));
    pr.insert("milestone".into(), Value::Null);
    pr.insert("created_at".into(), json!("2024-01-01T00:00:00Z"));
    pr.insert("updated_at".into(), json!("2024-01-15T00:00:00Z"));
    pr.insert("closed_at".into(), Value::Null);
    pr.insert("merged_at".into(), Value::Null);
    pr.insert("merge_commit_sha".into(), Value::Null);
    pr.insert("head".into(), head);
    pr.insert("base".into(), base);
    pr.insert("draft".into(), json!(false));
    pr.insert("merged".into(), json!(false));
    pr.insert("mergeable".into(), json!(true));
    pr.insert("mergeable_state".into(), json!("clean"));
    pr.insert("merged_by".into(), Value::Null);
    pr.insert("comments".into(), json!(0));
    pr.insert("review_comments".into(), json!(0));
    pr.insert("maintainer_can_modify".into(), json!(true));
    pr.insert("commits".into(), json!(1));
    pr.insert("additions".into(), json!(1));
    pr.insert("deletions".into(), json!(1));
    pr.insert("changed_files".into(), json!(1));
    pr.insert("_links".into(), links);

    Value::Object(pr)
}

/// Create a mock release as returned by `POST /repos/{owner}/{repo}/releases`.
pub fn mock_release(owner: &str, name: &str, tag: &str, title: &str, prerelease: bool) -> Value {
    let api = format!("https://api.github.com/repos/{}/{}", owner, name);

    let mut release = Map::new();
    release.insert("url".into(), json!(format!("{}/releases/1", api)));
    release.insert(
        "html_url".into(),
        json!(format!("https://github.com/{}/{}/releases/tag/{}", owner, name, tag)),
    );
    release.insert("assets_url".into(), json!(format!("{}/releases/1/assets", api)));
    release.insert(
        "upload_url".into(),
        json!(format!(
            "https://uploads.github.com/repos/{}/{}/releases/1/assets{{?name,label}}",
            owner, name
        )),
    );
    release.insert("tarball_url".into(), json!(format!("{}/tarball/{}", api, tag)));
    release.insert("zipball_url".into(), json!(format!("{}/zipball/{}", api, tag)));
    release.insert("id".into(), json!(1));
    release.insert("node_id".into(), json!("RE_1"));
    release.insert("tag_name".into(), json!(tag));
    release.insert("target_commitish".into(), json!("main"));
    release.insert("name".into(), json!(title));
    release.insert("body".into(), json!("notes"));
    release.insert("draft".into(), json!(false));
    release.insert("prerelease".into(), json!(prerelease));
    release.insert("created_at".into(), json!("2024-01-01T00:00:00Z"));
    release.insert("published_at".into(), json!("2024-01-01T00:00:00Z"));
    release.insert("author".into(), mock_user("releaser", 300));
    release.insert("assets".into(), json!([]));
    Value::Object(release)
}

/// Create a mock issue comment as returned by the comments endpoint.
pub fn mock_comment(owner: &str, name: &str, number: u64, body: &str) -> Value {
    let api = format!("https://api.github.com/repos/{}/{}", owner, name);

    let mut comment = Map::new();
    comment.insert("id".into(), json!(1));
    comment.insert("node_id".into(), json!("IC_1"));
    comment.insert("url".into(), json!(format!("{}/issues/comments/1", api)));
    comment.insert(
        "html_url".into(),
        json!(format!("https://github.com/{}/{}/pull/{}#issuecomment-1", owner, name, number)),
    );
    comment.insert("issue_url".into(), json!(format!("{}/issues/{}", api, number)));
    comment.insert("body".into(), json!(body));
    comment.insert("author_association".into(), json!("OWNER"));
    comment.insert("user".into(), mock_user("github-actions", 41898282));
    comment.insert("created_at".into(), json!("2024-01-01T00:00:00Z"));
    comment.insert("updated_at".into(), json!("2024-01-01T00:00:00Z"));
    Value::Object(comment)
}
