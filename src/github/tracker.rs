use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::github::client::create_client;
use crate::github::types::{CreatedPullRequest, IssueSummary, NewPullRequest};

/// The two issue-tracker calls the poller needs
///
/// The token is passed on every call so each poll authenticates with a
/// freshly obtained credential.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Newest `limit` issues in any state, newest first
    async fn list_recent_issues(&self, token: &str, limit: u8) -> Result<Vec<IssueSummary>>;

    async fn create_pull_request(
        &self,
        token: &str,
        pr: &NewPullRequest,
    ) -> Result<CreatedPullRequest>;
}

/// GitHub REST implementation backed by octocrab
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    owner: String,
    repo: String,
    base_uri: Option<String>,
}

#[derive(Serialize)]
struct ListIssuesParams {
    state: &'static str,
    sort: &'static str,
    direction: &'static str,
    per_page: u8,
}

impl GitHubTracker {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            base_uri: None,
        }
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    fn route(&self, endpoint: &str) -> String {
        format!("/repos/{}/{}/{}", self.owner, self.repo, endpoint)
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn list_recent_issues(&self, token: &str, limit: u8) -> Result<Vec<IssueSummary>> {
        let client = create_client(token, self.base_uri.as_deref())?;

        let params = ListIssuesParams {
            state: "all",
            sort: "created",
            direction: "desc",
            per_page: limit,
        };

        let issues: Vec<IssueSummary> = client
            .get(self.route("issues"), Some(&params))
            .await
            .map_err(friendly_error)
            .with_context(|| format!("Failed to list issues for {}/{}", self.owner, self.repo))?;

        Ok(issues)
    }

    async fn create_pull_request(
        &self,
        token: &str,
        pr: &NewPullRequest,
    ) -> Result<CreatedPullRequest> {
        let client = create_client(token, self.base_uri.as_deref())?;

        let created: CreatedPullRequest = client
            .post(self.route("pulls"), Some(pr))
            .await
            .map_err(friendly_error)
            .with_context(|| {
                format!(
                    "Failed to create pull request {} -> {} in {}/{}",
                    pr.head, pr.base, self.owner, self.repo
                )
            })?;

        Ok(created)
    }
}

/// Turn common octocrab failures into actionable messages
fn friendly_error(e: octocrab::Error) -> anyhow::Error {
    let octocrab::Error::GitHub { source, .. } = &e else {
        return anyhow!("GitHub API error: {}", e);
    };

    match source.status_code.as_u16() {
        401 => anyhow!("Authentication failed. Your GitHub token may be invalid or expired."),
        403 | 429 if source.message.to_lowercase().contains("rate limit") => {
            anyhow!("GitHub API rate limit exceeded.")
        }
        404 => anyhow!("Repository not found or no access. Check OWNER/REPO and token permissions."),
        422 => anyhow!("GitHub rejected the request: {}", source.message),
        status => anyhow!("GitHub API error ({}): {}", status, source.message),
    }
}
