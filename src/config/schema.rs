use std::time::Duration;

/// Default issue number at which the pull request is opened
pub const DEFAULT_TARGET: u64 = 100_000;

/// Default delay between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Branch every pull request is opened against
pub const BASE_BRANCH: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub target: u64,
    pub poll_interval: Duration,
    pub pr: PullRequestConfig,
    pub discord_webhook_url: Option<String>,
    pub github_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestConfig {
    pub branch: String,
    pub title: String,
    pub body: String,
    pub draft: bool,
}

impl Config {
    /// Return a short reference in the format "owner/repo"
    pub fn repo_ref(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}
