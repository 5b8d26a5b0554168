use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::{Config, BASE_BRANCH};
use crate::credentials::{provider_from_config, CredentialProvider};
use crate::github::{CreatedPullRequest, GitHubTracker, IssueSummary, IssueTracker, NewPullRequest};
use crate::notify::Notifications;

/// How many of the newest issues each poll looks at
pub const RECENT_ISSUE_LIMIT: u8 = 3;

/// Everything a poll needs besides its own state
pub struct PollContext {
    pub credentials: Box<dyn CredentialProvider>,
    pub tracker: Box<dyn IssueTracker>,
    pub notifications: Notifications,
    pub target: u64,
    pub poll_interval: Duration,
    pub pull_request: NewPullRequest,
}

impl PollContext {
    /// Wire the GitHub tracker, credential source and webhook from config
    pub fn from_config(config: &Config) -> Self {
        Self {
            credentials: provider_from_config(config),
            tracker: Box::new(GitHubTracker::new(&config.owner, &config.repo)),
            notifications: Notifications::from_webhook_url(config.discord_webhook_url.as_deref()),
            target: config.target,
            poll_interval: config.poll_interval,
            pull_request: NewPullRequest {
                title: config.pr.title.clone(),
                body: config.pr.body.clone(),
                head: config.pr.branch.clone(),
                base: BASE_BRANCH.to_string(),
                draft: config.pr.draft,
            },
        }
    }
}

/// Loop-carried state between polls
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Highest issue number seen on the previous poll, 0 before the first
    pub last_seen: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Target not reached yet
    Waiting { highest: u64 },
    /// Pull request opened; the loop is done
    Created(CreatedPullRequest),
}

/// Highest issue number in the list, 0 for an empty list
pub fn highest_issue_number(issues: &[IssueSummary]) -> u64 {
    issues.iter().map(|issue| issue.number).max().unwrap_or(0)
}

/// True when the next issue to be created would carry the target number
pub fn should_create_pr(highest: u64, target: u64) -> bool {
    highest.saturating_add(1) == target
}

/// Run a single poll: authenticate, list, announce changes, maybe open the PR
///
/// Notification failures are swallowed. Any other failure is returned as-is
/// and leaves `state` untouched past the point of failure.
pub async fn poll_once(ctx: &PollContext, state: &mut PollState) -> Result<PollOutcome> {
    tracing::debug!("Polling for issues");

    let token = ctx
        .credentials
        .token()
        .await
        .context("Failed to obtain GitHub token")?;

    let issues = ctx
        .tracker
        .list_recent_issues(&token, RECENT_ISSUE_LIMIT)
        .await?;

    let highest = highest_issue_number(&issues);
    let next = highest.saturating_add(1);

    if highest != state.last_seen {
        tracing::info!(
            highest,
            newest = ?issues.first().map(IssueSummary::short_ref),
            "Latest issue number {}",
            highest
        );

        let message = match issues.first() {
            Some(newest) => format!("Latest issue number {} {}", highest, newest.html_url),
            None => format!("Latest issue number {}", highest),
        };
        ctx.notifications.send(&message).await;
        state.last_seen = highest;
    }

    if !should_create_pr(highest, ctx.target) {
        return Ok(PollOutcome::Waiting { highest });
    }

    tracing::info!(next, "Creating PR!");
    ctx.notifications
        .send(&format!("Next issue number {}, creating PR", next))
        .await;

    let created = ctx
        .tracker
        .create_pull_request(&token, &ctx.pull_request)
        .await?;

    tracing::info!(number = created.number, "PR created: {}", created.html_url);
    ctx.notifications
        .send(&format!("PR created: {}", created.html_url))
        .await;

    Ok(PollOutcome::Created(created))
}

/// Poll until the pull request is opened or a call fails
pub async fn run(ctx: &PollContext) -> Result<CreatedPullRequest> {
    let mut state = PollState::default();

    loop {
        match poll_once(ctx, &mut state).await? {
            PollOutcome::Created(pr) => return Ok(pr),
            PollOutcome::Waiting { highest } => {
                tracing::debug!(
                    highest,
                    target = ctx.target,
                    "Sleeping {}",
                    humantime::format_duration(ctx.poll_interval)
                );
                tokio::time::sleep(ctx.poll_interval).await;
            }
        }
    }
}
