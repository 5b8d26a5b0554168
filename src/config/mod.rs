mod schema;

pub use schema::{Config, PullRequestConfig, BASE_BRANCH, DEFAULT_POLL_INTERVAL, DEFAULT_TARGET};

use anyhow::{Context, Result};
use std::time::Duration;

/// Environment variable names read at startup
pub mod vars {
    pub const OWNER: &str = "OWNER";
    pub const REPO: &str = "REPO";
    pub const PR_BRANCH: &str = "PR_BRANCH";
    pub const PR_TITLE: &str = "PR_TITLE";
    pub const PR_BODY: &str = "PR_BODY";
    pub const TARGET: &str = "TARGET";
    pub const POLL_INTERVAL: &str = "POLL_INTERVAL";
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const DRAFT_PR: &str = "DRAFT_PR";
    pub const DISCORD_WEBHOOK_URL: &str = "DISCORD_WEBHOOK_URL";
}

/// Load configuration from the process environment
pub fn load_config() -> Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration through an arbitrary variable lookup
///
/// Required variables that are unset or empty are reported together in a
/// single error. Optional string variables that are blank are treated as unset.
///
/// # Errors
///
/// Returns an error if:
/// - Any of OWNER, REPO, PR_BRANCH, PR_TITLE, PR_BODY is missing
/// - TARGET is not a positive integer
/// - POLL_INTERVAL is not a non-negative integer number of milliseconds
pub fn load_config_from<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let required = [
        vars::OWNER,
        vars::REPO,
        vars::PR_BRANCH,
        vars::PR_TITLE,
        vars::PR_BODY,
    ];

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|key| lookup(key).map_or(true, |v| v.is_empty()))
        .collect();

    if !missing.is_empty() {
        anyhow::bail!("Missing environment variables: {}", missing.join(", "));
    }

    // Presence checked above
    let get = |key: &str| lookup(key).unwrap_or_default();

    let target = match lookup(vars::TARGET) {
        Some(raw) => parse_target(&raw)?,
        None => DEFAULT_TARGET,
    };

    let poll_interval = match lookup(vars::POLL_INTERVAL) {
        Some(raw) => parse_interval_millis(&raw)?,
        None => DEFAULT_POLL_INTERVAL,
    };

    Ok(Config {
        owner: get(vars::OWNER),
        repo: get(vars::REPO),
        target,
        poll_interval,
        pr: PullRequestConfig {
            branch: get(vars::PR_BRANCH),
            title: get(vars::PR_TITLE),
            body: get(vars::PR_BODY),
            draft: lookup(vars::DRAFT_PR).as_deref() == Some("true"),
        },
        discord_webhook_url: non_blank(lookup(vars::DISCORD_WEBHOOK_URL)),
        github_token: non_blank(lookup(vars::GITHUB_TOKEN)),
    })
}

fn parse_target(raw: &str) -> Result<u64> {
    let target: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a positive integer, got {:?}", vars::TARGET, raw))?;

    if target == 0 {
        anyhow::bail!("{} must be a positive integer, got 0", vars::TARGET);
    }

    Ok(target)
}

fn parse_interval_millis(raw: &str) -> Result<Duration> {
    let millis: u64 = raw.trim().parse().with_context(|| {
        format!(
            "{} must be a number of milliseconds, got {:?}",
            vars::POLL_INTERVAL,
            raw
        )
    })?;

    Ok(Duration::from_millis(millis))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
