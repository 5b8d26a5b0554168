use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use super::Notifier;

/// Discord incoming webhook
#[derive(Clone)]
pub struct DiscordWebhook {
    url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn notify(&self, message: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&WebhookPayload { content: message })
            .send()
            .await
            .context("Failed to reach Discord webhook")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Discord webhook returned HTTP {}: {}", status, body.trim());
        }

        Ok(())
    }
}
