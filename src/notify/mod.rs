pub mod discord;

pub use discord::DiscordWebhook;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Longest a single notification may hold up the poll loop
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// A chat channel that can receive plain-text messages
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}

/// Best-effort notification fan-out
///
/// With no notifier configured, `send` does nothing. Delivery failures and
/// sends that outlive the timeout are logged and dropped; they never reach
/// the caller.
pub struct Notifications {
    notifier: Option<Box<dyn Notifier>>,
    timeout: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self {
            notifier: None,
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}

impl Notifications {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self {
            notifier: Some(notifier),
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Discord webhook when a URL is configured, otherwise disabled
    pub fn from_webhook_url(url: Option<&str>) -> Self {
        match url {
            Some(url) => Self::new(Box::new(DiscordWebhook::new(url))),
            None => Self::disabled(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    pub async fn send(&self, message: &str) {
        let Some(notifier) = &self.notifier else {
            tracing::debug!("No webhook configured, skipping notification");
            return;
        };

        match tokio::time::timeout(self.timeout, notifier.notify(message)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!(error = %format!("{:#}", e), "Error sending notification");
            }
            Err(_) => {
                tracing::warn!(
                    "Notification not delivered within {}, giving up",
                    humantime::format_duration(self.timeout)
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Failing;

    #[async_trait]
    impl Notifier for Failing {
        async fn notify(&self, _message: &str) -> Result<()> {
            anyhow::bail!("webhook unreachable")
        }
    }

    struct Hanging;

    #[async_trait]
    impl Notifier for Hanging {
        async fn notify(&self, _message: &str) -> Result<()> {
            std::future::pending::<Result<()>>().await
        }
    }

    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl Notifier for Recording {
        async fn notify(&self, message: &str) -> Result<()> {
            self.0.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_send_swallows_failures() {
        let notifications = Notifications::new(Box::new(Failing));
        // Must return normally
        notifications.send("hello").await;
    }

    #[tokio::test]
    async fn test_send_gives_up_on_hanging_notifier() {
        let notifications =
            Notifications::new(Box::new(Hanging)).with_timeout(Duration::from_millis(20));

        let sent = tokio::time::timeout(Duration::from_secs(5), notifications.send("hello")).await;

        assert!(sent.is_ok(), "send should return once its own timeout expires");
    }

    #[tokio::test]
    async fn test_send_forwards_message() {
        let recording = Recording::default();
        let notifications = Notifications::new(Box::new(recording.clone()));

        notifications.send("Latest issue number 7").await;

        assert_eq!(*recording.0.lock().unwrap(), vec!["Latest issue number 7"]);
    }

    #[tokio::test]
    async fn test_disabled_is_noop() {
        let notifications = Notifications::from_webhook_url(None);
        assert!(!notifications.is_enabled());
        notifications.send("nobody listening").await;
    }

    #[test]
    fn test_from_webhook_url_enables_discord() {
        let _ = rustls::crypto::ring::default_provider().install_default();
        assert!(Notifications::from_webhook_url(Some("https://discord.test/hook")).is_enabled());
    }
}
