use async_trait::async_trait;
use std::fmt;
use tokio::process::Command;

use crate::config::Config;

/// Default credential helper: the GitHub CLI
const GH_PROGRAM: &str = "gh";
const GH_ARGS: &[&str] = &["auth", "token"];

#[derive(Debug)]
pub enum CredentialError {
    Spawn(String),
    HelperFailed { status: String, stderr: String },
    EmptyToken,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::Spawn(msg) => write!(f, "Failed to run credential helper: {}", msg),
            CredentialError::HelperFailed { status, stderr } => {
                write!(f, "Credential helper exited with {}", status)?;
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            CredentialError::EmptyToken => write!(f, "Credential helper returned an empty token"),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Source of a GitHub token, asked once per poll
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn token(&self) -> Result<String, CredentialError>;
}

/// A token known up front (GITHUB_TOKEN)
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn token(&self) -> Result<String, CredentialError> {
        Ok(self.0.clone())
    }
}

/// A token printed to stdout by an external helper command
#[derive(Debug, Clone)]
pub struct CommandToken {
    program: String,
    args: Vec<String>,
}

impl CommandToken {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// `gh auth token`
    pub fn gh_cli() -> Self {
        Self::new(GH_PROGRAM, GH_ARGS)
    }
}

#[async_trait]
impl CredentialProvider for CommandToken {
    async fn token(&self) -> Result<String, CredentialError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CredentialError::Spawn(format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(CredentialError::HelperFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(CredentialError::EmptyToken);
        }

        Ok(token)
    }
}

/// Prefer the configured token, fall back to `gh auth token`
pub fn provider_from_config(config: &Config) -> Box<dyn CredentialProvider> {
    match &config.github_token {
        Some(token) => Box::new(StaticToken::new(token.clone())),
        None => Box::new(CommandToken::gh_cli()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token_returned_verbatim() {
        let provider = StaticToken::new("ghp_fixed");
        assert_eq!(provider.token().await.unwrap(), "ghp_fixed");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_token_trims_output() {
        let provider = CommandToken::new("sh", &["-c", "printf '  ghp_from_helper \\n\\n'"]);
        assert_eq!(provider.token().await.unwrap(), "ghp_from_helper");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_token_nonzero_exit_is_error() {
        let provider = CommandToken::new("sh", &["-c", "echo 'not logged in' >&2; exit 1"]);

        match provider.token().await {
            Err(CredentialError::HelperFailed { stderr, .. }) => {
                assert_eq!(stderr, "not logged in");
            }
            other => panic!("expected HelperFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_token_empty_output_is_error() {
        let provider = CommandToken::new("sh", &["-c", "echo '   '"]);
        assert!(matches!(
            provider.token().await,
            Err(CredentialError::EmptyToken)
        ));
    }

    #[tokio::test]
    async fn test_command_token_missing_program_is_spawn_error() {
        let provider = CommandToken::new("pr-sniper-no-such-helper", &[]);
        assert!(matches!(
            provider.token().await,
            Err(CredentialError::Spawn(_))
        ));
    }

    #[test]
    fn test_helper_failed_display_includes_stderr() {
        let err = CredentialError::HelperFailed {
            status: "exit status: 1".to_string(),
            stderr: "You are not logged into any GitHub hosts".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Credential helper exited with exit status: 1: You are not logged into any GitHub hosts"
        );
    }

    #[tokio::test]
    async fn test_provider_prefers_configured_token() {
        let config = crate::config::load_config_from(|key| match key {
            "OWNER" | "REPO" | "PR_BRANCH" | "PR_TITLE" | "PR_BODY" => Some("x".to_string()),
            "GITHUB_TOKEN" => Some("ghp_env".to_string()),
            _ => None,
        })
        .unwrap();

        let provider = provider_from_config(&config);
        assert_eq!(provider.token().await.unwrap(), "ghp_env");
    }
}
