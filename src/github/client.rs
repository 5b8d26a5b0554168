use anyhow::{Context, Result};
use octocrab::Octocrab;

/// Create an authenticated GitHub client using a personal access token
///
/// `base_uri` overrides the API root (GitHub Enterprise, mock servers).
pub fn create_client(token: &str, base_uri: Option<&str>) -> Result<Octocrab> {
    let mut builder = Octocrab::builder().personal_token(token.to_string());

    if let Some(uri) = base_uri {
        builder = builder
            .base_uri(uri)
            .with_context(|| format!("Invalid GitHub API base URI: {}", uri))?;
    }

    builder.build().context("Failed to create GitHub client")
}
