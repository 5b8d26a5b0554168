use serde::{Deserialize, Serialize};

/// An issue as returned by the list endpoint; only the fields the poller reads
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueSummary {
    pub number: u64,
    pub html_url: String,
}

/// Body of a create-pull-request call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
    pub draft: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedPullRequest {
    pub number: u64,
    pub html_url: String,
}

impl IssueSummary {
    /// Return a short reference in the format "#123"
    pub fn short_ref(&self) -> String {
        format!("#{}", self.number)
    }
}
