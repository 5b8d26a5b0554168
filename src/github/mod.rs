pub mod client;
pub mod tracker;
pub mod types;

pub use tracker::{GitHubTracker, IssueTracker};
pub use types::{CreatedPullRequest, IssueSummary, NewPullRequest};
