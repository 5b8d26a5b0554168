pub mod config;
pub mod credentials;
pub mod github;
pub mod logging;
pub mod notify;
pub mod poll;
