//! Error types for lead-pr

use thiserror::Error;

/// Errors raised by the queue agent
#[derive(Debug, Error)]
pub enum Error {
    /// No usable credentials could be found
    #[error("authentication failed: {0}")]
    Auth(String),

    /// GitHub rejected a request or returned something unusable
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Failure reported by a `PlatformService` implementation other than GitHub's
    #[error("platform error: {0}")]
    Platform(String),

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Transport error from the raw HTTP client
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error surfaced by octocrab
    #[error("GitHub client error: {0}")]
    Octocrab(#[from] octocrab::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
