//! Platform services for the hosting platform
//!
//! The queue only ever talks to the platform through [`PlatformService`],
//! so cycles can run against GitHub or a test double alike.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{ComparisonResult, MergeMethod, PlatformConfig, PullRequestSummary, UpdateMethod};
use async_trait::async_trait;

/// Platform service trait for the four operations a cycle needs
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List every open PR in the repository
    ///
    /// Implementations must drain all pages before returning. A failure on
    /// any page fails the whole call; partial results are never returned.
    async fn list_open_prs(&self) -> Result<Vec<PullRequestSummary>>;

    /// Compare `head` against `base`
    ///
    /// Returns `Ok(None)` when the platform cannot produce a comparison
    /// (unknown branch, deleted fork, ...).
    async fn compare_branches(&self, base: &str, head: &str) -> Result<Option<ComparisonResult>>;

    /// Bring a PR's head branch up to date with its base
    async fn update_branch(&self, pr_id: &str, method: UpdateMethod) -> Result<()>;

    /// Merge a PR with the specified method
    ///
    /// `commit_headline` becomes the title of the resulting commit.
    async fn merge_pr(&self, pr_id: &str, method: MergeMethod, commit_headline: &str)
    -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
