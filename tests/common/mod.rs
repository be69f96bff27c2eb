//! Shared test helpers

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::MockPlatformService;

use lead_pr::types::{
    CheckState, ComparisonResult, ComparisonStatus, PlatformConfig, PullRequestSummary,
    ReviewDecision,
};

/// Platform config for `test-owner/test-repo` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "test-owner".to_string(),
        repo: "test-repo".to_string(),
        host: None,
    }
}

/// Mock platform using [`github_config`]
pub fn mock_platform() -> MockPlatformService {
    MockPlatformService::with_config(github_config())
}

/// An open PR with no review decision, no author and no checks
pub fn make_pr(number: u64) -> PullRequestSummary {
    PullRequestSummary {
        id: format!("PR_node_{number}"),
        number,
        title: format!("Change {number}"),
        url: format!("https://github.com/test-owner/test-repo/pull/{number}"),
        author: None,
        head_ref: format!("feat-{number}"),
        head_oid: format!("sha{number}"),
        head_owner: Some("test-owner".to_string()),
        base_ref: "main".to_string(),
        is_draft: false,
        review_decision: None,
        check_state: None,
    }
}

/// An approved PR by `author` with the given check rollup
pub fn make_approved_pr(
    number: u64,
    author: Option<&str>,
    check_state: Option<CheckState>,
) -> PullRequestSummary {
    PullRequestSummary {
        author: author.map(ToString::to_string),
        review_decision: Some(ReviewDecision::Approved),
        check_state,
        ..make_pr(number)
    }
}

/// Comparison with the given behind count and one commit ahead
pub fn behind_by(count: u64) -> ComparisonResult {
    ComparisonResult {
        behind_by: count,
        ahead_by: 1,
        status: if count > 0 {
            ComparisonStatus::Diverged
        } else {
            ComparisonStatus::Ahead
        },
    }
}
