//! Core types for lead-pr

use serde::{Deserialize, Serialize};

/// Aggregate review state GitHub computes for a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewDecision {
    /// All required reviewers approved, no outstanding change requests
    Approved,
    /// A reviewer requested changes
    ChangesRequested,
    /// Review is required but has not happened yet
    ReviewRequired,
    /// Any value this crate does not know about
    Other(String),
}

impl ReviewDecision {
    /// Map GitHub's `PullRequestReviewDecision` enum value
    pub fn from_graphql(value: &str) -> Self {
        match value {
            "APPROVED" => Self::Approved,
            "CHANGES_REQUESTED" => Self::ChangesRequested,
            "REVIEW_REQUIRED" => Self::ReviewRequired,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Rolled-up status of every check attached to the head commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckState {
    /// Every check passed
    Success,
    /// At least one check is still running
    Pending,
    /// At least one check failed
    Failure,
    /// At least one check errored
    Error,
    /// A required status has not been reported yet
    Expected,
    /// Any value this crate does not know about
    Other(String),
}

impl CheckState {
    /// Map GitHub's `StatusState` enum value
    pub fn from_graphql(value: &str) -> Self {
        match value {
            "SUCCESS" => Self::Success,
            "PENDING" => Self::Pending,
            "FAILURE" => Self::Failure,
            "ERROR" => Self::Error,
            "EXPECTED" => Self::Expected,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether checks are still in flight
    ///
    /// Only `PENDING` counts. `EXPECTED` is treated like any other
    /// non-success state and only holds a merge back when every check is
    /// required to pass.
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for CheckState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Pending => write!(f, "pending"),
            Self::Failure => write!(f, "failure"),
            Self::Error => write!(f, "error"),
            Self::Expected => write!(f, "expected"),
            Self::Other(s) => write!(f, "{}", s.to_lowercase()),
        }
    }
}

/// One open pull request as reported at evaluation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// GraphQL node ID (used for mutations)
    pub id: String,
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Web URL for the PR
    pub url: String,
    /// Author login, when GitHub reports one (deleted users have none)
    pub author: Option<String>,
    /// Head branch name
    pub head_ref: String,
    /// Head commit SHA
    pub head_oid: String,
    /// Owner of the head repository, absent when the fork was deleted
    pub head_owner: Option<String>,
    /// Base branch name
    pub base_ref: String,
    /// Whether PR is a draft
    pub is_draft: bool,
    /// Review decision, absent when the repo has no review requirements
    pub review_decision: Option<ReviewDecision>,
    /// Check rollup of the head commit, absent when nothing reported
    pub check_state: Option<CheckState>,
}

impl PullRequestSummary {
    /// Whether reviewers approved this PR
    pub fn is_approved(&self) -> bool {
        self.review_decision == Some(ReviewDecision::Approved)
    }

    /// Head ref to compare against the base inside `base_owner`'s repository
    ///
    /// Heads living in a fork are qualified as `owner:branch`, otherwise a
    /// fork branch sharing a name with a base branch would be compared
    /// against the wrong commits.
    pub fn compare_head(&self, base_owner: &str) -> String {
        match self.head_owner {
            Some(ref owner) if !owner.eq_ignore_ascii_case(base_owner) => {
                format!("{owner}:{}", self.head_ref)
            }
            _ => self.head_ref.clone(),
        }
    }
}

/// How the head branch relates to its base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonStatus {
    /// Same commit
    Identical,
    /// Head has extra commits, nothing missing
    Ahead,
    /// Head is missing base commits, nothing extra
    Behind,
    /// Both sides have commits the other lacks
    Diverged,
    /// Unrecognized status
    Unknown,
}

impl ComparisonStatus {
    /// Map the REST compare API `status` field
    pub fn from_api(value: &str) -> Self {
        match value {
            "identical" => Self::Identical,
            "ahead" => Self::Ahead,
            "behind" => Self::Behind,
            "diverged" => Self::Diverged,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identical => write!(f, "identical"),
            Self::Ahead => write!(f, "ahead"),
            Self::Behind => write!(f, "behind"),
            Self::Diverged => write!(f, "diverged"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of comparing a head branch against its base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Commits on base not yet in head
    pub behind_by: u64,
    /// Commits on head not yet in base
    pub ahead_by: u64,
    /// Overall relationship
    pub status: ComparisonStatus,
}

impl ComparisonResult {
    /// Whether the head branch needs an update from base
    pub const fn is_behind(&self) -> bool {
        self.behind_by > 0
    }
}

/// Platform configuration
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Squash all commits into one
    Squash,
}

impl MergeMethod {
    /// GraphQL `PullRequestMergeMethod` value
    pub const fn as_graphql(self) -> &'static str {
        match self {
            Self::Squash => "SQUASH",
        }
    }
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
        }
    }
}

/// How a head branch is brought up to date with its base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMethod {
    /// Merge base into head
    Merge,
}

impl UpdateMethod {
    /// GraphQL `PullRequestBranchUpdateMethod` value
    pub const fn as_graphql(self) -> &'static str {
        match self {
            Self::Merge => "MERGE",
        }
    }
}

impl std::fmt::Display for UpdateMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
        }
    }
}
