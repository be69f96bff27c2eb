//! One queue cycle - effectful orchestration
//!
//! Fetches remote state, runs the pure selector and decider, and performs at
//! most one mutation through the platform API.

use crate::config::QueueConfig;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::queue::decide::{Decision, DecisionOptions, decide};
use crate::queue::select::select_candidate;
use crate::types::{CheckState, MergeMethod, PullRequestSummary, UpdateMethod};
use tracing::{debug, error, info, warn};

/// What a single cycle ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No open PRs, or they could not be fetched
    NoPullRequests,
    /// Open PRs exist but none qualifies
    NoCandidate,
    /// Comparison for the lead PR could not be obtained
    ComparisonUnavailable {
        /// Lead PR number
        number: u64,
    },
    /// Branch update was requested
    UpdateRequested {
        /// Lead PR number
        number: u64,
    },
    /// Auto-merge is off, nothing done
    NoAction {
        /// Lead PR number
        number: u64,
    },
    /// Checks are still running
    WaitingOnChecks {
        /// Lead PR number
        number: u64,
    },
    /// All checks are required and the rollup is not SUCCESS
    WaitingChecksNotSuccessful {
        /// Lead PR number
        number: u64,
        /// Rollup state at decision time
        state: Option<CheckState>,
    },
    /// Merge was requested and accepted
    MergeRequested {
        /// Lead PR number
        number: u64,
    },
    /// GitHub rejected the merge
    MergeFailed {
        /// Lead PR number
        number: u64,
        /// Error reported by the platform
        message: String,
    },
    /// Dry run: decision made, nothing sent
    DryRun {
        /// Lead PR number
        number: u64,
        /// What would have been done
        decision: Decision,
    },
}

impl CycleOutcome {
    /// Lead PR number, when one was selected
    pub const fn pr_number(&self) -> Option<u64> {
        match self {
            Self::NoPullRequests | Self::NoCandidate => None,
            Self::ComparisonUnavailable { number }
            | Self::UpdateRequested { number }
            | Self::NoAction { number }
            | Self::WaitingOnChecks { number }
            | Self::WaitingChecksNotSuccessful { number, .. }
            | Self::MergeRequested { number }
            | Self::MergeFailed { number, .. }
            | Self::DryRun { number, .. } => Some(*number),
        }
    }
}

impl std::fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPullRequests => write!(f, "no open pull requests"),
            Self::NoCandidate => write!(f, "no eligible pull request"),
            Self::ComparisonUnavailable { number } => {
                write!(f, "PR #{number}: comparison unavailable")
            }
            Self::UpdateRequested { number } => write!(f, "PR #{number}: branch update requested"),
            Self::NoAction { number } => write!(f, "PR #{number}: up to date, auto-merge off"),
            Self::WaitingOnChecks { number } => write!(f, "PR #{number}: waiting on checks"),
            Self::WaitingChecksNotSuccessful { number, state } => match state {
                Some(state) => write!(f, "PR #{number}: waiting, checks are {state}"),
                None => write!(f, "PR #{number}: waiting, no checks reported"),
            },
            Self::MergeRequested { number } => write!(f, "PR #{number}: merge requested"),
            Self::MergeFailed { number, message } => {
                write!(f, "PR #{number}: merge failed: {message}")
            }
            Self::DryRun { number, decision } => {
                write!(f, "PR #{number}: would {decision} (dry run)")
            }
        }
    }
}

/// Commit headline used for the squash merge
pub fn squash_headline(pr: &PullRequestSummary) -> String {
    format!("{} (#{})", pr.title, pr.number)
}

/// Run one queue cycle (EFFECTFUL)
///
/// Every soft failure (fetch error, no candidate, comparison unavailable,
/// merge rejection) is logged and reported as an outcome. Only a failed
/// branch update is returned as `Err`, for the caller's per-cycle boundary.
pub async fn run_cycle(
    config: &QueueConfig,
    platform: &dyn PlatformService,
) -> Result<CycleOutcome> {
    let prs = match platform.list_open_prs().await {
        Ok(prs) => prs,
        Err(e) => {
            warn!(error = %e, "failed to fetch open pull requests");
            return Ok(CycleOutcome::NoPullRequests);
        }
    };

    if prs.is_empty() {
        info!("no open pull requests");
        return Ok(CycleOutcome::NoPullRequests);
    }
    debug!(count = prs.len(), "fetched open pull requests");

    let Some(pr) = select_candidate(&prs, config.author.as_deref()) else {
        match config.author {
            Some(ref author) => info!(author = %author, "no approved pull request by author"),
            None => info!("no approved pull request"),
        }
        return Ok(CycleOutcome::NoCandidate);
    };
    info!(number = pr.number, title = %pr.title, url = %pr.url, "selected lead pull request");

    let head = pr.compare_head(&config.owner);
    let comparison = match platform.compare_branches(&pr.base_ref, &head).await {
        Ok(Some(comparison)) => comparison,
        Ok(None) => {
            error!(
                number = pr.number,
                base = %pr.base_ref,
                head = %head,
                "branch comparison unavailable"
            );
            return Ok(CycleOutcome::ComparisonUnavailable { number: pr.number });
        }
        Err(e) => {
            error!(number = pr.number, error = %e, "branch comparison failed");
            return Ok(CycleOutcome::ComparisonUnavailable { number: pr.number });
        }
    };

    let decision = decide(&comparison, pr, &DecisionOptions::from(config));
    debug!(
        number = pr.number,
        behind_by = comparison.behind_by,
        ahead_by = comparison.ahead_by,
        status = %comparison.status,
        check_state = ?pr.check_state,
        %decision,
        "decided"
    );

    if config.dry_run {
        return Ok(CycleOutcome::DryRun {
            number: pr.number,
            decision,
        });
    }

    let number = pr.number;
    let outcome = match decision {
        Decision::UpdateBranch => {
            info!(number, behind_by = comparison.behind_by, "updating branch from base");
            platform.update_branch(&pr.id, UpdateMethod::Merge).await?;
            CycleOutcome::UpdateRequested { number }
        }
        Decision::NoOp => CycleOutcome::NoAction { number },
        Decision::Wait => CycleOutcome::WaitingOnChecks { number },
        Decision::WaitChecksNotSuccessful { state } => {
            CycleOutcome::WaitingChecksNotSuccessful { number, state }
        }
        Decision::Merge => {
            info!(number, "merging");
            match platform
                .merge_pr(&pr.id, MergeMethod::Squash, &squash_headline(pr))
                .await
            {
                Ok(()) => CycleOutcome::MergeRequested { number },
                Err(e) => {
                    warn!(number, error = %e, "merge rejected");
                    CycleOutcome::MergeFailed {
                        number,
                        message: e.to_string(),
                    }
                }
            }
        }
    };

    Ok(outcome)
}
