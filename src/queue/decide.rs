//! Advancement decision - pure function over comparison and check state
//!
//! No I/O happens here. The cycle gathers the comparison and PR snapshot,
//! and this module decides the one action to take.

use crate::config::QueueConfig;
use crate::types::{CheckState, ComparisonResult, PullRequestSummary};

/// Knobs that influence the decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionOptions {
    /// Merge once the PR is current and checks allow it
    pub auto_merge: bool,
    /// Only merge when the check rollup is exactly SUCCESS
    pub require_all_checks: bool,
}

impl From<&QueueConfig> for DecisionOptions {
    fn from(config: &QueueConfig) -> Self {
        Self {
            auto_merge: config.auto_merge,
            require_all_checks: config.require_all_checks,
        }
    }
}

/// The single action a cycle takes for the lead PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Head is behind base; bring it up to date
    UpdateBranch,
    /// Auto-merge is off; report and leave it alone
    NoOp,
    /// Checks are still running
    Wait,
    /// All checks must pass and they have not
    WaitChecksNotSuccessful {
        /// Rollup state at decision time (None when nothing reported)
        state: Option<CheckState>,
    },
    /// Squash-merge the PR
    Merge,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpdateBranch => write!(f, "update branch"),
            Self::NoOp => write!(f, "no action"),
            Self::Wait => write!(f, "wait for checks"),
            Self::WaitChecksNotSuccessful { state: Some(state) } => {
                write!(f, "wait, checks are {state}")
            }
            Self::WaitChecksNotSuccessful { state: None } => {
                write!(f, "wait, no checks reported")
            }
            Self::Merge => write!(f, "merge"),
        }
    }
}

/// Decide what to do with the lead PR (PURE - no I/O, easily testable)
///
/// Rules are evaluated top to bottom, first match wins:
/// 1. behind base: update, whatever the checks say
/// 2. auto-merge disabled: nothing
/// 3. checks pending: wait
/// 4. all checks required and rollup not SUCCESS: wait
/// 5. merge
///
/// Updating always comes first so a stale branch is never merged.
pub fn decide(
    comparison: &ComparisonResult,
    pr: &PullRequestSummary,
    options: &DecisionOptions,
) -> Decision {
    if comparison.is_behind() {
        return Decision::UpdateBranch;
    }

    if !options.auto_merge {
        return Decision::NoOp;
    }

    if pr.check_state.as_ref().is_some_and(CheckState::is_pending) {
        return Decision::Wait;
    }

    if options.require_all_checks && pr.check_state != Some(CheckState::Success) {
        return Decision::WaitChecksNotSuccessful {
            state: pr.check_state.clone(),
        };
    }

    Decision::Merge
}
