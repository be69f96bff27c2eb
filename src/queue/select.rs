//! Candidate selection - pure function over the open PR set

use crate::types::PullRequestSummary;

/// Whether a PR may lead the queue
///
/// Requires an `APPROVED` review decision and, when `author` is set, an
/// exact (case-sensitive) author match. PRs with no reported author never
/// match a filter.
pub fn is_eligible(pr: &PullRequestSummary, author: Option<&str>) -> bool {
    if !pr.is_approved() {
        return false;
    }
    match author {
        Some(required) => pr.author.as_deref() == Some(required),
        None => true,
    }
}

/// Pick the lead PR (PURE - no I/O)
///
/// Scans the whole slice and returns the eligible PR with the lowest number,
/// so the result does not depend on the order GitHub returned them in.
pub fn select_candidate<'a>(
    prs: &'a [PullRequestSummary],
    author: Option<&str>,
) -> Option<&'a PullRequestSummary> {
    prs.iter()
        .filter(|pr| is_eligible(pr, author))
        .min_by_key(|pr| pr.number)
}
