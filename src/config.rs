//! Queue configuration
//!
//! Captured once at startup and passed explicitly into every cycle.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Delay between the end of one cycle and the start of the next
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5 * 60);

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("identifier pattern compiles"));

/// Check an owner, repo, or author value against the allowed pattern
///
/// Only lowercase ASCII letters, digits and hyphens are accepted.
pub fn validate_identifier(kind: &str, value: &str) -> Result<String> {
    if IDENTIFIER_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(Error::Config(format!(
            "{kind} '{value}' must contain only lowercase letters, digits and hyphens"
        )))
    }
}

/// What the queue selects and how far it may advance a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Only consider PRs opened by this login
    pub author: Option<String>,
    /// Merge the lead PR once it is current and green
    pub auto_merge: bool,
    /// Refuse to merge unless the check rollup is SUCCESS
    pub require_all_checks: bool,
    /// Decide but never mutate
    pub dry_run: bool,
}

impl QueueConfig {
    /// Create a config with every optional behaviour off
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            author: None,
            auto_merge: false,
            require_all_checks: false,
            dry_run: false,
        }
    }
}
