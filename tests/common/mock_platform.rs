//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use lead_pr::error::{Error, Result};
use lead_pr::platform::PlatformService;
use lead_pr::types::{
    ComparisonResult, MergeMethod, PlatformConfig, PullRequestSummary, UpdateMethod,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Call record for `compare_branches`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareCall {
    pub base: String,
    pub head: String,
}

/// Call record for `update_branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBranchCall {
    pub pr_id: String,
    pub method: UpdateMethod,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_id: String,
    pub method: MergeMethod,
    pub commit_headline: String,
}

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall,
/// so responses and recorded calls stay plain data.
///
/// Features:
/// - Configurable open PR list, per-head-branch comparisons and list latency
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    open_prs: Mutex<Vec<PullRequestSummary>>,
    compare_responses: Mutex<HashMap<String, ComparisonResult>>,
    list_delay: Mutex<Option<Duration>>,
    // Call tracking
    list_calls: Mutex<Vec<Instant>>,
    compare_calls: Mutex<Vec<CompareCall>>,
    update_branch_calls: Mutex<Vec<UpdateBranchCall>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_compare: Mutex<Option<String>>,
    error_on_update_branch: Mutex<Option<String>>,
    error_on_merge_pr: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            open_prs: Mutex::new(Vec::new()),
            compare_responses: Mutex::new(HashMap::new()),
            list_delay: Mutex::new(None),
            list_calls: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
            update_branch_calls: Mutex::new(Vec::new()),
            merge_pr_calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_compare: Mutex::new(None),
            error_on_update_branch: Mutex::new(None),
            error_on_merge_pr: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `list_open_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `compare_branches` return an error
    pub fn fail_compare(&self, msg: &str) {
        *self.error_on_compare.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_branch` return an error
    pub fn fail_update_branch(&self, msg: &str) {
        *self.error_on_update_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pr` return an error
    pub fn fail_merge_pr(&self, msg: &str) {
        *self.error_on_merge_pr.lock().unwrap() = Some(msg.to_string());
    }

    // === Response configuration ===

    /// Set the PRs returned by `list_open_prs`
    pub fn set_open_prs(&self, prs: Vec<PullRequestSummary>) {
        *self.open_prs.lock().unwrap() = prs;
    }

    /// Set the comparison returned for a head branch
    pub fn set_comparison(&self, head: &str, comparison: ComparisonResult) {
        self.compare_responses
            .lock()
            .unwrap()
            .insert(head.to_string(), comparison);
    }

    /// Make every `list_open_prs` call take `delay` before answering
    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock().unwrap() = Some(delay);
    }

    // === Call verification methods ===

    /// Number of `list_open_prs` calls
    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    /// When each `list_open_prs` call started, on the tokio clock
    pub fn list_call_times(&self) -> Vec<Instant> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Get all `compare_branches` calls
    pub fn get_compare_calls(&self) -> Vec<CompareCall> {
        self.compare_calls.lock().unwrap().clone()
    }

    /// Get all `update_branch` calls
    pub fn get_update_branch_calls(&self) -> Vec<UpdateBranchCall> {
        self.update_branch_calls.lock().unwrap().clone()
    }

    /// Get all `merge_pr` calls
    pub fn get_merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Get count of `update_branch` calls
    pub fn update_call_count(&self) -> usize {
        self.update_branch_calls.lock().unwrap().len()
    }

    /// Get count of `merge_pr` calls
    pub fn merge_call_count(&self) -> usize {
        self.merge_pr_calls.lock().unwrap().len()
    }

    /// Assert that no mutation was issued
    pub fn assert_no_mutations(&self) {
        let updates = self.get_update_branch_calls();
        let merges = self.get_merge_pr_calls();
        assert!(
            updates.is_empty() && merges.is_empty(),
            "Expected no mutations but got updates: {updates:?}, merges: {merges:?}"
        );
    }

    /// Assert that `update_branch` was called for a specific PR
    pub fn assert_update_called(&self, pr_id: &str) {
        let calls = self.get_update_branch_calls();
        assert!(
            calls.iter().any(|c| c.pr_id == pr_id),
            "Expected update_branch({pr_id}) but got: {calls:?}"
        );
    }

    /// Assert that `merge_pr` was called for a specific PR
    pub fn assert_merge_called(&self, pr_id: &str) {
        let calls = self.get_merge_pr_calls();
        assert!(
            calls.iter().any(|c| c.pr_id == pr_id),
            "Expected merge_pr({pr_id}) but got: {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequestSummary>> {
        self.list_calls.lock().unwrap().push(Instant::now());

        let delay = *self.list_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(msg) = self.error_on_list.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn compare_branches(&self, base: &str, head: &str) -> Result<Option<ComparisonResult>> {
        self.compare_calls.lock().unwrap().push(CompareCall {
            base: base.to_string(),
            head: head.to_string(),
        });

        if let Some(msg) = self.error_on_compare.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        // Unconfigured branches behave like a comparison GitHub can't produce
        Ok(self.compare_responses.lock().unwrap().get(head).copied())
    }

    async fn update_branch(&self, pr_id: &str, method: UpdateMethod) -> Result<()> {
        self.update_branch_calls
            .lock()
            .unwrap()
            .push(UpdateBranchCall {
                pr_id: pr_id.to_string(),
                method,
            });

        if let Some(msg) = self.error_on_update_branch.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(())
    }

    async fn merge_pr(
        &self,
        pr_id: &str,
        method: MergeMethod,
        commit_headline: &str,
    ) -> Result<()> {
        self.merge_pr_calls.lock().unwrap().push(MergePrCall {
            pr_id: pr_id.to_string(),
            method,
            commit_headline: commit_headline.to_string(),
        });

        if let Some(msg) = self.error_on_merge_pr.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
