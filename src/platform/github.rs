//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{
    CheckState, ComparisonResult, ComparisonStatus, MergeMethod, PlatformConfig,
    PullRequestSummary, ReviewDecision, UpdateMethod,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Largest page GitHub's GraphQL API allows
const PAGE_SIZE: u32 = 100;

const OPEN_PULL_REQUESTS_QUERY: &str = r"
    query OpenPullRequests($owner: String!, $repo: String!, $first: Int!, $after: String) {
        repository(owner: $owner, name: $repo) {
            pullRequests(states: OPEN, first: $first, after: $after) {
                pageInfo {
                    hasNextPage
                    endCursor
                }
                nodes {
                    id
                    number
                    title
                    url
                    isDraft
                    author { login }
                    headRefName
                    headRefOid
                    headRepositoryOwner { login }
                    baseRefName
                    reviewDecision
                    commits(last: 1) {
                        nodes {
                            commit {
                                statusCheckRollup { state }
                            }
                        }
                    }
                }
            }
        }
    }
";

const UPDATE_BRANCH_MUTATION: &str = r"
    mutation UpdatePullRequestBranch($pullRequestId: ID!, $updateMethod: PullRequestBranchUpdateMethod) {
        updatePullRequestBranch(input: { pullRequestId: $pullRequestId, updateMethod: $updateMethod }) {
            pullRequest { number }
        }
    }
";

const MERGE_MUTATION: &str = r"
    mutation MergePullRequest($pullRequestId: ID!, $mergeMethod: PullRequestMergeMethod, $commitHeadline: String) {
        mergePullRequest(input: { pullRequestId: $pullRequestId, mergeMethod: $mergeMethod, commitHeadline: $commitHeadline }) {
            pullRequest { number merged }
        }
    }
";

// GraphQL response types

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct OpenPullRequestsData {
    repository: Option<RepositoryNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    pull_requests: PullRequestConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestConnection {
    page_info: PageInfo,
    nodes: Vec<Option<GraphQlPullRequest>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlPullRequest {
    id: String,
    number: u64,
    title: String,
    url: String,
    is_draft: bool,
    author: Option<GraphQlActor>,
    head_ref_name: String,
    head_ref_oid: String,
    head_repository_owner: Option<GraphQlActor>,
    base_ref_name: String,
    review_decision: Option<String>,
    commits: CommitConnection,
}

#[derive(Deserialize)]
struct GraphQlActor {
    login: String,
}

#[derive(Deserialize)]
struct CommitConnection {
    nodes: Vec<Option<CommitNode>>,
}

#[derive(Deserialize)]
struct CommitNode {
    commit: GraphQlCommit,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlCommit {
    status_check_rollup: Option<StatusCheckRollup>,
}

#[derive(Deserialize)]
struct StatusCheckRollup {
    state: String,
}

impl From<GraphQlPullRequest> for PullRequestSummary {
    fn from(pr: GraphQlPullRequest) -> Self {
        let check_state = pr
            .commits
            .nodes
            .into_iter()
            .flatten()
            .last()
            .and_then(|node| node.commit.status_check_rollup)
            .map(|rollup| CheckState::from_graphql(&rollup.state));

        Self {
            id: pr.id,
            number: pr.number,
            title: pr.title,
            url: pr.url,
            author: pr.author.map(|a| a.login),
            head_ref: pr.head_ref_name,
            head_oid: pr.head_ref_oid,
            head_owner: pr.head_repository_owner.map(|o| o.login),
            base_ref: pr.base_ref_name,
            is_draft: pr.is_draft,
            review_decision: pr.review_decision.as_deref().map(ReviewDecision::from_graphql),
            check_state,
        }
    }
}

/// Percent-encode a compare ref for use in a URL path
///
/// Each `/`-separated segment is encoded on its own so nested branch names
/// keep their slashes. The `:` after a fork owner stays literal;
/// git forbids `:` in ref names, so it can only be the owner separator.
fn encode_ref(reference: &str) -> String {
    let (owner, branch) = match reference.split_once(':') {
        Some((owner, branch)) => (Some(owner), branch),
        None => (None, reference),
    };
    let branch = branch
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    match owner {
        Some(owner) => format!("{}:{branch}", urlencoding::encode(owner)),
        None => branch,
    }
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (branch comparison)
    token: String,
    /// HTTP client for raw requests (branch comparison)
    http_client: Client,
    /// REST API base URL, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        // GitHub Enterprise serves GraphQL at /api/graphql and REST under /api/v3
        let (graphql_base, rest_base) = host.as_ref().map_or_else(
            || {
                let base = "https://api.github.com".to_string();
                (base.clone(), base)
            },
            |h| (format!("https://{h}/api"), format!("https://{h}/api/v3")),
        );
        Self::build(token, &graphql_base, &rest_base, owner, repo, host)
    }

    /// Create a service talking to an explicit API base URL
    ///
    /// Both GraphQL and REST requests are sent relative to `api_base`.
    pub fn with_api_base(token: &str, api_base: &str, owner: String, repo: String) -> Result<Self> {
        Self::build(token, api_base, api_base, owner, repo, None)
    }

    fn build(
        token: &str,
        graphql_base: &str,
        rest_base: &str,
        owner: String,
        repo: String,
        host: Option<String>,
    ) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(graphql_base.trim_end_matches('/'))
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("lead-pr")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: PlatformConfig { owner, repo, host },
            token: token.to_string(),
            http_client,
            api_base: rest_base.trim_end_matches('/').to_string(),
        })
    }

    /// Run a GraphQL document and unwrap its `data`, surfacing `errors`
    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let response: GraphQlResponse<T> = self
            .client
            .graphql(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .await?;

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(Error::GitHubApi(format!(
                "GraphQL error: {}",
                messages.join(", ")
            )));
        }

        response
            .data
            .ok_or_else(|| Error::GitHubApi("No data in GraphQL response".to_string()))
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequestSummary>> {
        debug!(owner = %self.config.owner, repo = %self.config.repo, "listing open PRs");

        let mut prs = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0_u32;

        loop {
            let data: OpenPullRequestsData = self
                .graphql(
                    OPEN_PULL_REQUESTS_QUERY,
                    serde_json::json!({
                        "owner": self.config.owner,
                        "repo": self.config.repo,
                        "first": PAGE_SIZE,
                        "after": cursor,
                    }),
                )
                .await?;

            let repository = data.repository.ok_or_else(|| {
                Error::GitHubApi(format!(
                    "repository {}/{} not found",
                    self.config.owner, self.config.repo
                ))
            })?;

            let connection = repository.pull_requests;
            pages += 1;
            prs.extend(
                connection
                    .nodes
                    .into_iter()
                    .flatten()
                    .map(PullRequestSummary::from),
            );

            match connection.page_info {
                PageInfo {
                    has_next_page: true,
                    end_cursor: Some(next),
                } => cursor = Some(next),
                PageInfo {
                    has_next_page: true,
                    end_cursor: None,
                } => {
                    return Err(Error::GitHubApi(
                        "pagination reported another page without a cursor".to_string(),
                    ));
                }
                PageInfo {
                    has_next_page: false,
                    ..
                } => break,
            }
        }

        debug!(count = prs.len(), pages, "listed open PRs");
        Ok(prs)
    }

    async fn compare_branches(&self, base: &str, head: &str) -> Result<Option<ComparisonResult>> {
        #[derive(Deserialize)]
        struct Comparison {
            status: String,
            ahead_by: u64,
            behind_by: u64,
        }

        debug!(base, head, "comparing branches");

        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}",
            self.api_base,
            self.config.owner,
            self.config.repo,
            encode_ref(base),
            encode_ref(head)
        );

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(
                status = %response.status(),
                "Compare returned non-success, treating comparison as unavailable"
            );
            return Ok(None);
        }

        let comparison: Comparison = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse comparison: {e}")))?;

        let result = ComparisonResult {
            behind_by: comparison.behind_by,
            ahead_by: comparison.ahead_by,
            status: ComparisonStatus::from_api(&comparison.status),
        };
        debug!(
            behind_by = result.behind_by,
            ahead_by = result.ahead_by,
            status = %result.status,
            "compared branches"
        );
        Ok(Some(result))
    }

    async fn update_branch(&self, pr_id: &str, method: UpdateMethod) -> Result<()> {
        debug!(pr_id, %method, "updating PR branch");

        let _: serde_json::Value = self
            .graphql(
                UPDATE_BRANCH_MUTATION,
                serde_json::json!({
                    "pullRequestId": pr_id,
                    "updateMethod": method.as_graphql(),
                }),
            )
            .await?;

        debug!(pr_id, "update requested");
        Ok(())
    }

    async fn merge_pr(
        &self,
        pr_id: &str,
        method: MergeMethod,
        commit_headline: &str,
    ) -> Result<()> {
        debug!(pr_id, %method, "merging PR");

        let _: serde_json::Value = self
            .graphql(
                MERGE_MUTATION,
                serde_json::json!({
                    "pullRequestId": pr_id,
                    "mergeMethod": method.as_graphql(),
                    "commitHeadline": commit_headline,
                }),
            )
            .await?;

        debug!(pr_id, "merge requested");
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
