//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use tracing::debug;

/// Environment variables checked for a token, in order
///
/// `GITHUB_TOKEN` is also what a GitHub Actions workflow exposes, so the
/// hosted-action and local cases share one path.
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
    /// Host the token is for (None for github.com)
    pub host: Option<String>,
}

/// Pick the first non-empty token from the known environment variables
///
/// `lookup` abstracts `std::env::var` so callers can supply their own
/// environment.
pub fn token_from_env<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    TOKEN_ENV_VARS.iter().find_map(|name| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Resolve a GitHub token
///
/// Tries `GITHUB_TOKEN`, then `GH_TOKEN`, then `gh auth token`.
pub async fn get_github_auth(host: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(token) = token_from_env(|name| std::env::var(name).ok()) {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
            host: host.map(ToString::to_string),
        });
    }

    let mut cmd = tokio::process::Command::new("gh");
    cmd.args(["auth", "token"]);
    if let Some(h) = host {
        cmd.args(["--hostname", h]);
    }

    debug!(host = ?host, "trying gh auth token");
    let output = cmd.output().await.map_err(|e| {
        Error::Auth(format!(
            "no GITHUB_TOKEN or GH_TOKEN set and failed to run 'gh auth token': {e}"
        ))
    })?;

    if output.status.success() {
        let token = String::from_utf8(output.stdout)
            .map_err(|e| Error::Auth(format!("invalid UTF-8 in gh auth token output: {e}")))?
            .trim()
            .to_string();
        if !token.is_empty() {
            debug!("using GitHub token from gh CLI");
            return Ok(GitHubAuthConfig {
                token,
                source: AuthSource::Cli,
                host: host.map(ToString::to_string),
            });
        }
    }

    Err(Error::Auth(
        "no GitHub token found. Set GITHUB_TOKEN or run 'gh auth login'".to_string(),
    ))
}
