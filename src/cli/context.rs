//! Shared command context for the CLI
//!
//! Credential strategy lives here, outside the queue core: the core only
//! ever sees an already-authenticated `PlatformService`.

use lead_pr::auth::get_github_auth;
use lead_pr::config::QueueConfig;
use lead_pr::error::Result;
use lead_pr::platform::{GitHubService, PlatformService};
use tracing::info;

/// Everything a run of the queue needs besides its config
pub struct CommandContext {
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
}

impl CommandContext {
    /// Resolve credentials and build the GitHub service
    pub async fn new(config: &QueueConfig, host: Option<String>) -> Result<Self> {
        let auth = get_github_auth(host.as_deref()).await?;
        info!(source = %auth.source, "authenticated");

        let platform = GitHubService::new(
            &auth.token,
            config.owner.clone(),
            config.repo.clone(),
            auth.host,
        )?;

        Ok(Self {
            platform: Box::new(platform),
        })
    }
}
