//! Command-line arguments

use clap::Parser;
use lead_pr::config::{DEFAULT_INTERVAL, QueueConfig, validate_identifier};
use std::time::Duration;

/// Keep the lead pull request up to date with its base and merge it when green
#[derive(Debug, Parser)]
#[command(name = "lead-pr", version, about)]
pub struct Args {
    /// Repository owner
    #[arg(long, env = "LEAD_PR_OWNER", value_parser = parse_owner)]
    pub owner: String,

    /// Repository name
    #[arg(long, env = "LEAD_PR_REPO", value_parser = parse_repo)]
    pub repo: String,

    /// Only queue pull requests opened by this login
    #[arg(long, env = "LEAD_PR_AUTHOR", value_parser = parse_author)]
    pub author: Option<String>,

    /// Squash-merge the lead pull request once it is current and checks allow
    #[arg(long, env = "LEAD_PR_AUTO_MERGE")]
    pub auto_merge: bool,

    /// Only merge when every check succeeded
    #[arg(long, env = "LEAD_PR_REQUIRE_ALL_CHECKS")]
    pub require_all_checks: bool,

    /// Seconds to wait after a cycle before starting the next
    #[arg(
        long,
        env = "LEAD_PR_INTERVAL",
        default_value_t = DEFAULT_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Decide what to do without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// GitHub Enterprise host (defaults to github.com)
    #[arg(long, env = "GH_HOST")]
    pub host: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Queue configuration captured from the arguments
    pub fn queue_config(&self) -> QueueConfig {
        QueueConfig {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            author: self.author.clone(),
            auto_merge: self.auto_merge,
            require_all_checks: self.require_all_checks,
            dry_run: self.dry_run,
        }
    }

    /// Delay between cycles
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}

fn parse_owner(value: &str) -> Result<String, String> {
    validate_identifier("owner", value).map_err(|e| e.to_string())
}

fn parse_repo(value: &str) -> Result<String, String> {
    validate_identifier("repo", value).map_err(|e| e.to_string())
}

fn parse_author(value: &str) -> Result<String, String> {
    validate_identifier("author", value).map_err(|e| e.to_string())
}
