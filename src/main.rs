//! lead-pr binary entry point

mod cli;

use clap::Parser;
use cli::{Args, CommandContext};
use lead_pr::queue::{Schedule, run_queue};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "lead_pr=debug,info" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.queue_config();
    let ctx = CommandContext::new(&config, args.host.clone()).await?;

    let schedule = if args.once {
        Schedule::Once
    } else {
        Schedule::Every(args.interval())
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    run_queue(&config, ctx.platform.as_ref(), schedule, shutdown).await?;
    Ok(())
}
