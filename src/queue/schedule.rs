//! Fixed-delay scheduler driving the queue cycle

use crate::config::QueueConfig;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::queue::cycle::{CycleOutcome, run_cycle};
use std::time::Duration;
use tracing::{error, info};

/// How often the queue runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// A single cycle, then exit
    Once,
    /// Forever, sleeping this long after each cycle completes
    Every(Duration),
}

/// Run one cycle and log its outcome
async fn run_and_report(
    config: &QueueConfig,
    platform: &dyn PlatformService,
) -> Result<CycleOutcome> {
    let result = run_cycle(config, platform).await;
    match &result {
        Ok(outcome) => info!(pr = ?outcome.pr_number(), "{outcome}"),
        Err(e) => error!(error = %e, "cycle failed"),
    }
    result
}

/// Drive the queue according to `schedule`
///
/// With [`Schedule::Every`] the next cycle starts `interval` after the
/// previous one finished, whatever its result. `shutdown` is only polled
/// while sleeping between cycles, so a running cycle always completes.
/// With [`Schedule::Once`] the cycle's error is returned and `shutdown` is
/// ignored.
pub async fn run_queue(
    config: &QueueConfig,
    platform: &dyn PlatformService,
    schedule: Schedule,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let interval = match schedule {
        Schedule::Once => return run_and_report(config, platform).await.map(|_| ()),
        Schedule::Every(interval) => interval,
    };

    let target = platform.config();
    info!(
        owner = %target.owner,
        repo = %target.repo,
        host = target.host.as_deref().unwrap_or("github.com"),
        author = ?config.author,
        auto_merge = config.auto_merge,
        interval_secs = interval.as_secs(),
        "starting queue"
    );

    tokio::pin!(shutdown);
    loop {
        // Failed cycles are already logged; the next one runs regardless.
        let _ = run_and_report(config, platform).await;

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            () = &mut shutdown => {
                info!("shutting down");
                return Ok(());
            }
        }
    }
}
