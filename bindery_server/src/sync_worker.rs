//! The scheduled trigger for the reconciliation pipeline: one pass on startup, then one at the top of every hour.
use chrono::{DateTime, Timelike, Utc};
use log::*;
use tokio::task::JoinHandle;

use crate::sync::{SyncError, SyncRunner};

/// Starts the reconciliation worker. Do not await the returned JoinHandle, as it will run indefinitely.
pub fn start_sync_worker(runner: SyncRunner) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("🕰️ Reconciliation worker started. Passes run at startup and at the top of every hour.");
        run_and_log(&runner).await;
        loop {
            let wait = delay_until_next_hour(Utc::now());
            debug!("🕰️ Next scheduled pass in {}s", wait.as_secs());
            tokio::time::sleep(wait).await;
            run_and_log(&runner).await;
        }
    })
}

async fn run_and_log(runner: &SyncRunner) {
    match runner.run_once().await {
        Ok(summary) => info!("🕰️ Scheduled pass complete. {summary}"),
        // Another trigger (the manual endpoint, or a pass that overran the hour) already holds the pipeline.
        Err(SyncError::PassInProgress) => warn!("🕰️ Scheduled pass skipped; one is already in flight."),
        Err(e) => error!("🕰️ Scheduled pass failed. {e}"),
    }
}

/// How long to sleep until the next top of the hour. At an exact hour boundary the full hour is waited, since the
/// boundary itself has just been served.
pub fn delay_until_next_hour(now: DateTime<Utc>) -> std::time::Duration {
    let into_hour = u64::from(now.minute()) * 60 + u64::from(now.second());
    std::time::Duration::from_secs(3600 - into_hour)
}
