//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (cron from config, every minute by default)
//!     │
//!     └─► expire_due_matches()
//!             └─► For each expired match → notify both parties
//! ```

use anyhow::Result;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::matching::actions::expire_due_matches;
use crate::kernel::ServerDeps;

/// Start all scheduled tasks
pub async fn start_scheduler(deps: ServerDeps, expiry_cron: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let sweep_job = Job::new_async(expiry_cron, move |_uuid, _lock| {
        let deps = deps.clone();
        Box::pin(async move {
            if let Err(e) = expire_due_matches(&deps).await {
                tracing::error!("Match expiry sweep failed: {}", e);
            }
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!(cron = expiry_cron, "Scheduled tasks started (match expiry sweep)");
    Ok(scheduler)
}
