//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! The job purge always runs once at startup. When a cron expression is
//! configured it also runs on that schedule:
//!
//! ```text
//! Scheduler (PURGE_CRON)
//!     │
//!     └─► JobStore::purge(retention_days)
//! ```

use anyhow::{Context, Result};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::jobs::JobStore;

/// Start the periodic purge. Fails on a malformed cron expression.
///
/// Keep the returned scheduler alive for as long as the task should run.
pub async fn start_scheduler(
    job_store: JobStore,
    purge_cron: &str,
    retention_days: i32,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let purge_job = Job::new_async(purge_cron, move |_uuid, _lock| {
        let store = job_store.clone();
        Box::pin(async move {
            run_purge(&store, retention_days).await;
        })
    })
    .with_context(|| format!("Invalid purge schedule '{}'", purge_cron))?;

    scheduler.add(purge_job).await?;
    scheduler.start().await?;

    tracing::info!(schedule = purge_cron, retention_days, "Scheduled job purge started");
    Ok(scheduler)
}

/// Purge jobs older than the retention window.
///
/// Failures are logged, never propagated: a failed purge must not take the
/// service down.
pub async fn run_purge(job_store: &JobStore, retention_days: i32) {
    match job_store.purge(retention_days).await {
        Ok(removed) => {
            tracing::info!(removed, retention_days, "Cleaned up old jobs");
        }
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Job purge failed");
        }
    }
}
