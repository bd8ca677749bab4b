//! Cron jobs run alongside the HTTP server.
//!
//! The only job recomputes denormalized counters every hour, see
//! [`crate::server::service::reconcile`].

pub mod config;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::server::service::reconcile::ReconcileService;

use self::config::reconcile as reconcile_config;

/// Initialize and start the cron job scheduler
pub async fn start_scheduler(db: &DatabaseConnection) -> Result<JobScheduler, JobSchedulerError> {
    let sched = JobScheduler::new().await?;

    sched.add(reconcile_job(db)?).await?;

    sched.start().await?;

    tracing::info!("Scheduler started");

    Ok(sched)
}

fn reconcile_job(db: &DatabaseConnection) -> Result<Job, JobSchedulerError> {
    let db_clone = db.clone();

    Job::new_async(reconcile_config::CRON_EXPRESSION, move |_, _| {
        let db = db_clone.clone();

        Box::pin(async move {
            let reconcile_service = ReconcileService::new(&db);

            match reconcile_service.reconcile_counters().await {
                Ok(corrected) => {
                    tracing::info!("Reconciliation corrected {} row(s)", corrected)
                }
                Err(e) => tracing::error!("Error reconciling counters: {:?}", e),
            }
        })
    })
}
