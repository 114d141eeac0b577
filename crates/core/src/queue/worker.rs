use super::QueueJob;
use crate::app_state::AppState;
use crate::services::refresh_service::RefreshService;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Drains the queue and executes refresh jobs one at a time. Job failures are
/// recorded on the job row by the service; here they are only logged.
pub fn spawn_refresh_worker(
    state: Arc<AppState>,
    mut rx: mpsc::UnboundedReceiver<QueueJob>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("refresh worker started");
        while let Some(job) = rx.recv().await {
            let key = job.job_key();
            if let Err(e) = RefreshService::execute_job(&state, job).await {
                error!("refresh job {} failed: {}", key, e);
            }
        }
        info!("refresh worker stopped: queue closed");
    })
}
