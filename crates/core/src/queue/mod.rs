pub mod memory;
pub mod worker;

pub use memory::MemoryJobQueue;
pub use worker::spawn_refresh_worker;

use async_trait::async_trait;
use finsync_primitives::error::ApiError;
use finsync_primitives::models::entities::enum_types::RefreshJobType;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Payload handed to the queue for one refresh of one user. `job_db_id` is
/// set for manual requests (the row exists before enqueueing) and empty for
/// delayed scheduled firings, which create their row on dequeue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueJob {
    pub user_id: Uuid,
    pub job_type: RefreshJobType,
    pub job_db_id: Option<Uuid>,
}

impl QueueJob {
    /// Dedup key for delayed entries, one per user and job type.
    pub fn job_key(&self) -> String {
        format!("{}-{}", self.job_type, self.user_id)
    }
}

/// Seam between the refresh scheduler and whatever queue backs it. The
/// in-process implementation lives in [`memory`]; a durable queue only needs
/// these three operations.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Enqueue for immediate execution. Returns the queue's job id.
    async fn enqueue(&self, job: QueueJob) -> Result<String, ApiError>;

    /// Enqueue to fire after `delay`. A later entry with the same job key
    /// replaces an earlier one.
    async fn enqueue_delayed(&self, job: QueueJob, delay: Duration) -> Result<String, ApiError>;

    /// Drop any pending delayed entry for the key.
    async fn clean_delayed(&self, job_key: &str);
}
