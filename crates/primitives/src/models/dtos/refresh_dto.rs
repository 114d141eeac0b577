use crate::models::entities::enum_types::{RefreshJobStatus, RefreshJobType};
use crate::models::entities::refresh_job::RefreshJob;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub user_id: Uuid,
}

/// Outcome of a manual refresh request. A refresh already in flight is a
/// benign `queued: false`, not an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshRequestResult {
    pub queued: bool,
    pub job_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RefreshAllRequest {
    pub batch_size: Option<usize>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshAllResult {
    pub requested_users: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshStatusResponse {
    pub job_id: Uuid,
    pub status: RefreshJobStatus,
    pub job_type: RefreshJobType,
    pub last_refresh_time: Option<DateTime<Utc>>,
    pub next_scheduled_time: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
}

impl From<RefreshJob> for RefreshStatusResponse {
    fn from(job: RefreshJob) -> Self {
        Self {
            job_id: job.id,
            status: job.status,
            job_type: job.job_type,
            last_refresh_time: job.last_refresh_time,
            next_scheduled_time: job.next_scheduled_time,
            error_message: job.error_message,
        }
    }
}
