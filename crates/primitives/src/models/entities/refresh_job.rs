use crate::models::entities::enum_types::{RefreshJobStatus, RefreshJobType};
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// One row per sync attempt. At most one row per user may be `processing` at a
/// time; the migration enforces this with a unique partial index.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::refresh_jobs)]
#[diesel(belongs_to(crate::models::entities::user::User))]
pub struct RefreshJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: RefreshJobStatus,
    pub job_type: RefreshJobType,
    pub queue_job_id: Option<String>,
    pub last_refresh_time: Option<DateTime<Utc>>,
    pub next_scheduled_time: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::refresh_jobs)]
pub struct NewRefreshJob {
    pub user_id: Uuid,
    pub status: RefreshJobStatus,
    pub job_type: RefreshJobType,
}
