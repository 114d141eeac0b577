use chrono::{DateTime, Utc};
use diesel::prelude::*;
use finsync_primitives::error::ApiError;
use finsync_primitives::models::entities::enum_types::{RefreshJobStatus, RefreshJobType};
use finsync_primitives::models::entities::refresh_job::{NewRefreshJob, RefreshJob};
use finsync_primitives::schema::refresh_jobs;
use uuid::Uuid;

pub struct RefreshJobRepository;

impl RefreshJobRepository {
    pub fn find_processing_by_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<RefreshJob>, ApiError> {
        refresh_jobs::table
            .filter(refresh_jobs::user_id.eq(user_id))
            .filter(refresh_jobs::status.eq(RefreshJobStatus::Processing))
            .first::<RefreshJob>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_latest_by_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<RefreshJob>, ApiError> {
        refresh_jobs::table
            .filter(refresh_jobs::user_id.eq(user_id))
            .order(refresh_jobs::created_at.desc())
            .first::<RefreshJob>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn create(
        conn: &mut PgConnection,
        user_id: Uuid,
        job_type: RefreshJobType,
    ) -> Result<RefreshJob, ApiError> {
        diesel::insert_into(refresh_jobs::table)
            .values(NewRefreshJob {
                user_id,
                status: RefreshJobStatus::Pending,
                job_type,
            })
            .get_result::<RefreshJob>(conn)
            .map_err(ApiError::from)
    }

    pub fn set_queue_job_id(
        conn: &mut PgConnection,
        id: Uuid,
        queue_job_id: &str,
    ) -> Result<(), ApiError> {
        diesel::update(refresh_jobs::table.find(id))
            .set((
                refresh_jobs::queue_job_id.eq(queue_job_id),
                refresh_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }

    pub fn mark_processing(conn: &mut PgConnection, id: Uuid) -> Result<(), ApiError> {
        diesel::update(refresh_jobs::table.find(id))
            .set((
                refresh_jobs::status.eq(RefreshJobStatus::Processing),
                refresh_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }

    pub fn mark_completed(
        conn: &mut PgConnection,
        id: Uuid,
        last_refresh_time: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        diesel::update(refresh_jobs::table.find(id))
            .set((
                refresh_jobs::status.eq(RefreshJobStatus::Completed),
                refresh_jobs::last_refresh_time.eq(last_refresh_time),
                refresh_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }

    pub fn mark_failed(
        conn: &mut PgConnection,
        id: Uuid,
        error_message: &str,
    ) -> Result<(), ApiError> {
        diesel::update(refresh_jobs::table.find(id))
            .set((
                refresh_jobs::status.eq(RefreshJobStatus::Failed),
                refresh_jobs::error_message.eq(error_message),
                refresh_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }

    pub fn update_next_scheduled_time(
        conn: &mut PgConnection,
        id: Uuid,
        next_scheduled_time: DateTime<Utc>,
    ) -> Result<(), ApiError> {
        diesel::update(refresh_jobs::table.find(id))
            .set((
                refresh_jobs::next_scheduled_time.eq(next_scheduled_time),
                refresh_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
        Ok(())
    }
}
