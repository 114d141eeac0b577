use chrono::Utc;
use rand::Rng;
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::queue::QueueJob;
use crate::repositories::{ItemRepository, RefreshJobRepository, UserRepository};
use crate::services::sync_service::SyncService;
use finsync_primitives::error::ApiError;
use finsync_primitives::models::dtos::refresh_dto::RefreshRequestResult;
use finsync_primitives::models::entities::enum_types::RefreshJobType;

/// Pause between fan-out batches, to bound burst load on the aggregator.
const BATCH_PAUSE: Duration = Duration::from_secs(2);

pub struct RefreshService;

impl RefreshService {
    /// Queues a manual refresh for the user unless one is already running.
    /// The duplicate case is a benign `queued: false`, not an error.
    pub async fn request_manual_refresh(
        state: &AppState,
        user_id: Uuid,
    ) -> Result<RefreshRequestResult, ApiError> {
        let job = {
            let mut conn = state.db.get()?;

            if let Some(existing) =
                RefreshJobRepository::find_processing_by_user(&mut conn, user_id)?
            {
                info!(
                    "refresh: user {} already has job {} processing",
                    user_id, existing.id
                );
                return Ok(RefreshRequestResult {
                    queued: false,
                    job_id: Some(existing.id),
                    message: "A refresh is already in progress".into(),
                });
            }

            RefreshJobRepository::create(&mut conn, user_id, RefreshJobType::Manual)?
        };

        let queue_job = QueueJob {
            user_id,
            job_type: RefreshJobType::Manual,
            job_db_id: Some(job.id),
        };

        // A stale delayed entry under the same key would double-fire later.
        state.queue.clean_delayed(&queue_job.job_key()).await;
        let queue_job_id = state.queue.enqueue(queue_job).await?;

        let mut conn = state.db.get()?;
        RefreshJobRepository::set_queue_job_id(&mut conn, job.id, &queue_job_id)?;

        info!("refresh: queued manual job {} for user {}", job.id, user_id);
        Ok(RefreshRequestResult {
            queued: true,
            job_id: Some(job.id),
            message: "Refresh queued".into(),
        })
    }

    /// Runs one dequeued job through the pending -> processing -> terminal
    /// state machine. Scheduled jobs book their next run whatever the
    /// outcome; failed manual jobs are not retried.
    pub async fn execute_job(state: &AppState, job: QueueJob) -> Result<(), ApiError> {
        let job_id = {
            let mut conn = state.db.get()?;
            let job_id = match job.job_db_id {
                Some(id) => id,
                None => RefreshJobRepository::create(&mut conn, job.user_id, job.job_type)?.id,
            };
            RefreshJobRepository::mark_processing(&mut conn, job_id)?;
            job_id
        };

        let outcome = Self::sync_user_items(state, job.user_id).await;

        {
            let mut conn = state.db.get()?;
            match &outcome {
                Ok(synced) => {
                    RefreshJobRepository::mark_completed(&mut conn, job_id, Utc::now())?;
                    info!("refresh: job {} completed, {} items synced", job_id, synced);
                }
                Err(e) => {
                    RefreshJobRepository::mark_failed(&mut conn, job_id, &e.to_string())?;
                    error!("refresh: job {} failed: {}", job_id, e);
                }
            }
        }

        if job.job_type == RefreshJobType::Scheduled {
            Self::schedule_next_run(state, job.user_id, job_id).await?;
        }

        outcome.map(|_| ())
    }

    /// Items are refreshed sequentially and the first failure stops the job;
    /// remaining items wait for the next run.
    async fn sync_user_items(state: &AppState, user_id: Uuid) -> Result<usize, ApiError> {
        let items = {
            let mut conn = state.db.get()?;
            ItemRepository::find_by_user(&mut conn, user_id)?
        };

        let mut synced = 0;
        for item in &items {
            SyncService::sync_item(state, item).await?;
            synced += 1;
        }
        Ok(synced)
    }

    /// Books the next scheduled run: persists `next_scheduled_time` on the
    /// finished job row and enqueues one delayed entry with exactly that
    /// delay.
    pub async fn schedule_next_run(
        state: &AppState,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<(), ApiError> {
        let interval_hours = state.config.refresh_interval_hours;
        let next_run = Utc::now() + chrono::Duration::hours(interval_hours);

        {
            let mut conn = state.db.get()?;
            RefreshJobRepository::update_next_scheduled_time(&mut conn, job_id, next_run)?;
        }

        let delay = Duration::from_secs(interval_hours as u64 * 3600);
        state
            .queue
            .enqueue_delayed(
                QueueJob {
                    user_id,
                    job_type: RefreshJobType::Scheduled,
                    job_db_id: None,
                },
                delay,
            )
            .await?;

        info!(
            "refresh: next scheduled run for user {} at {}",
            user_id, next_run
        );
        Ok(())
    }

    /// Books a first recurring run for every known user, jittered across half
    /// the interval so the fleet does not refresh at once.
    pub async fn initialize_scheduled_refreshes(
        state: &AppState,
        interval_hours: i64,
    ) -> Result<usize, ApiError> {
        let user_ids = {
            let mut conn = state.db.get()?;
            UserRepository::all_user_ids(&mut conn)?
        };

        let max_jitter_secs = (interval_hours.max(1) as u64 * 3600 / 2).max(1);
        let jitters: Vec<u64> = {
            let mut rng = rand::thread_rng();
            user_ids
                .iter()
                .map(|_| rng.gen_range(0..max_jitter_secs))
                .collect()
        };

        for (&user_id, &jitter_secs) in user_ids.iter().zip(&jitters) {
            state
                .queue
                .enqueue_delayed(
                    QueueJob {
                        user_id,
                        job_type: RefreshJobType::Scheduled,
                        job_db_id: None,
                    },
                    Duration::from_secs(jitter_secs),
                )
                .await?;
        }

        info!(
            "refresh: scheduled first runs for {} users (jitter up to {}s)",
            user_ids.len(),
            max_jitter_secs
        );
        Ok(user_ids.len())
    }

    /// Manual-refresh fan-out over all users in fixed-size batches with a
    /// pause in between.
    pub async fn refresh_all_users(
        state: &AppState,
        batch_size: usize,
    ) -> Result<usize, ApiError> {
        let user_ids = {
            let mut conn = state.db.get()?;
            UserRepository::all_user_ids(&mut conn)?
        };

        let batch_size = batch_size.max(1);
        for (batch, chunk) in user_ids.chunks(batch_size).enumerate() {
            if batch > 0 {
                tokio::time::sleep(BATCH_PAUSE).await;
            }
            for &user_id in chunk {
                if let Err(e) = Self::request_manual_refresh(state, user_id).await {
                    error!("refresh: fan-out request for user {} failed: {}", user_id, e);
                }
            }
        }

        info!("refresh: fan-out requested for {} users", user_ids.len());
        Ok(user_ids.len())
    }
}
