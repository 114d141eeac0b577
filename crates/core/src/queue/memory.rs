use super::{JobQueue, QueueJob};
use async_trait::async_trait;
use dashmap::DashMap;
use finsync_primitives::error::ApiError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};
use uuid::Uuid;

struct DelayedEntry {
    queue_job_id: String,
    abort: AbortHandle,
}

/// In-process queue on an unbounded channel. Delayed entries are sleeping
/// tasks registered by job key so they can be replaced or cleaned before they
/// fire.
pub struct MemoryJobQueue {
    tx: mpsc::UnboundedSender<QueueJob>,
    delayed: Arc<DashMap<String, DelayedEntry>>,
}

impl MemoryJobQueue {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<QueueJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let queue = Arc::new(Self {
            tx,
            delayed: Arc::new(DashMap::new()),
        });
        (queue, rx)
    }

    /// Number of delayed entries currently waiting to fire.
    pub fn delayed_len(&self) -> usize {
        self.delayed.len()
    }
}

#[async_trait]
impl JobQueue for MemoryJobQueue {
    async fn enqueue(&self, job: QueueJob) -> Result<String, ApiError> {
        let queue_job_id = Uuid::new_v4().to_string();
        debug!("queue: enqueue {} ({})", job.job_key(), queue_job_id);
        self.tx
            .send(job)
            .map_err(|_| ApiError::Queue("queue receiver closed".into()))?;
        Ok(queue_job_id)
    }

    async fn enqueue_delayed(&self, job: QueueJob, delay: Duration) -> Result<String, ApiError> {
        let queue_job_id = Uuid::new_v4().to_string();
        let key = job.job_key();

        // A fresh entry for the same key supersedes the old one.
        if let Some((_, old)) = self.delayed.remove(&key) {
            old.abort.abort();
        }

        let tx = self.tx.clone();
        let delayed = Arc::clone(&self.delayed);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            delayed.remove(&task_key);
            if tx.send(job).is_err() {
                warn!("queue: delayed job {} dropped, receiver closed", task_key);
            }
        });

        debug!(
            "queue: delayed {} in {}s ({})",
            key,
            delay.as_secs(),
            queue_job_id
        );
        self.delayed.insert(
            key,
            DelayedEntry {
                queue_job_id: queue_job_id.clone(),
                abort: handle.abort_handle(),
            },
        );
        Ok(queue_job_id)
    }

    async fn clean_delayed(&self, job_key: &str) {
        if let Some((_, entry)) = self.delayed.remove(job_key) {
            debug!(
                "queue: cleaned delayed entry {} ({})",
                job_key, entry.queue_job_id
            );
            entry.abort.abort();
        }
    }
}
