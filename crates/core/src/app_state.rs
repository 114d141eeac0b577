use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use eyre::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::queue::JobQueue;
use finsync_primitives::models::app_state::AppConfig;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Shared application state. The queue is injected behind a trait so the
/// scheduler and orchestrator can run against any durable queue.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub http_client: Client,
    pub config: AppConfig,
    pub queue: Arc<dyn JobQueue>,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig, queue: Arc<dyn JobQueue>) -> Result<Arc<Self>> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Arc::new(Self {
            db,
            http_client: http,
            config,
            queue,
        }))
    }
}
