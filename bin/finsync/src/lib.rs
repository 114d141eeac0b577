mod observability;

pub mod utility;

pub use finsync_primitives::error::ApiError;

use crate::utility::db_pool::create_db_pool;
use crate::utility::logging::setup_logging;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, initialize_refresh_schedule, load_env};
use eyre::Report;
use finsync_core::app_state::AppState;
use finsync_core::queue::{spawn_refresh_worker, MemoryJobQueue};
use finsync_primitives::models::app_state::AppConfig;
use tracing::info;

pub async fn run() -> Result<(), Report> {
    // 1. load environment variables
    load_env();

    // 2. initialize logging first (so we can log everything else)
    setup_logging();

    info!("Starting FinSync application...");

    // 3. load configuration
    let config = AppConfig::from_env()?;

    // 4. create database connection pool
    let pool = create_db_pool()?;

    // 5. build queue and application state
    let (queue, queue_rx) = MemoryJobQueue::new();
    let state = AppState::new(pool, config, queue)?;

    // 6. start the refresh job worker
    spawn_refresh_worker(state.clone(), queue_rx);

    // 7. book the recurring refresh schedule
    initialize_refresh_schedule(&state).await;

    // 8. initialize metrics
    let (metric_layer, metric_handle) = observability::metrics::setup_metrics();

    // 9. build axum router
    let app = build_router(state.clone(), metric_layer, metric_handle)?;

    // 10. start HTTP server
    serve(app).await?;

    info!("FinSync application shut down gracefully");
    Ok(())
}
