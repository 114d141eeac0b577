use axum::Router;
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use eyre::Report;
use finsync_core::app_state::AppState;
use finsync_core::services::refresh_service::RefreshService;
use http::HeaderValue;
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub fn build_cors() -> Result<CorsLayer, Report> {
    let origins = env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into());

    let allowed_origins = origins
        .split(',')
        .map(|s| s.trim().parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| eyre::eyre!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(allowed_origins))
}

pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env file");
    } else {
        info!("No .env file found, using system environment");
    }
}

pub fn build_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Result<Router, Report> {
    let cors = build_cors()?;

    Ok(finsync_api::app::create_router(state, metric_layer, metric_handle).layer(cors))
}

/// Books the first recurring refresh for every user. Skippable for
/// environments that only want webhook and manual refreshes.
pub async fn initialize_refresh_schedule(state: &Arc<AppState>) {
    if env::var("SCHEDULED_REFRESH_DISABLED").is_ok() {
        info!("Scheduled refreshes disabled, skipping bootstrap");
        return;
    }

    let interval_hours = state.config.refresh_interval_hours;
    match RefreshService::initialize_scheduled_refreshes(state, interval_hours).await {
        Ok(count) => info!("Scheduled refreshes initialized for {} users", count),
        Err(e) => tracing::warn!(
            "Failed to initialize scheduled refreshes: {}. Continuing without them.",
            e
        ),
    }
}
