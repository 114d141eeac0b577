use axum::{extract::State, Json};
use finsync_core::app_state::AppState;
use finsync_core::services::refresh_service::RefreshService;
use finsync_primitives::error::{ApiError, ApiErrorResponse};
use finsync_primitives::models::dtos::refresh_dto::{RefreshAllRequest, RefreshAllResult};
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    post,
    path = "/api/refresh/all",
    tag = "Refresh",
    summary = "Fan out manual refresh requests to every user",
    description = "Issues a manual refresh request for every known user in fixed-size \
                   batches with a pause between batches. Users with a refresh already \
                   running are skipped by the per-user dedup check.",
    operation_id = "refreshAllUsers",
    request_body = RefreshAllRequest,
    responses(
        ( status = 200, description = "Fan-out finished", body = RefreshAllResult),
        ( status = 500, description = "User listing failed", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn refresh_all(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshAllRequest>,
) -> Result<Json<RefreshAllResult>, ApiError> {
    let batch_size = req.batch_size.unwrap_or(state.config.refresh_batch_size);
    info!("refresh fan-out requested (batch size {})", batch_size);
    let requested_users = RefreshService::refresh_all_users(&state, batch_size).await?;
    Ok(Json(RefreshAllResult { requested_users }))
}
