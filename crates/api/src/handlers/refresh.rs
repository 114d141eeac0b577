use axum::{extract::State, Json};
use finsync_core::app_state::AppState;
use finsync_core::services::refresh_service::RefreshService;
use finsync_primitives::error::{ApiError, ApiErrorResponse};
use finsync_primitives::models::dtos::refresh_dto::{RefreshRequest, RefreshRequestResult};
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    post,
    path = "/api/refresh",
    tag = "Refresh",
    summary = "Request an on-demand refresh of a user's linked accounts",
    description = "Queues a manual refresh job for the user. If a refresh is already \
                   running, responds with `queued: false` instead of an error.",
    operation_id = "requestRefresh",
    request_body = RefreshRequest,
    responses(
        ( status = 200, description = "Refresh queued, or already in progress", body = RefreshRequestResult),
        ( status = 500, description = "Job could not be created or enqueued", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn request_refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshRequestResult>, ApiError> {
    info!("refresh requested for user {}", req.user_id);
    let result = RefreshService::request_manual_refresh(&state, req.user_id).await?;
    Ok(Json(result))
}
