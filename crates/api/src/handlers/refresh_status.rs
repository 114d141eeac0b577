use axum::extract::{Path, State};
use axum::Json;
use finsync_core::app_state::AppState;
use finsync_core::repositories::RefreshJobRepository;
use finsync_primitives::error::{ApiError, ApiErrorResponse};
use finsync_primitives::models::dtos::refresh_dto::RefreshStatusResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/refresh/status/{user_id}",
    tag = "Refresh",
    summary = "Latest refresh job status for a user",
    operation_id = "refreshStatus",
    params(
        ("user_id" = Uuid, Path, description = "User id"),
    ),
    responses(
        ( status = 200, description = "Latest refresh job", body = RefreshStatusResponse),
        ( status = 404, description = "User has no refresh jobs", body = ApiErrorResponse),
    ),
    security(()),
)]
pub async fn refresh_status(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<RefreshStatusResponse>, ApiError> {
    let mut conn = state.db.get()?;

    let job = RefreshJobRepository::find_latest_by_user(&mut conn, user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("no refresh jobs for user {}", user_id)))?;

    Ok(Json(job.into()))
}
