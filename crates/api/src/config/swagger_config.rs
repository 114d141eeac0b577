use crate::handlers::{
    health::__path_health_check, plaid_webhook::__path_plaid_webhook,
    refresh::__path_request_refresh, refresh_all::__path_refresh_all,
    refresh_status::__path_refresh_status,
};
use finsync_primitives::error::ApiErrorResponse;
use finsync_primitives::models::dtos::refresh_dto::{
    RefreshAllRequest, RefreshAllResult, RefreshRequest, RefreshRequestResult,
    RefreshStatusResponse,
};
use finsync_primitives::models::dtos::sync_dto::HealthStatus;
use finsync_primitives::models::dtos::webhook_dto::{PlaidWebhook, WebhookAck};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check, request_refresh, refresh_all, refresh_status, plaid_webhook
    ),
    components(schemas(
        ApiErrorResponse,
        HealthStatus,
        PlaidWebhook,
        RefreshAllRequest,
        RefreshAllResult,
        RefreshRequest,
        RefreshRequestResult,
        RefreshStatusResponse,
        WebhookAck,
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Refresh", description = "Manual and scheduled account refreshes"),
        (name = "Webhooks", description = "Aggregator push notifications")
    )
)]
pub struct ApiDoc;
