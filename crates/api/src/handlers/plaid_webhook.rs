use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use finsync_core::app_state::AppState;
use finsync_core::services::webhook_service::{WebhookOutcome, WebhookService};
use finsync_primitives::models::dtos::webhook_dto::{PlaidWebhook, WebhookAck};
use std::sync::Arc;
use tracing::{info, warn};

#[utoipa::path(
    post,
    path = "/api/webhooks/plaid",
    tag = "Webhooks",
    summary = "Receive aggregator webhook events",
    description = "Public endpoint for the aggregator's push notifications \
                   (sync-updates-available, item errors). Delivery is at-least-once and \
                   retried on non-2xx, so the response is always 200 regardless of the \
                   downstream outcome; duplicate deliveries are absorbed by idempotent \
                   persistence. Sync work triggered here runs detached from the response.",
    operation_id = "receivePlaidWebhook",
    request_body(content = String, description = "Raw JSON webhook payload"),
    responses(
        ( status = 200, description = "Webhook received", body = WebhookAck),
    ),
    security(()),
)]
pub async fn plaid_webhook(State(state): State<Arc<AppState>>, body: Bytes) -> Json<WebhookAck> {
    match serde_json::from_slice::<PlaidWebhook>(&body) {
        Ok(payload) => {
            info!(
                "plaid webhook: {} / {} (item {})",
                payload.webhook_type, payload.webhook_code, payload.item_id
            );
            match WebhookService::handle_event(&state, payload) {
                WebhookOutcome::Processed => info!("plaid webhook processed"),
                WebhookOutcome::Ignored => info!("plaid webhook ignored"),
            }
        }
        Err(e) => {
            warn!("plaid webhook: undecodable payload: {}", e);
        }
    }

    Json(WebhookAck {
        status: "received".into(),
    })
}
