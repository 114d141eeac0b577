use std::sync::Arc;
use tracing::{error, info};

use crate::app_state::AppState;
use crate::services::sync_service::SyncService;
use finsync_primitives::models::dtos::webhook_dto::PlaidWebhook;

#[derive(Debug, PartialEq, Eq)]
pub enum WebhookOutcome {
    Processed,
    Ignored,
}

pub struct WebhookService;

impl WebhookService {
    /// Maps inbound aggregator events to actions. The aggregator retries
    /// delivery until it sees a 2xx, so duplicates are expected and absorbed
    /// by the idempotent persistence underneath.
    pub fn handle_event(state: &Arc<AppState>, payload: PlaidWebhook) -> WebhookOutcome {
        match payload.webhook_type.as_str() {
            "TRANSACTIONS" => Self::handle_transactions_event(state, payload),
            "ITEM" => Self::handle_item_event(&payload),
            other => {
                info!(
                    "webhook: unknown type {} (code {})",
                    other, payload.webhook_code
                );
                WebhookOutcome::Ignored
            }
        }
    }

    fn handle_transactions_event(state: &Arc<AppState>, payload: PlaidWebhook) -> WebhookOutcome {
        match payload.webhook_code.as_str() {
            "SYNC_UPDATES_AVAILABLE" => {
                Self::spawn_item_sync(state, payload.item_id);
                WebhookOutcome::Processed
            }
            // Legacy update events, superseded by the sync flow.
            "INITIAL_UPDATE" | "HISTORICAL_UPDATE" | "DEFAULT_UPDATE" => {
                info!(
                    "webhook: ignoring legacy transactions event {} for item {}",
                    payload.webhook_code, payload.item_id
                );
                WebhookOutcome::Ignored
            }
            other => {
                info!("webhook: unknown transactions code {}", other);
                WebhookOutcome::Ignored
            }
        }
    }

    fn handle_item_event(payload: &PlaidWebhook) -> WebhookOutcome {
        match payload.webhook_code.as_str() {
            "ERROR" => {
                let message = payload
                    .error
                    .as_ref()
                    .and_then(|e| e.error_message.as_deref())
                    .unwrap_or("no error message");
                error!(
                    "webhook: item {} reported error: {}",
                    payload.item_id, message
                );
            }
            "LOGIN_REPAIRED"
            | "NEW_ACCOUNTS_AVAILABLE"
            | "PENDING_EXPIRATION"
            | "PENDING_DISCONNECT"
            | "USER_PERMISSION_REVOKED" => {
                info!(
                    "webhook: item {} event {}",
                    payload.item_id, payload.webhook_code
                );
            }
            other => {
                info!("webhook: unknown item code {}", other);
            }
        }
        WebhookOutcome::Ignored
    }

    /// Detached sync so the webhook response never waits on the aggregator or
    /// the database. Failures are logged here; at-least-once delivery means a
    /// retry will land eventually.
    fn spawn_item_sync(state: &Arc<AppState>, external_item_id: String) {
        let state = Arc::clone(state);
        tokio::spawn(async move {
            match SyncService::sync_item_for_external_id(&state, &external_item_id).await {
                Ok(summary) => info!(
                    "webhook: sync for item {}: {} added, {} modified, {} removed",
                    external_item_id, summary.added, summary.modified, summary.removed
                ),
                Err(e) => error!("webhook: sync for item {} failed: {}", external_item_id, e),
            }
        });
    }
}
