use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inbound aggregator webhook. Delivery is at-least-once, so handling must be
/// idempotent and the HTTP response is always 200.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaidWebhook {
    pub webhook_type: String,
    pub webhook_code: String,
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub error: Option<PlaidWebhookError>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaidWebhookError {
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub status: String,
}
