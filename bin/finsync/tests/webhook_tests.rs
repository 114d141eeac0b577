mod common;

use axum::routing::post;
use axum::Router;
use axum_test::TestServer;
use common::RecordingQueue;
use finsync_api::handlers::plaid_webhook::plaid_webhook;
use finsync_core::services::webhook_service::{WebhookOutcome, WebhookService};
use finsync_primitives::models::dtos::webhook_dto::{PlaidWebhook, PlaidWebhookError};
use serde_json::{json, Value};
use std::sync::Arc;

fn webhook_server() -> TestServer {
    let state = common::test_state(
        common::unchecked_db_pool(),
        "http://127.0.0.1:9",
        Arc::new(RecordingQueue::default()),
    );
    let app = Router::new()
        .route("/api/webhooks/plaid", post(plaid_webhook))
        .with_state(state);
    TestServer::new(app).expect("failed to build test server")
}

fn payload(webhook_type: &str, webhook_code: &str) -> Value {
    json!({
        "webhook_type": webhook_type,
        "webhook_code": webhook_code,
        "item_id": "item-webhook-test"
    })
}

#[tokio::test]
async fn sync_updates_available_is_acked_immediately() {
    let server = webhook_server();

    // The triggered sync runs detached and will fail against the dead
    // database; the delivery contract still requires a 200.
    let response = server
        .post("/api/webhooks/plaid")
        .json(&payload("TRANSACTIONS", "SYNC_UPDATES_AVAILABLE"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "received");
}

#[tokio::test]
async fn legacy_transaction_updates_are_acked_and_ignored() {
    let server = webhook_server();

    for code in ["INITIAL_UPDATE", "HISTORICAL_UPDATE", "DEFAULT_UPDATE"] {
        let response = server
            .post("/api/webhooks/plaid")
            .json(&payload("TRANSACTIONS", code))
            .await;
        response.assert_status_ok();
    }
}

#[tokio::test]
async fn item_events_and_unknown_codes_are_acked() {
    let server = webhook_server();

    let mut error_payload = payload("ITEM", "ERROR");
    error_payload["error"] = json!({ "error_message": "item is broken" });

    for body in [
        error_payload,
        payload("ITEM", "PENDING_EXPIRATION"),
        payload("ITEM", "SOME_FUTURE_CODE"),
        payload("AUDIT", "WHO_KNOWS"),
    ] {
        let response = server.post("/api/webhooks/plaid").json(&body).await;
        response.assert_status_ok();
        let ack: Value = response.json();
        assert_eq!(ack["status"], "received");
    }
}

#[tokio::test]
async fn undecodable_payload_is_still_acked() {
    let server = webhook_server();

    let response = server
        .post("/api/webhooks/plaid")
        .text("this is not json")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "received");
}

#[tokio::test]
async fn dispatch_outcomes_match_the_event_table() {
    let state = common::test_state(
        common::unchecked_db_pool(),
        "http://127.0.0.1:9",
        Arc::new(RecordingQueue::default()),
    );

    let event = |webhook_type: &str, webhook_code: &str| PlaidWebhook {
        webhook_type: webhook_type.to_string(),
        webhook_code: webhook_code.to_string(),
        item_id: "item-1".to_string(),
        error: None,
    };

    assert_eq!(
        WebhookService::handle_event(&state, event("TRANSACTIONS", "SYNC_UPDATES_AVAILABLE")),
        WebhookOutcome::Processed
    );
    assert_eq!(
        WebhookService::handle_event(&state, event("TRANSACTIONS", "DEFAULT_UPDATE")),
        WebhookOutcome::Ignored
    );
    assert_eq!(
        WebhookService::handle_event(&state, event("ITEM", "LOGIN_REPAIRED")),
        WebhookOutcome::Ignored
    );

    let mut with_error = event("ITEM", "ERROR");
    with_error.error = Some(PlaidWebhookError {
        error_message: Some("credentials revoked".to_string()),
    });
    assert_eq!(
        WebhookService::handle_event(&state, with_error),
        WebhookOutcome::Ignored
    );

    assert_eq!(
        WebhookService::handle_event(&state, event("MYSTERY", "EVENT")),
        WebhookOutcome::Ignored
    );
}
