mod common;

use chrono::Utc;
use finsync_core::clients::PlaidClient;
use finsync_core::services::sync_service::{SyncService, MAX_SYNC_PAGES};
use finsync_primitives::error::ApiError;
use finsync_primitives::models::dtos::providers::plaid::TransactionsSyncResponse;
use finsync_primitives::models::entities::enum_types::ItemStatus;
use finsync_primitives::models::entities::item::Item;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn plaid_client(base_url: &str) -> PlaidClient {
    PlaidClient::new(
        reqwest::Client::new(),
        &common::test_config(base_url).plaid_details,
    )
}

fn test_item(cursor: Option<&str>) -> Item {
    Item {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        external_item_id: "item-test".to_string(),
        access_token: "access-token".to_string(),
        cursor: cursor.map(str::to_string),
        status: ItemStatus::Good,
        institution_name: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn tx_json(id: &str, account: &str, amount: f64) -> serde_json::Value {
    json!({
        "transaction_id": id,
        "account_id": account,
        "amount": amount,
        "iso_currency_code": "USD",
        "date": "2026-05-04",
        "authorized_date": "2026-05-03",
        "name": "Coffee Shop",
        "merchant_name": "Coffee Shop",
        "pending": false,
        "personal_finance_category": {
            "primary": "FOOD_AND_DRINK",
            "detailed": "FOOD_AND_DRINK_COFFEE"
        }
    })
}

#[tokio::test]
async fn accumulates_both_pages_with_exactly_two_calls() {
    let server = MockServer::start().await;

    // Mount order matters: the cursor-specific mock is checked first.
    Mock::given(method("POST"))
        .and(path("/transactions/sync"))
        .and(body_partial_json(json!({ "cursor": "cursor-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "added": [tx_json("tx-2", "acct-1", 4.20)],
            "modified": [tx_json("tx-3", "acct-1", 9.99)],
            "removed": [{ "transaction_id": "tx-gone" }],
            "has_more": false,
            "next_cursor": "cursor-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/transactions/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "added": [tx_json("tx-1", "acct-1", 12.50)],
            "modified": [],
            "removed": [],
            "has_more": true,
            "next_cursor": "cursor-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = plaid_client(&server.uri());
    let item = test_item(None);

    let updates = SyncService::fetch_updates(&client, &item).await.unwrap();

    assert_eq!(updates.added.len(), 2);
    assert_eq!(updates.added[0].transaction_id, "tx-1");
    assert_eq!(updates.added[1].transaction_id, "tx-2");
    assert_eq!(updates.modified.len(), 1);
    assert_eq!(updates.removed.len(), 1);
    assert_eq!(updates.removed[0].transaction_id, "tx-gone");
    assert_eq!(updates.next_cursor.as_deref(), Some("cursor-2"));
}

#[tokio::test]
async fn zero_page_response_does_not_advance_cursor() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactions/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "added": [],
            "modified": [],
            "removed": [],
            "has_more": false,
            "next_cursor": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = plaid_client(&server.uri());
    let item = test_item(Some("existing-cursor"));

    let updates = SyncService::fetch_updates(&client, &item).await.unwrap();

    assert!(updates.added.is_empty());
    assert!(updates.modified.is_empty());
    assert!(updates.removed.is_empty());
    assert_eq!(updates.next_cursor, None);
}

#[tokio::test]
async fn rate_limit_aborts_distinctly() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactions/sync"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error_type": "RATE_LIMIT_EXCEEDED",
            "error_code": "TRANSACTIONS_LIMIT",
            "error_message": "rate limit exceeded"
        })))
        .mount(&server)
        .await;

    let client = plaid_client(&server.uri());
    let item = test_item(None);

    let err = SyncService::fetch_updates(&client, &item).await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited(_)), "got {:?}", err);
}

#[tokio::test]
async fn reauth_required_aborts_distinctly() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactions/sync"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_type": "ITEM_ERROR",
            "error_code": "ITEM_LOGIN_REQUIRED",
            "error_message": "the login details of this item have changed"
        })))
        .mount(&server)
        .await;

    let client = plaid_client(&server.uri());
    let item = test_item(Some("cursor"));

    let err = SyncService::fetch_updates(&client, &item).await.unwrap_err();
    assert!(matches!(err, ApiError::ReauthRequired(_)), "got {:?}", err);
}

#[tokio::test]
async fn page_cap_stops_a_misbehaving_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactions/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "added": [],
            "modified": [],
            "removed": [],
            "has_more": true,
            "next_cursor": "same-cursor-forever"
        })))
        .expect(u64::from(MAX_SYNC_PAGES))
        .mount(&server)
        .await;

    let client = plaid_client(&server.uri());
    let item = test_item(None);

    let err = SyncService::fetch_updates(&client, &item).await.unwrap_err();
    assert!(matches!(err, ApiError::Aggregator(_)), "got {:?}", err);
}

#[test]
fn sync_response_decodes_with_missing_optionals() {
    let body = json!({
        "added": [{
            "transaction_id": "tx-1",
            "account_id": "acct-1",
            "amount": 3.75,
            "date": "2026-01-15",
            "name": "Transit",
            "pending": true
        }],
        "has_more": false,
        "next_cursor": "c"
    });

    let decoded: TransactionsSyncResponse = serde_json::from_value(body).unwrap();
    assert_eq!(decoded.added.len(), 1);
    let tx = &decoded.added[0];
    assert_eq!(tx.merchant_name, None);
    assert_eq!(tx.authorized_date, None);
    assert!(tx.personal_finance_category.is_none());
    assert!(tx.pending);
    assert!(decoded.modified.is_empty());
    assert!(decoded.removed.is_empty());
}
