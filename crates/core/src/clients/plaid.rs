use finsync_primitives::error::ApiError;
use finsync_primitives::models::dtos::providers::plaid::{
    AccountsGetResponse, PlaidApiError, TransactionsSyncResponse,
};
use finsync_primitives::models::app_state::PlaidInfo;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::error;

/// Typed wrapper around the aggregator API. Credentials ride in the request
/// body, which is the aggregator's auth scheme for server-to-server calls.
#[derive(Clone)]
pub struct PlaidClient {
    http: Client,
    client_id: String,
    secret: String,
    base_url: String,
}

impl PlaidClient {
    pub fn new(http: Client, details: &PlaidInfo) -> Self {
        Self {
            http,
            client_id: details.plaid_client_id.clone(),
            secret: details.plaid_secret.expose_secret().to_string(),
            base_url: details.plaid_api_url.trim_end_matches('/').to_string(),
        }
    }

    /// One page of transaction deltas. `cursor` is `None` on the first sync of
    /// an item.
    pub async fn transactions_sync(
        &self,
        access_token: &str,
        cursor: Option<&str>,
        count: u32,
    ) -> Result<TransactionsSyncResponse, ApiError> {
        let mut body = json!({
            "client_id": self.client_id,
            "secret": self.secret,
            "access_token": access_token,
            "count": count,
            "options": { "include_personal_finance_category": true },
        });
        if let Some(cursor) = cursor {
            body["cursor"] = json!(cursor);
        }

        self.post("/transactions/sync", &body).await
    }

    /// Current balances for every account under the access token.
    pub async fn accounts_balance_get(
        &self,
        access_token: &str,
    ) -> Result<AccountsGetResponse, ApiError> {
        let body = json!({
            "client_id": self.client_id,
            "secret": self.secret,
            "access_token": access_token,
        });

        self.post("/accounts/balance/get", &body).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Aggregator(format!("aggregator unreachable: {}", e)))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Aggregator(format!("aggregator response read failed: {}", e)))?;

        if !status.is_success() {
            let err: PlaidApiError = serde_json::from_slice(&bytes).unwrap_or(PlaidApiError {
                error_type: String::new(),
                error_code: String::new(),
                error_message: format!("HTTP {}", status),
            });
            error!(
                "aggregator call {} failed: {} ({})",
                path, err.error_code, err.error_message
            );
            return Err(Self::map_error(err));
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::Aggregator(format!("invalid aggregator response: {}", e)))
    }

    fn map_error(err: PlaidApiError) -> ApiError {
        if err.error_type == "RATE_LIMIT_EXCEEDED" || err.error_code == "RATE_LIMIT_EXCEEDED" {
            return ApiError::RateLimited(err.error_message);
        }
        if err.error_code == "ITEM_LOGIN_REQUIRED" {
            return ApiError::ReauthRequired(err.error_message);
        }
        ApiError::Aggregator(format!("{}: {}", err.error_code, err.error_message))
    }
}
