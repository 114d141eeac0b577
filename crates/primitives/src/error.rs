use axum::response::{IntoResponse, Response};
use diesel::r2d2;
use http::StatusCode;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug)]
pub enum ApiError {
    Database(diesel::result::Error),
    DatabaseConnection(String),
    ItemNotFound(String),
    NotFound(String),
    RateLimited(String),
    ReauthRequired(String),
    Aggregator(String),
    Queue(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::ItemNotFound(e) => write!(f, "Item not found: {}", e),
            ApiError::NotFound(e) => write!(f, "Not found: {}", e),
            ApiError::RateLimited(e) => write!(f, "Aggregator rate limited: {}", e),
            ApiError::ReauthRequired(e) => write!(f, "Item requires re-authentication: {}", e),
            ApiError::Aggregator(e) => write!(f, "Aggregator error: {}", e),
            ApiError::Queue(e) => write!(f, "Queue error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(err: r2d2::Error) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Aggregator(err.to_string())
    }
}

/// Error body returned by handlers when a request fails.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl From<ApiError> for (StatusCode, String) {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Database(e) => match e {
                diesel::result::Error::NotFound => {
                    (StatusCode::NOT_FOUND, "Record not found".to_string())
                }
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", e),
                ),
            },
            ApiError::DatabaseConnection(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database connection error: {}", e),
            ),
            ApiError::ItemNotFound(e) => (StatusCode::NOT_FOUND, format!("Item not found: {}", e)),
            ApiError::NotFound(e) => (StatusCode::NOT_FOUND, format!("Not found: {}", e)),
            ApiError::RateLimited(e) => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("Aggregator rate limited: {}", e),
            ),
            ApiError::ReauthRequired(e) => (
                StatusCode::CONFLICT,
                format!("Item requires re-authentication: {}", e),
            ),
            ApiError::Aggregator(e) => {
                (StatusCode::BAD_GATEWAY, format!("Aggregator error: {}", e))
            }
            ApiError::Queue(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Queue error: {}", e),
            ),
            ApiError::Internal(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", e),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = self.into();
        (status, axum::Json(ApiErrorResponse { error: message })).into_response()
    }
}
