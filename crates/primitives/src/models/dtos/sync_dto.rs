use crate::models::dtos::providers::plaid::{PlaidRemovedTransaction, PlaidTransaction};
use serde::Serialize;
use utoipa::ToSchema;

/// Accumulated transaction deltas for one item across all pages of a sync,
/// plus the cursor to commit once the batch lands. `next_cursor` of `None`
/// means the attempt produced nothing to advance past.
#[derive(Debug, Default)]
pub struct TransactionUpdates {
    pub added: Vec<PlaidTransaction>,
    pub modified: Vec<PlaidTransaction>,
    pub removed: Vec<PlaidRemovedTransaction>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SyncSummary {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}
