use diesel::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::clients::PlaidClient;
use crate::repositories::{AccountRepository, ItemRepository, TransactionRepository};
use finsync_primitives::error::ApiError;
use finsync_primitives::models::dtos::providers::plaid::{PlaidAccount, PlaidTransaction};
use finsync_primitives::models::dtos::sync_dto::{SyncSummary, TransactionUpdates};
use finsync_primitives::models::entities::item::Item;
use finsync_primitives::models::entities::transaction::NewTransaction;

pub const SYNC_PAGE_SIZE: u32 = 100;

/// Upper bound on pages per attempt, against an upstream that never reports
/// `has_more = false`.
pub const MAX_SYNC_PAGES: u32 = 50;

pub struct SyncService;

impl SyncService {
    pub async fn sync_item_for_external_id(
        state: &AppState,
        external_item_id: &str,
    ) -> Result<SyncSummary, ApiError> {
        let item = {
            let mut conn = state.db.get()?;
            ItemRepository::find_by_external_id(&mut conn, external_item_id)?
                .ok_or_else(|| ApiError::ItemNotFound(external_item_id.to_string()))?
        };

        Self::sync_item(state, &item).await
    }

    /// One full sync attempt for one item: drain the cursor, pull fresh
    /// balances, then land everything in a single database transaction. Safe
    /// to call again with an unchanged cursor; every write is an upsert or a
    /// delete keyed on external ids.
    pub async fn sync_item(state: &AppState, item: &Item) -> Result<SyncSummary, ApiError> {
        let client = PlaidClient::new(state.http_client.clone(), &state.config.plaid_details);

        let updates = Self::fetch_updates(&client, item).await?;
        let balances = client.accounts_balance_get(&item.access_token).await?;

        let mut conn = state.db.get()?;
        let summary = conn.transaction::<SyncSummary, ApiError, _>(|conn| {
            Self::persist_updates(conn, item, &balances.accounts, &updates)
        })?;

        info!(
            "sync: item {}: {} added, {} modified, {} removed",
            item.external_item_id, summary.added, summary.modified, summary.removed
        );
        Ok(summary)
    }

    /// Drives the paginated sync endpoint until the server reports no more
    /// pages, accumulating deltas in server order. A rate limit or a
    /// re-auth-required response aborts the attempt; the stored cursor is
    /// untouched until a batch commits.
    pub async fn fetch_updates(
        client: &PlaidClient,
        item: &Item,
    ) -> Result<TransactionUpdates, ApiError> {
        let mut updates = TransactionUpdates::default();
        let mut cursor = item.cursor.clone();

        for page_num in 1..=MAX_SYNC_PAGES {
            let page = client
                .transactions_sync(&item.access_token, cursor.as_deref(), SYNC_PAGE_SIZE)
                .await?;

            debug!(
                "sync: item {} page {}: {} added, {} modified, {} removed",
                item.external_item_id,
                page_num,
                page.added.len(),
                page.modified.len(),
                page.removed.len()
            );

            updates.added.extend(page.added);
            updates.modified.extend(page.modified);
            updates.removed.extend(page.removed);

            // An empty cursor never replaces a real one, so a zero-page
            // response cannot move sync state backwards.
            if !page.next_cursor.is_empty() {
                cursor = Some(page.next_cursor);
                updates.next_cursor = cursor.clone();
            }

            if !page.has_more {
                return Ok(updates);
            }
        }

        Err(ApiError::Aggregator(format!(
            "transactions sync for item {} did not drain within {} pages",
            item.external_item_id, MAX_SYNC_PAGES
        )))
    }

    /// All writes for one attempt. Runs inside one transaction; the cursor
    /// update is part of the same batch, so a failed attempt resumes from the
    /// previous cursor.
    fn persist_updates(
        conn: &mut PgConnection,
        item: &Item,
        plaid_accounts: &[PlaidAccount],
        updates: &TransactionUpdates,
    ) -> Result<SyncSummary, ApiError> {
        AccountRepository::upsert_accounts(conn, item.id, plaid_accounts)?;
        let account_ids = AccountRepository::resolve_account_ids(conn, item.id)?;

        let added_rows = Self::to_insertable(&updates.added, &account_ids);
        let modified_rows = Self::to_insertable(&updates.modified, &account_ids);
        TransactionRepository::upsert_transactions(conn, &added_rows)?;
        TransactionRepository::upsert_transactions(conn, &modified_rows)?;

        let removed_ids: Vec<String> = updates
            .removed
            .iter()
            .map(|removed| removed.transaction_id.clone())
            .collect();
        let removed = TransactionRepository::delete_by_external_ids(conn, &removed_ids)?;

        if let Some(cursor) = updates.next_cursor.as_deref() {
            ItemRepository::update_cursor(conn, item.id, cursor)?;
        }

        Ok(SyncSummary {
            added: added_rows.len(),
            modified: modified_rows.len(),
            removed,
        })
    }

    /// Maps transactions through the resolver map. A transaction whose
    /// account cannot be resolved is skipped with a warning; it must never be
    /// stored without an owner, and it must not sink the rest of the batch.
    fn to_insertable(
        transactions: &[PlaidTransaction],
        account_ids: &HashMap<String, Uuid>,
    ) -> Vec<NewTransaction> {
        transactions
            .iter()
            .filter_map(|tx| match account_ids.get(&tx.account_id) {
                Some(&account_id) => Some(NewTransaction {
                    account_id,
                    external_transaction_id: tx.transaction_id.clone(),
                    amount: tx.amount,
                    iso_currency_code: tx.iso_currency_code.clone(),
                    date: tx.date,
                    authorized_date: tx.authorized_date,
                    name: tx.name.clone(),
                    merchant_name: tx.merchant_name.clone(),
                    pending: tx.pending,
                    category_primary: tx
                        .personal_finance_category
                        .as_ref()
                        .map(|category| category.primary.clone()),
                    category_detailed: tx
                        .personal_finance_category
                        .as_ref()
                        .map(|category| category.detailed.clone()),
                    pending_external_id: tx.pending_transaction_id.clone(),
                }),
                None => {
                    warn!(
                        "sync: skipping transaction {}: no account for {}",
                        tx.transaction_id, tx.account_id
                    );
                    None
                }
            })
            .collect()
    }
}
