use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use finsync_primitives::error::ApiError;
use finsync_primitives::models::entities::transaction::{NewTransaction, Transaction};
use finsync_primitives::schema::transactions;
use uuid::Uuid;

pub struct TransactionRepository;

impl TransactionRepository {
    /// Batched upsert keyed on `external_transaction_id`. A conflict updates
    /// the fields the aggregator may legitimately revise (amount, pending
    /// state, descriptors, category); `date` and `account_id` are written
    /// only on first insert so later partial data cannot clobber them.
    pub fn upsert_transactions(
        conn: &mut PgConnection,
        rows: &[NewTransaction],
    ) -> Result<usize, ApiError> {
        if rows.is_empty() {
            return Ok(0);
        }

        diesel::insert_into(transactions::table)
            .values(rows)
            .on_conflict(transactions::external_transaction_id)
            .do_update()
            .set((
                transactions::amount.eq(excluded(transactions::amount)),
                transactions::iso_currency_code.eq(excluded(transactions::iso_currency_code)),
                transactions::authorized_date.eq(excluded(transactions::authorized_date)),
                transactions::name.eq(excluded(transactions::name)),
                transactions::merchant_name.eq(excluded(transactions::merchant_name)),
                transactions::pending.eq(excluded(transactions::pending)),
                transactions::category_primary.eq(excluded(transactions::category_primary)),
                transactions::category_detailed.eq(excluded(transactions::category_detailed)),
                transactions::pending_external_id.eq(excluded(transactions::pending_external_id)),
                transactions::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(ApiError::from)
    }

    /// Single batched delete by external id set.
    pub fn delete_by_external_ids(
        conn: &mut PgConnection,
        external_ids: &[String],
    ) -> Result<usize, ApiError> {
        if external_ids.is_empty() {
            return Ok(0);
        }

        diesel::delete(
            transactions::table.filter(transactions::external_transaction_id.eq_any(external_ids)),
        )
        .execute(conn)
        .map_err(ApiError::from)
    }

    pub fn find_by_external_id(
        conn: &mut PgConnection,
        external_transaction_id: &str,
    ) -> Result<Option<Transaction>, ApiError> {
        transactions::table
            .filter(transactions::external_transaction_id.eq(external_transaction_id))
            .first::<Transaction>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn count_by_account(conn: &mut PgConnection, account_id: Uuid) -> Result<i64, ApiError> {
        transactions::table
            .filter(transactions::account_id.eq(account_id))
            .count()
            .get_result::<i64>(conn)
            .map_err(ApiError::from)
    }
}
