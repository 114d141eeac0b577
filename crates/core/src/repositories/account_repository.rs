use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use finsync_primitives::error::ApiError;
use finsync_primitives::models::dtos::providers::plaid::PlaidAccount;
use finsync_primitives::models::entities::account::NewAccount;
use finsync_primitives::schema::accounts;
use std::collections::HashMap;
use uuid::Uuid;

pub struct AccountRepository;

impl AccountRepository {
    /// One batched write for all accounts of an item. Conflicts on
    /// `(item_id, external_account_id)` refresh balances and metadata.
    pub fn upsert_accounts(
        conn: &mut PgConnection,
        item_id: Uuid,
        plaid_accounts: &[PlaidAccount],
    ) -> Result<usize, ApiError> {
        if plaid_accounts.is_empty() {
            return Ok(0);
        }

        let rows: Vec<NewAccount> = plaid_accounts
            .iter()
            .map(|account| NewAccount {
                item_id,
                external_account_id: account.account_id.clone(),
                name: account.name.clone(),
                mask: account.mask.clone(),
                official_name: account.official_name.clone(),
                current_balance: account.balances.current,
                available_balance: account.balances.available,
                iso_currency_code: account.balances.iso_currency_code.clone(),
                account_type: account.account_type.clone(),
                account_subtype: account.subtype.clone(),
            })
            .collect();

        diesel::insert_into(accounts::table)
            .values(&rows)
            .on_conflict((accounts::item_id, accounts::external_account_id))
            .do_update()
            .set((
                accounts::name.eq(excluded(accounts::name)),
                accounts::mask.eq(excluded(accounts::mask)),
                accounts::official_name.eq(excluded(accounts::official_name)),
                accounts::current_balance.eq(excluded(accounts::current_balance)),
                accounts::available_balance.eq(excluded(accounts::available_balance)),
                accounts::iso_currency_code.eq(excluded(accounts::iso_currency_code)),
                accounts::account_type.eq(excluded(accounts::account_type)),
                accounts::account_subtype.eq(excluded(accounts::account_subtype)),
                accounts::updated_at.eq(Utc::now()),
            ))
            .execute(conn)
            .map_err(ApiError::from)
    }

    /// Single batched lookup from aggregator account ids to internal primary
    /// keys. Everything downstream resolves against this map instead of
    /// querying per transaction.
    pub fn resolve_account_ids(
        conn: &mut PgConnection,
        item_id: Uuid,
    ) -> Result<HashMap<String, Uuid>, ApiError> {
        let pairs = accounts::table
            .filter(accounts::item_id.eq(item_id))
            .select((accounts::external_account_id, accounts::id))
            .load::<(String, Uuid)>(conn)?;

        Ok(pairs.into_iter().collect())
    }
}
