use chrono::{DateTime, NaiveDate, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// A stored bank transaction. `external_transaction_id` is the dedup key:
/// persistence is always an upsert on it, never a blind insert.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(belongs_to(crate::models::entities::account::Account))]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub external_transaction_id: String,
    pub amount: f64,
    pub iso_currency_code: Option<String>,
    pub date: NaiveDate,
    pub authorized_date: Option<NaiveDate>,
    pub name: String,
    pub merchant_name: Option<String>,
    pub pending: bool,
    pub category_primary: Option<String>,
    pub category_detailed: Option<String>,
    pub pending_external_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction {
    pub account_id: Uuid,
    pub external_transaction_id: String,
    pub amount: f64,
    pub iso_currency_code: Option<String>,
    pub date: NaiveDate,
    pub authorized_date: Option<NaiveDate>,
    pub name: String,
    pub merchant_name: Option<String>,
    pub pending: bool,
    pub category_primary: Option<String>,
    pub category_detailed: Option<String>,
    pub pending_external_id: Option<String>,
}
