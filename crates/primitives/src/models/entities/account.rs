use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::accounts)]
#[diesel(belongs_to(crate::models::entities::item::Item))]
pub struct Account {
    pub id: Uuid,
    pub item_id: Uuid,
    pub external_account_id: String,
    pub name: String,
    pub mask: Option<String>,
    pub official_name: Option<String>,
    pub current_balance: Option<f64>,
    pub available_balance: Option<f64>,
    pub iso_currency_code: Option<String>,
    pub account_type: String,
    pub account_subtype: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::accounts)]
pub struct NewAccount {
    pub item_id: Uuid,
    pub external_account_id: String,
    pub name: String,
    pub mask: Option<String>,
    pub official_name: Option<String>,
    pub current_balance: Option<f64>,
    pub available_balance: Option<f64>,
    pub iso_currency_code: Option<String>,
    pub account_type: String,
    pub account_subtype: Option<String>,
}
