use crate::models::entities::enum_types::ItemStatus;
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// One linked bank connection. The access token is opaque to sync logic and the
/// cursor marks how far transaction deltas have been pulled from the aggregator.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::items)]
#[diesel(belongs_to(crate::models::entities::user::User))]
pub struct Item {
    pub id: Uuid,
    pub user_id: Uuid,
    pub external_item_id: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub cursor: Option<String>,
    pub status: ItemStatus,
    pub institution_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
