use chrono::Utc;
use diesel::prelude::*;
use finsync_primitives::error::ApiError;
use finsync_primitives::models::entities::item::Item;
use finsync_primitives::schema::items;
use uuid::Uuid;

pub struct ItemRepository;

impl ItemRepository {
    pub fn find_by_external_id(
        conn: &mut PgConnection,
        external_item_id: &str,
    ) -> Result<Option<Item>, ApiError> {
        items::table
            .filter(items::external_item_id.eq(external_item_id))
            .first::<Item>(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_user(conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<Item>, ApiError> {
        items::table
            .filter(items::user_id.eq(user_id))
            .order(items::created_at.asc())
            .load::<Item>(conn)
            .map_err(ApiError::from)
    }

    /// Only called with a cursor from a fully committed batch.
    pub fn update_cursor(
        conn: &mut PgConnection,
        item_id: Uuid,
        cursor: &str,
    ) -> Result<(), ApiError> {
        diesel::update(items::table.find(item_id))
            .set((items::cursor.eq(cursor), items::updated_at.eq(Utc::now())))
            .execute(conn)?;
        Ok(())
    }
}
