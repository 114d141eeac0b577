use diesel::prelude::*;
use finsync_primitives::error::ApiError;
use finsync_primitives::schema::users;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub fn all_user_ids(conn: &mut PgConnection) -> Result<Vec<Uuid>, ApiError> {
        users::table
            .select(users::id)
            .order(users::created_at.asc())
            .load::<Uuid>(conn)
            .map_err(ApiError::from)
    }
}
