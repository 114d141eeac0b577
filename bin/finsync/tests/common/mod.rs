use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use finsync_core::app_state::{AppState, DbPool};
use finsync_core::queue::{JobQueue, QueueJob};
use finsync_primitives::error::ApiError;
use finsync_primitives::models::app_state::{AppConfig, PlaidInfo};
use finsync_primitives::models::entities::enum_types::ItemStatus;
use finsync_primitives::models::entities::item::Item;
use finsync_primitives::schema::{accounts, items, users};
use secrecy::SecretString;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Pool against TEST_DATABASE_URL with migrations applied, or `None` so the
/// test can skip when no database is reachable.
#[allow(dead_code)]
pub fn try_test_db_pool() -> Option<DbPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(5)
        .connection_timeout(Duration::from_secs(3))
        .build(manager)
        .map_err(|e| eprintln!("test database unavailable: {}", e))
        .ok()?;

    let mut conn = pool.get().ok()?;
    run_test_migrations(&mut conn);
    Some(pool)
}

/// Pool that fails only when a connection is actually requested. Enough for
/// tests that never touch the database.
#[allow(dead_code)]
pub fn unchecked_db_pool() -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new("postgres://invalid");
    Pool::builder()
        .connection_timeout(Duration::from_millis(100))
        .build_unchecked(manager)
}

#[allow(dead_code)]
pub fn test_config(plaid_api_url: &str) -> AppConfig {
    AppConfig {
        plaid_details: PlaidInfo {
            plaid_client_id: "test_client_id".to_string(),
            plaid_secret: SecretString::from("test_plaid_secret"),
            plaid_api_url: plaid_api_url.to_string(),
        },
        refresh_interval_hours: 12,
        refresh_batch_size: 10,
    }
}

#[allow(dead_code)]
pub fn test_state(pool: DbPool, plaid_api_url: &str, queue: Arc<dyn JobQueue>) -> Arc<AppState> {
    AppState::new(pool, test_config(plaid_api_url), queue).expect("failed to build test state")
}

/// Queue double that records every call instead of executing anything.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingQueue {
    pub enqueued: Mutex<Vec<QueueJob>>,
    pub delayed: Mutex<Vec<(QueueJob, Duration)>>,
    pub cleaned: Mutex<Vec<String>>,
}

#[async_trait]
impl JobQueue for RecordingQueue {
    async fn enqueue(&self, job: QueueJob) -> Result<String, ApiError> {
        self.enqueued.lock().unwrap().push(job);
        Ok(Uuid::new_v4().to_string())
    }

    async fn enqueue_delayed(&self, job: QueueJob, delay: Duration) -> Result<String, ApiError> {
        self.delayed.lock().unwrap().push((job, delay));
        Ok(Uuid::new_v4().to_string())
    }

    async fn clean_delayed(&self, job_key: &str) {
        self.cleaned.lock().unwrap().push(job_key.to_string());
    }
}

#[allow(dead_code)]
pub fn run_test_migrations(conn: &mut PgConnection) {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../../migrations");

    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}

#[allow(dead_code)]
pub fn seed_user(conn: &mut PgConnection) -> Uuid {
    diesel::insert_into(users::table)
        .values(users::email.eq(format!("user_{}@example.com", Uuid::new_v4())))
        .returning(users::id)
        .get_result::<Uuid>(conn)
        .expect("failed to seed user")
}

#[allow(dead_code)]
pub fn seed_item(
    conn: &mut PgConnection,
    user_id: Uuid,
    access_token: &str,
    cursor: Option<&str>,
) -> Item {
    diesel::insert_into(items::table)
        .values((
            items::user_id.eq(user_id),
            items::external_item_id.eq(format!("item-{}", Uuid::new_v4())),
            items::access_token.eq(access_token),
            items::cursor.eq(cursor),
            items::status.eq(ItemStatus::Good),
        ))
        .get_result::<Item>(conn)
        .expect("failed to seed item")
}

#[allow(dead_code)]
pub fn seed_account(conn: &mut PgConnection, item_id: Uuid, external_account_id: &str) -> Uuid {
    diesel::insert_into(accounts::table)
        .values((
            accounts::item_id.eq(item_id),
            accounts::external_account_id.eq(external_account_id),
            accounts::name.eq("Checking"),
            accounts::account_type.eq("depository"),
        ))
        .returning(accounts::id)
        .get_result::<Uuid>(conn)
        .expect("failed to seed account")
}

#[allow(dead_code)]
pub fn stored_cursor(conn: &mut PgConnection, item_id: Uuid) -> Option<String> {
    items::table
        .find(item_id)
        .select(items::cursor)
        .get_result::<Option<String>>(conn)
        .expect("failed to read cursor")
}
