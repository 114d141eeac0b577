pub mod refresh_service;
pub mod sync_service;
pub mod webhook_service;

pub use refresh_service::RefreshService;
pub use sync_service::SyncService;
pub use webhook_service::{WebhookOutcome, WebhookService};
