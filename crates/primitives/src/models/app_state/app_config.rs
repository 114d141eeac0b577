use crate::models::app_state::plaid_details::PlaidInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub plaid_details: PlaidInfo,

    /// Hours between recurring refreshes for each user.
    pub refresh_interval_hours: i64,

    /// How many users to request per batch when fanning out refreshes.
    pub refresh_batch_size: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            plaid_details: PlaidInfo::new()?,

            refresh_interval_hours: env::var("REFRESH_INTERVAL_HOURS")
                .unwrap_or_else(|_| "12".into())
                .parse()?,

            refresh_batch_size: env::var("REFRESH_BATCH_SIZE")
                .unwrap_or_else(|_| "10".into())
                .parse()?,
        })
    }
}
