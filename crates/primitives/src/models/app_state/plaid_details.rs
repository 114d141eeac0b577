use eyre::eyre;
use eyre::Report;
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct PlaidInfo {
    pub plaid_client_id: String,
    pub plaid_secret: SecretString,
    pub plaid_api_url: String,
}

impl PlaidInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            plaid_client_id: env::var("PLAID_CLIENT_ID")
                .map_err(|_| eyre!("PLAID_CLIENT_ID must be set"))?,

            plaid_secret: SecretString::new(
                env::var("PLAID_SECRET")
                    .map_err(|_| eyre!("PLAID_SECRET must be set"))?
                    .into(),
            ),

            plaid_api_url: env::var("PLAID_API_URL")
                .unwrap_or_else(|_| "https://sandbox.plaid.com".into()),
        })
    }
}
