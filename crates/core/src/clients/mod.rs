pub mod plaid;

pub use plaid::PlaidClient;
