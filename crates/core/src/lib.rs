pub mod app_state;
pub mod clients;
pub mod queue;
pub mod repositories;
pub mod services;

pub use app_state::AppState;
