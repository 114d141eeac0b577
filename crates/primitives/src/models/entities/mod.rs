pub mod account;
pub mod enum_types;
pub mod item;
pub mod refresh_job;
pub mod transaction;
pub mod user;

pub use account::*;
pub use enum_types::*;
pub use item::*;
pub use refresh_job::*;
pub use transaction::*;
pub use user::*;
