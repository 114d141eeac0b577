use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::ItemStatus"]
#[strum(serialize_all = "lowercase")]
pub enum ItemStatus {
    Good,
    Error,
    Revoked,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::RefreshJobStatus"]
#[strum(serialize_all = "lowercase")]
pub enum RefreshJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::RefreshJobType"]
#[strum(serialize_all = "lowercase")]
pub enum RefreshJobType {
    Manual,
    Scheduled,
}
