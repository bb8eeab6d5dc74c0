use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    sqlx::Type,
    ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    #[strum(serialize = "DONE")]
    Done,
    #[strum(serialize = "MISSED")]
    Missed,
}

/// One PM outcome, unique per `(asset_id, week_number)`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub asset_id: String,
    pub week_number: i64,
    pub status: AttendanceStatus,
    pub recorded_on: NaiveDateTime,
}
