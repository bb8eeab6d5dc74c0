use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    sqlx::Type,
    ToSchema,
)]
pub enum AssetStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "asset_id": "AHU-01",
        "asset_name": "Air handling unit 1",
        "asset_type": "HVAC",
        "rotation_slot": 1,
        "status": "Active"
    })
)]
pub struct Asset {
    pub id: i64,

    /// Externally assigned, globally unique identifier.
    #[schema(example = "AHU-01")]
    pub asset_id: String,

    #[schema(example = "Air handling unit 1")]
    pub asset_name: String,

    #[schema(example = "HVAC")]
    pub asset_type: String,

    /// Ordering key for the weekly rotation; not unique.
    #[schema(example = 1)]
    pub rotation_slot: i64,

    pub status: AssetStatus,
}

/// Fields supplied when registering an asset.
#[derive(Debug, Clone)]
pub struct NewAsset {
    pub asset_id: String,
    pub asset_name: String,
    pub asset_type: String,
    pub status: AssetStatus,
}
