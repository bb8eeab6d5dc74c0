//! Tabular asset exchange used by the import and export routes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    model::asset::{Asset, AssetStatus, NewAsset},
};

/// One asset as it appears in an exchanged table. Rotation slots are not
/// exchanged: imported rows are appended to the end of the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssetRow {
    pub asset_id: String,
    pub asset_name: String,
    pub asset_type: String,
    #[serde(default)]
    pub status: AssetStatus,
}

impl From<&Asset> for AssetRow {
    fn from(asset: &Asset) -> Self {
        Self {
            asset_id: asset.asset_id.clone(),
            asset_name: asset.asset_name.clone(),
            asset_type: asset.asset_type.clone(),
            status: asset.status,
        }
    }
}

impl AssetRow {
    /// Trims every field and rejects blank ones.
    pub fn normalized(&self) -> Result<NewAsset, AppError> {
        let field = |name: &str, value: &str| {
            let value = value.trim();
            if value.is_empty() {
                Err(AppError::BadRequest(format!("{name} must not be empty")))
            } else {
                Ok(value.to_string())
            }
        };

        Ok(NewAsset {
            asset_id: field("asset_id", &self.asset_id)?,
            asset_name: field("asset_name", &self.asset_name)?,
            asset_type: field("asset_type", &self.asset_type)?,
            status: self.status,
        })
    }
}

/// Serialization format of an exchanged asset table.
pub trait AssetTableCodec: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn encode(&self, rows: &[AssetRow]) -> Result<Vec<u8>, AppError>;

    fn decode(&self, body: &[u8]) -> Result<Vec<AssetRow>, AppError>;
}

/// JSON array of [`AssetRow`] objects.
pub struct JsonTableCodec;

impl AssetTableCodec for JsonTableCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode(&self, rows: &[AssetRow]) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec_pretty(rows).map_err(|e| AppError::Internal(e.to_string()))
    }

    fn decode(&self, body: &[u8]) -> Result<Vec<AssetRow>, AppError> {
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid asset table: {e}")))
    }
}
