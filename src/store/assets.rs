use std::collections::HashSet;

use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    model::asset::{Asset, AssetStatus, NewAsset},
    utils::db_utils::is_unique_violation,
};

const ASSET_COLUMNS: &str = "id, asset_id, asset_name, asset_type, rotation_slot, status";

/// All assets, active or not, in rotation order.
pub async fn list_assets(pool: &SqlitePool) -> Result<Vec<Asset>, AppError> {
    let sql = format!("SELECT {ASSET_COLUMNS} FROM assets ORDER BY rotation_slot, id");
    Ok(sqlx::query_as::<_, Asset>(&sql).fetch_all(pool).await?)
}

/// Active assets in rotation order, the input of the weekly rotation.
pub async fn list_active_assets(pool: &SqlitePool) -> Result<Vec<Asset>, AppError> {
    let sql = format!(
        "SELECT {ASSET_COLUMNS} FROM assets WHERE status = ? ORDER BY rotation_slot, id"
    );
    Ok(sqlx::query_as::<_, Asset>(&sql)
        .bind(AssetStatus::Active)
        .fetch_all(pool)
        .await?)
}

pub async fn get_asset(pool: &SqlitePool, id: i64) -> Result<Option<Asset>, AppError> {
    let sql = format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = ?");
    Ok(sqlx::query_as::<_, Asset>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

pub async fn count_assets(pool: &SqlitePool) -> Result<i64, AppError> {
    Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assets")
        .fetch_one(pool)
        .await?)
}

async fn next_slot(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COALESCE(MAX(rotation_slot), 0) + 1 FROM assets")
        .fetch_one(conn)
        .await
}

/// Slot the next registered asset would receive.
pub async fn next_rotation_slot(pool: &SqlitePool) -> Result<i64, AppError> {
    let mut conn = pool.acquire().await?;
    Ok(next_slot(&mut *conn).await?)
}

/// Registers an asset at the end of the rotation.
///
/// The slot lookup and the insert share one transaction; a duplicate
/// `asset_id` rolls both back and surfaces as [`AppError::Conflict`].
pub async fn create_asset(pool: &SqlitePool, new: &NewAsset) -> Result<Asset, AppError> {
    let mut tx = pool.begin().await?;

    let slot = next_slot(&mut *tx).await?;

    let sql = format!(
        "INSERT INTO assets (asset_id, asset_name, asset_type, rotation_slot, status)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {ASSET_COLUMNS}"
    );
    let inserted = sqlx::query_as::<_, Asset>(&sql)
        .bind(&new.asset_id)
        .bind(&new.asset_name)
        .bind(&new.asset_type)
        .bind(slot)
        .bind(new.status)
        .fetch_one(&mut *tx)
        .await;

    let asset = match inserted {
        Ok(asset) => asset,
        Err(e) if is_unique_violation(&e) => {
            info!(asset_id = %new.asset_id, "Duplicate asset id rejected");
            return Err(AppError::Conflict("Asset ID already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    tx.commit().await?;

    debug!(asset_id = %asset.asset_id, slot, "Asset registered");
    Ok(asset)
}

/// Changes name and type only. Returns false when no asset has `id`.
pub async fn update_asset(
    pool: &SqlitePool,
    id: i64,
    asset_name: &str,
    asset_type: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE assets SET asset_name = ?, asset_type = ? WHERE id = ?")
        .bind(asset_name)
        .bind(asset_type)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct ImportSummary {
    pub imported: usize,
    /// Known identifiers whose status was changed by the import.
    pub updated: Vec<String>,
    /// Known identifiers already carrying the imported status, or repeated in
    /// the input, left untouched.
    pub skipped: Vec<String>,
}

/// Appends new assets in row order. Rows naming a known asset only set its
/// status; slot, name and type stay as they are. All rows commit together.
pub async fn import_assets(
    pool: &SqlitePool,
    rows: &[NewAsset],
) -> Result<ImportSummary, AppError> {
    let mut tx = pool.begin().await?;
    let mut summary = ImportSummary::default();
    let mut seen = HashSet::new();

    for row in rows {
        if !seen.insert(row.asset_id.as_str()) {
            summary.skipped.push(row.asset_id.clone());
            continue;
        }

        let known: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE asset_id = ?")
            .bind(&row.asset_id)
            .fetch_one(&mut *tx)
            .await?;

        if known > 0 {
            let changed = sqlx::query(
                "UPDATE assets SET status = ? WHERE asset_id = ? AND status <> ?",
            )
            .bind(row.status)
            .bind(&row.asset_id)
            .bind(row.status)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if changed > 0 {
                debug!(asset_id = %row.asset_id, status = %row.status, "Asset status changed");
                summary.updated.push(row.asset_id.clone());
            } else {
                summary.skipped.push(row.asset_id.clone());
            }
            continue;
        }

        let slot = next_slot(&mut *tx).await?;
        sqlx::query(
            "INSERT INTO assets (asset_id, asset_name, asset_type, rotation_slot, status)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&row.asset_id)
        .bind(&row.asset_name)
        .bind(&row.asset_type)
        .bind(slot)
        .bind(row.status)
        .execute(&mut *tx)
        .await?;
        summary.imported += 1;
    }

    tx.commit().await?;

    info!(
        imported = summary.imported,
        updated = summary.updated.len(),
        skipped = summary.skipped.len(),
        "Asset import committed"
    );
    Ok(summary)
}
