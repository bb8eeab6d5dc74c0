use crate::{
    auth::auth::AuthUser,
    error::AppError,
    exchange::{AssetRow, AssetTableCodec},
    store::assets,
};
use actix_web::{HttpResponse, http::header, web};
use sqlx::SqlitePool;
use tracing::info;

/// Import instructions
#[utoipa::path(
    get,
    path = "/asset-master/import",
    responses(
        (status = 200, description = "Expected table format", body = Object)
    ),
    tag = "Assets"
)]
pub async fn import_form(codec: web::Data<dyn AssetTableCodec>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "content_type": codec.content_type(),
        "columns": ["asset_id", "asset_name", "asset_type", "status"]
    }))
}

/// Import an asset table
#[utoipa::path(
    post,
    path = "/asset-master/import",
    request_body(content = Vec<AssetRow>, content_type = "application/json"),
    responses(
        (status = 200, description = "New rows appended, known ids updated", body = assets::ImportSummary),
        (status = 400, description = "Malformed table or blank field"),
        (status = 403, description = "Developer only")
    ),
    tag = "Assets"
)]
pub async fn import_assets(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    codec: web::Data<dyn AssetTableCodec>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    auth.require_developer()?;

    let rows = codec
        .decode(&body)?
        .iter()
        .map(AssetRow::normalized)
        .collect::<Result<Vec<_>, _>>()?;

    let summary = assets::import_assets(pool.get_ref(), &rows).await?;
    info!(
        imported = summary.imported,
        updated = ?summary.updated,
        skipped = ?summary.skipped,
        by = %auth.username,
        "Asset table imported"
    );

    Ok(HttpResponse::Ok().json(summary))
}

/// Export the asset master
#[utoipa::path(
    get,
    path = "/asset-master/export",
    responses(
        (status = 200, description = "Every asset in rotation order", body = Vec<AssetRow>)
    ),
    tag = "Assets"
)]
pub async fn export_assets(
    pool: web::Data<SqlitePool>,
    codec: web::Data<dyn AssetTableCodec>,
) -> Result<HttpResponse, AppError> {
    let rows: Vec<AssetRow> = assets::list_assets(pool.get_ref())
        .await?
        .iter()
        .map(AssetRow::from)
        .collect();

    let body = codec.encode(&rows)?;

    Ok(HttpResponse::Ok()
        .content_type(codec.content_type())
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"assets-export\"",
        ))
        .body(body))
}
