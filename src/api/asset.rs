use crate::{
    auth::auth::AuthUser,
    error::AppError,
    exchange::AssetRow,
    model::asset::{Asset, AssetStatus},
    store::assets,
};
use actix_web::{HttpResponse, http::header, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateAssetForm {
    #[schema(example = "AHU-01")]
    pub asset_id: String,
    #[schema(example = "Air handling unit 1")]
    pub asset_name: String,
    #[schema(example = "HVAC")]
    pub asset_type: String,
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct EditAssetForm {
    #[schema(example = "Air handling unit 1")]
    pub asset_name: String,
    #[schema(example = "HVAC")]
    pub asset_type: String,
}

#[derive(Serialize, ToSchema)]
pub struct AssetListResponse {
    pub data: Vec<Asset>,
    #[schema(example = 10)]
    pub total: usize,
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn required(name: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{name} must not be empty")));
    }
    Ok(value.to_string())
}

/// Asset master, in rotation order
#[utoipa::path(
    get,
    path = "/asset-master",
    responses(
        (status = 200, description = "All assets ordered by rotation slot", body = AssetListResponse),
        (status = 303, description = "Not signed in, redirected to /login")
    ),
    tag = "Assets"
)]
pub async fn list_assets(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let data = assets::list_assets(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(AssetListResponse {
        total: data.len(),
        data,
    }))
}

/// Add-asset form data
#[utoipa::path(
    get,
    path = "/asset-master/add",
    responses(
        (status = 200, description = "Slot the next asset will receive", body = Object, example = json!({
            "next_rotation_slot": 11
        }))
    ),
    tag = "Assets"
)]
pub async fn add_asset_form(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    let next_rotation_slot = assets::next_rotation_slot(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "next_rotation_slot": next_rotation_slot
    })))
}

/// Register an asset at the end of the rotation
#[utoipa::path(
    post,
    path = "/asset-master/add",
    request_body(content = CreateAssetForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirected to /asset-master"),
        (status = 400, description = "Blank field"),
        (status = 403, description = "Developer only"),
        (status = 409, description = "Asset ID already exists", body = Object, example = json!({
            "error": "Asset ID already exists"
        }))
    ),
    tag = "Assets"
)]
pub async fn add_asset(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    form: web::Form<CreateAssetForm>,
) -> Result<HttpResponse, AppError> {
    auth.require_developer()?;

    let new = AssetRow {
        asset_id: form.asset_id.clone(),
        asset_name: form.asset_name.clone(),
        asset_type: form.asset_type.clone(),
        status: AssetStatus::Active,
    }
    .normalized()?;

    let asset = assets::create_asset(pool.get_ref(), &new).await?;
    info!(asset_id = %asset.asset_id, slot = asset.rotation_slot, by = %auth.username, "Asset created");

    Ok(see_other("/asset-master"))
}

/// Edit-asset form data
#[utoipa::path(
    get,
    path = "/asset-master/edit/{id}",
    params(
        ("id" = i64, Path, description = "Numeric asset row id")
    ),
    responses(
        (status = 200, description = "Asset found", body = Asset),
        (status = 404, description = "Asset not found")
    ),
    tag = "Assets"
)]
pub async fn edit_asset_form(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    match assets::get_asset(pool.get_ref(), id).await? {
        Some(asset) => Ok(HttpResponse::Ok().json(asset)),
        None => Err(AppError::NotFound("Asset not found".into())),
    }
}

/// Rename or retype an asset
#[utoipa::path(
    post,
    path = "/asset-master/edit/{id}",
    params(
        ("id" = i64, Path, description = "Numeric asset row id")
    ),
    request_body(content = EditAssetForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirected to /asset-master"),
        (status = 403, description = "Developer only"),
        (status = 404, description = "Asset not found")
    ),
    tag = "Assets"
)]
pub async fn edit_asset(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    form: web::Form<EditAssetForm>,
) -> Result<HttpResponse, AppError> {
    auth.require_developer()?;

    let id = path.into_inner();
    let asset_name = required("asset_name", &form.asset_name)?;
    let asset_type = required("asset_type", &form.asset_type)?;

    if !assets::update_asset(pool.get_ref(), id, &asset_name, &asset_type).await? {
        return Err(AppError::NotFound("Asset not found".into()));
    }

    info!(id, by = %auth.username, "Asset updated");
    Ok(see_other("/asset-master"))
}
