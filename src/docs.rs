use crate::api::asset::{AssetListResponse, CreateAssetForm, EditAssetForm};
use crate::api::attendance::WeekViewResponse;
use crate::exchange::AssetRow;
use crate::model::asset::{Asset, AssetStatus};
use crate::model::attendance::AttendanceStatus;
use crate::store::assets::ImportSummary;
use crate::store::attendance::{WeekView, WeekViewRow};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PM Tracker",
        version = "0.1.0",
        description = r#"
## Preventive maintenance attendance

Tracks physical assets and records weekly preventive-maintenance (PM)
attendance against a rotating subset of them.

### Rotation
- Active assets, ordered by rotation slot, are split into **4** contiguous groups
  of `ceil(total / 4)` assets.
- Week `w` inspects group `(w - 1) mod 4`. Weeks count 7-day periods from a fixed
  reference date, starting at 1.
- Groups are recomputed on every request: registering or deactivating an asset
  shifts future groups.

### Attendance
- One `DONE` / `MISSED` record per asset and week. Re-submitting overwrites it.
- A submission is stored atomically.

### Session
Every route except `/login` and this document requires the `pm_session` cookie
set by `POST /login`. Requests without a valid session are redirected to `/login`.
"#,
    ),
    paths(
        crate::api::dashboard::index,

        crate::api::asset::list_assets,
        crate::api::asset::add_asset_form,
        crate::api::asset::add_asset,
        crate::api::asset::edit_asset_form,
        crate::api::asset::edit_asset,

        crate::api::exchange::import_form,
        crate::api::exchange::import_assets,
        crate::api::exchange::export_assets,

        crate::api::attendance::attendance_view,
        crate::api::attendance::save_attendance,
        crate::api::attendance::print_attendance
    ),
    components(
        schemas(
            Asset,
            AssetStatus,
            AssetListResponse,
            CreateAssetForm,
            EditAssetForm,
            AssetRow,
            ImportSummary,
            AttendanceStatus,
            WeekView,
            WeekViewRow,
            WeekViewResponse
        )
    ),
    tags(
        (name = "Dashboard", description = "Session and current week"),
        (name = "Assets", description = "Asset master, import and export"),
        (name = "Attendance", description = "Weekly PM attendance"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_attendance_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/pm-attendance"));
        assert!(paths.contains_key("/pm-attendance/save"));
        assert!(paths.contains_key("/pm-attendance/print"));
        assert!(paths.contains_key("/asset-master/edit/{id}"));
    }
}
