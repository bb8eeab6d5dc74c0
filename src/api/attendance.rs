use std::fmt::{self, Write};

use crate::{
    auth::auth::AuthUser,
    error::AppError,
    rotation::{Schedule, WeekNumber},
    store::attendance::{self, AttendanceEntry, WeekView},
    utils::db_utils::local_timestamp,
};
use actix_web::{HttpResponse, http::header, web};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeekQuery {
    /// Week number; defaults to the current week
    pub week: Option<String>,
    /// Entry mode flag (`1`, `true`, `yes`, `on`)
    pub entry: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct WeekViewResponse {
    pub entry_mode: bool,
    #[serde(flatten)]
    pub view: WeekView,
}

fn is_truthy(flag: Option<&str>) -> bool {
    matches!(
        flag.map(|f| f.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Weekly attendance for the week's rotation group
#[utoipa::path(
    get,
    path = "/pm-attendance",
    params(WeekQuery),
    responses(
        (status = 200, description = "Selected assets merged with recorded statuses", body = WeekViewResponse),
        (status = 400, description = "Week is not a positive integer")
    ),
    tag = "Attendance"
)]
pub async fn attendance_view(
    pool: web::Data<SqlitePool>,
    schedule: web::Data<Schedule>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse, AppError> {
    let week = match query.week.as_deref().map(str::trim) {
        None | Some("") => schedule.current_week(),
        Some(raw) => raw
            .parse::<WeekNumber>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
    };

    let view = attendance::week_view(pool.get_ref(), &schedule, week).await?;

    Ok(HttpResponse::Ok().json(WeekViewResponse {
        entry_mode: is_truthy(query.entry.as_deref()),
        view,
    }))
}

/// Parses the submitted form: one `week` field and any number of
/// `status=ASSET|STATUS` fields. Every token is validated before anything
/// is written.
pub fn parse_submission(
    fields: &[(String, String)],
) -> Result<(WeekNumber, Vec<AttendanceEntry>), AppError> {
    let mut week = None;
    let mut entries = Vec::new();

    for (key, value) in fields {
        match key.as_str() {
            "week" => {
                week = Some(
                    value
                        .parse::<WeekNumber>()
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                )
            }
            "status" => entries.push(value.parse::<AttendanceEntry>()?),
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    let week = week.ok_or_else(|| AppError::BadRequest("week is required".into()))?;
    Ok((week, entries))
}

/// Save the week's outcomes
#[utoipa::path(
    post,
    path = "/pm-attendance/save",
    request_body(
        content = String,
        content_type = "application/x-www-form-urlencoded",
        example = json!("week=3&status=AHU-01%7CDONE&status=AHU-02%7CMISSED")
    ),
    responses(
        (status = 303, description = "Saved, redirected to the week's view"),
        (status = 400, description = "Missing week or malformed entry")
    ),
    tag = "Attendance"
)]
#[instrument(name = "attendance_save", skip(auth, pool, form), fields(user = %auth.username))]
pub async fn save_attendance(
    auth: AuthUser,
    pool: web::Data<SqlitePool>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let (week, entries) = parse_submission(&form)?;

    if entries.is_empty() {
        warn!(week = week.get(), "Attendance submitted without entries");
    }

    attendance::record_week(pool.get_ref(), week, &entries, local_timestamp()).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/pm-attendance?week={week}")))
        .finish())
}

fn write_print_sheet(out: &mut impl Write, view: &WeekView) -> fmt::Result {
    writeln!(out, "PM ATTENDANCE - WEEK {} ({})", view.week_number, view.label)?;
    match view.recorded_on {
        Some(ts) => writeln!(out, "Recorded on: {}", ts.format("%Y-%m-%d %H:%M"))?,
        None => writeln!(out, "Recorded on: -")?,
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:<4} {:<16} {:<28} {:<16} {:<8}",
        "#", "ASSET ID", "NAME", "TYPE", "STATUS"
    )?;
    writeln!(out, "{}", "-".repeat(76))?;

    if view.rows.is_empty() {
        writeln!(out, "(no assets scheduled this week)")?;
    }

    for (n, row) in view.rows.iter().enumerate() {
        let status = row.status.map(|s| s.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{:<4} {:<16} {:<28} {:<16} {:<8}",
            n + 1,
            row.asset_id,
            row.asset_name,
            row.asset_type,
            status
        )?;
    }

    Ok(())
}

/// Fixed-width sheet for printing a week's checklist.
pub fn render_print_sheet(view: &WeekView) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    write_print_sheet(&mut out, view).unwrap_or_default();
    out
}

/// Printable sheet for a week
#[utoipa::path(
    get,
    path = "/pm-attendance/print",
    params(
        ("week" = Option<String>, Query, description = "Week number; missing or invalid values print the current week")
    ),
    responses(
        (status = 200, description = "Plain-text sheet", content_type = "text/plain", body = String)
    ),
    tag = "Attendance"
)]
pub async fn print_attendance(
    pool: web::Data<SqlitePool>,
    schedule: web::Data<Schedule>,
    query: web::Query<WeekQuery>,
) -> Result<HttpResponse, AppError> {
    let week = query
        .week
        .as_deref()
        .and_then(|raw| raw.parse::<WeekNumber>().ok())
        .unwrap_or_else(|| {
            debug!(week = ?query.week, "Printing current week");
            schedule.current_week()
        });

    let view = attendance::week_view(pool.get_ref(), &schedule, week).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(render_print_sheet(&view)))
}
