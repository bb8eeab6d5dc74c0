use std::collections::HashMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    model::attendance::{AttendanceRecord, AttendanceStatus},
    rotation::{Schedule, WeekNumber, rotation_group},
    store::assets::list_active_assets,
};

/// One submitted `asset_id|STATUS` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    pub asset_id: String,
    pub status: AttendanceStatus,
}

impl FromStr for AttendanceEntry {
    type Err = AppError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        // asset ids may contain '|', the status never does
        let (asset_id, status) = token
            .rsplit_once('|')
            .ok_or_else(|| AppError::BadRequest(format!("Malformed attendance entry {token:?}")))?;

        let asset_id = asset_id.trim();
        if asset_id.is_empty() {
            return Err(AppError::BadRequest(format!(
                "Missing asset id in attendance entry {token:?}"
            )));
        }

        let status = status.trim().parse::<AttendanceStatus>().map_err(|_| {
            AppError::BadRequest(format!("Status must be DONE or MISSED, got {status:?}"))
        })?;

        Ok(Self {
            asset_id: asset_id.to_string(),
            status,
        })
    }
}

/// Upserts every entry for `week` with one shared `recorded_on`.
///
/// The batch runs in a single transaction: either every row of the
/// submission is stored or none is. Existing `(asset_id, week)` rows are
/// overwritten. An identifier missing from the asset master rejects the
/// whole batch.
pub async fn record_week(
    pool: &SqlitePool,
    week: WeekNumber,
    entries: &[AttendanceEntry],
    recorded_on: NaiveDateTime,
) -> Result<usize, AppError> {
    let mut tx = pool.begin().await?;

    for entry in entries {
        let known: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets WHERE asset_id = ?")
            .bind(&entry.asset_id)
            .fetch_one(&mut *tx)
            .await?;
        if known == 0 {
            debug!(asset_id = %entry.asset_id, "Attendance for unknown asset rejected");
            return Err(AppError::BadRequest(format!("Unknown asset {:?}", entry.asset_id)));
        }

        sqlx::query(
            r#"
            INSERT INTO pm_attendance (asset_id, week_number, status, recorded_on)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(asset_id, week_number)
            DO UPDATE SET status = excluded.status, recorded_on = excluded.recorded_on
            "#,
        )
        .bind(&entry.asset_id)
        .bind(i64::from(week.get()))
        .bind(entry.status)
        .bind(recorded_on)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(week = week.get(), rows = entries.len(), %recorded_on, "Attendance recorded");
    Ok(entries.len())
}

pub async fn records_for_week(
    pool: &SqlitePool,
    week: WeekNumber,
) -> Result<Vec<AttendanceRecord>, AppError> {
    Ok(sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT id, asset_id, week_number, status, recorded_on
        FROM pm_attendance
        WHERE week_number = ?
        ORDER BY asset_id
        "#,
    )
    .bind(i64::from(week.get()))
    .fetch_all(pool)
    .await?)
}

/// Timestamp shown for a week: the most recent save among its records.
pub fn latest_recorded_on(records: &[AttendanceRecord]) -> Option<NaiveDateTime> {
    records.iter().map(|r| r.recorded_on).max()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekViewRow {
    pub asset_id: String,
    pub asset_name: String,
    pub asset_type: String,
    pub rotation_slot: i64,
    /// `None` until an outcome is recorded for this week.
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekView {
    #[schema(value_type = u32, example = 3)]
    pub week_number: WeekNumber,
    #[schema(example = "Week 03 - Jan 2024")]
    pub label: String,
    #[schema(value_type = Option<String>, format = "date")]
    pub week_start: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub recorded_on: Option<NaiveDateTime>,
    pub rows: Vec<WeekViewRow>,
}

/// The week's rotation group left-joined with the outcomes recorded for it.
pub async fn week_view(
    pool: &SqlitePool,
    schedule: &Schedule,
    week: WeekNumber,
) -> Result<WeekView, AppError> {
    let active = list_active_assets(pool).await?;
    let selected = rotation_group(week, &active);
    let records = records_for_week(pool, week).await?;

    debug!(
        week = week.get(),
        active = active.len(),
        selected = selected.len(),
        records = records.len(),
        "Assembling week view"
    );

    let statuses: HashMap<&str, AttendanceStatus> = records
        .iter()
        .map(|r| (r.asset_id.as_str(), r.status))
        .collect();

    let rows = selected
        .iter()
        .map(|asset| WeekViewRow {
            asset_id: asset.asset_id.clone(),
            asset_name: asset.asset_name.clone(),
            asset_type: asset.asset_type.clone(),
            rotation_slot: asset.rotation_slot,
            status: statuses.get(asset.asset_id.as_str()).copied(),
        })
        .collect();

    Ok(WeekView {
        week_number: week,
        label: schedule.calendar_label(week),
        week_start: schedule.week_start(week),
        recorded_on: latest_recorded_on(&records),
        rows,
    })
}
