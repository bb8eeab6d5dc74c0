use chrono::{Local, NaiveDateTime, Timelike};

/// true when `e` is a UNIQUE constraint failure.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Local wall-clock time at second precision, as stored in `recorded_on`.
pub fn local_timestamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
