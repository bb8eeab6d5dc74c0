use crate::{auth::auth::AuthUser, rotation::Schedule};
use actix_web::{HttpResponse, web};
use serde_json::json;

/// Landing page data: who is signed in and which week is running.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Session and current week", body = Object, example = json!({
            "username": "user",
            "role": "maintenance",
            "current_week": 42,
            "label": "Week 42 - Oct 2024"
        }))
    ),
    tag = "Dashboard"
)]
pub async fn index(auth: AuthUser, schedule: web::Data<Schedule>) -> HttpResponse {
    let week = schedule.current_week();

    HttpResponse::Ok().json(json!({
        "username": auth.username,
        "role": auth.role,
        "current_week": week,
        "label": schedule.calendar_label(week),
        "reference_date": schedule.reference(),
    }))
}
