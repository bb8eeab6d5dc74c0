use crate::{
    auth::{SESSION_COOKIE, jwt::generate_session_token, provider::AuthProvider},
    config::Config,
    error::AppError,
    models::LoginForm,
};
use actix_web::{
    HttpResponse, Responder,
    cookie::{Cookie, SameSite, time::Duration},
    http::header,
    web,
};
use serde_json::json;
use tracing::{debug, error, info, instrument};

fn session_cookie(value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .finish()
}

pub async fn login_page() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Login required",
        "fields": ["username", "password"]
    }))
}

#[instrument(
    name = "auth_login",
    skip(form, provider, config),
    fields(username = %form.username)
)]
pub async fn login(
    form: web::Form<LoginForm>,
    provider: web::Data<dyn AuthProvider>,
    config: web::Data<Config>,
) -> Result<HttpResponse, AppError> {
    info!("Login request received");

    if form.username.trim().is_empty() || form.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password required".into(),
        ));
    }

    let role = provider
        .authenticate(&form.username, &form.password)
        .ok_or_else(|| {
            info!("Invalid credentials");
            AppError::Unauthorized("Invalid credentials".into())
        })?;

    debug!(%role, "Credentials accepted");

    let token = generate_session_token(
        &form.username,
        role,
        &config.session_secret,
        config.session_ttl,
    )
    .map_err(|e| {
        error!(error = %e, "Failed to sign session token");
        AppError::Internal("Failed to start session".into())
    })?;

    let cookie = session_cookie(token, Duration::seconds(config.session_ttl as i64));

    Ok(HttpResponse::SeeOther()
        .cookie(cookie)
        .insert_header((header::LOCATION, "/"))
        .finish())
}

pub async fn logout() -> impl Responder {
    HttpResponse::SeeOther()
        .cookie(session_cookie(String::new(), Duration::ZERO))
        .insert_header((header::LOCATION, "/login"))
        .finish()
}
