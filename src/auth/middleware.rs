use crate::auth::{SESSION_COOKIE, auth::AuthUser, jwt::verify_session_token};
use crate::config::Config;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
    web::Data,
};
use tracing::debug;

fn redirect_to_login(req: ServiceRequest) -> ServiceResponse<BoxBody> {
    let resp = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/login"))
        .finish();
    req.into_response(resp.map_into_boxed_body())
}

/// Requires a valid session cookie; anything else is sent to `/login`.
/// Missing, tampered and expired sessions are treated alike.
pub async fn session_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let secret = req
        .app_data::<Data<Config>>()
        .map(|config| config.session_secret.clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let token = match req.request().cookie(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => {
            debug!(path = %req.path(), "No session cookie");
            return Ok(redirect_to_login(req));
        }
    };

    let claims = match verify_session_token(&token, &secret) {
        Ok(c) => c,
        Err(e) => {
            debug!(path = %req.path(), error = %e, "Rejected session cookie");
            return Ok(redirect_to_login(req));
        }
    };

    req.extensions_mut().insert(AuthUser {
        username: claims.sub,
        role: claims.role,
    });

    next.call(req).await
}
