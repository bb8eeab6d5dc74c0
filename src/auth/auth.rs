use crate::{error::AppError, model::role::Role};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

/// Signed-in user, placed in the request extensions by the session middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| AppError::Unauthorized("Login required".into())),
        )
    }
}

impl AuthUser {
    pub fn require_developer(&self) -> Result<(), AppError> {
        if self.role.can_manage_assets() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Developer only".into()))
        }
    }
}
