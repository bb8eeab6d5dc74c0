use serde::{Deserialize, Serialize};

use crate::model::role::Role;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Claims of the signed session cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub jti: String,
}
