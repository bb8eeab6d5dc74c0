use std::time::{SystemTime, UNIX_EPOCH};

use crate::{model::role::Role, models::SessionClaims};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or(0)
}

pub fn generate_session_token(
    username: &str,
    role: Role,
    secret: &str,
    ttl: usize,
) -> Result<String, Error> {
    let claims = SessionClaims {
        sub: username.to_string(),
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, String> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_user_and_role() {
        let token = generate_session_token("user", Role::Maintenance, "secret", 60).unwrap();
        let claims = verify_session_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, "user");
        assert_eq!(claims.role, Role::Maintenance);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = generate_session_token("developer", Role::Developer, "secret", 60).unwrap();
        assert!(verify_session_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = SessionClaims {
            sub: "developer".into(),
            role: Role::Developer,
            exp: 1_000,
            jti: "x".into(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert!(verify_session_token(&token, "secret").is_err());
    }
}
