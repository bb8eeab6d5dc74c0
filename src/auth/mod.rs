pub mod auth;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod provider;

pub const SESSION_COOKIE: &str = "pm_session";
