use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dotenvy::dotenv;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub database_max_connections: u32,

    // Session cookie
    pub session_secret: String,
    pub session_ttl: usize,

    /// Week 1 starts on this date.
    pub reference_date: NaiveDate,

    // Rate limiting
    pub rate_login_per_min: u32,

    // Static accounts
    pub developer_password: String,
    pub maintenance_password: String,

    pub log_dir: String,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn parsed_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let reference_date = match env::var("ROTATION_REFERENCE_DATE") {
            Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .with_context(|| format!("ROTATION_REFERENCE_DATE must be YYYY-MM-DD, got {raw:?}"))?,
            Err(_) => default_reference_date(),
        };

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://pm.db?mode=rwc".to_string()),
            database_max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 5)?,
            session_secret: required("SESSION_SECRET")?,
            session_ttl: parsed_or("SESSION_TTL", 28_800)?, // default 8 hours
            reference_date,
            rate_login_per_min: parsed_or("RATE_LOGIN_PER_MIN", 30)?,
            developer_password: required("DEVELOPER_PASSWORD")?,
            maintenance_password: required("MAINTENANCE_PASSWORD")?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}
