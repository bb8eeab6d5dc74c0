#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use chrono::NaiveDate;
use pm_tracker::{
    auth::{SESSION_COOKIE, jwt::generate_session_token, provider::AuthProvider},
    config::Config,
    db::init_db,
    model::{
        asset::{AssetStatus, NewAsset},
        role::Role,
    },
    store::assets::create_asset,
};
use sqlx::SqlitePool;

pub const SECRET: &str = "test-session-secret";

pub fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".into(),
        database_url: "sqlite::memory:".into(),
        database_max_connections: 1,
        session_secret: SECRET.into(),
        session_ttl: 3600,
        reference_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        rate_login_per_min: 1000,
        developer_password: "dev-pass".into(),
        maintenance_password: "maint-pass".into(),
        log_dir: "logs".into(),
    }
}

/// Plain-text credentials; keeps argon2 out of the request tests.
pub struct FixedAuthProvider;

impl AuthProvider for FixedAuthProvider {
    fn authenticate(&self, username: &str, password: &str) -> Option<Role> {
        match (username, password) {
            ("developer", "dev-pass") => Some(Role::Developer),
            ("user", "maint-pass") => Some(Role::Maintenance),
            _ => None,
        }
    }
}

pub fn provider() -> Arc<dyn AuthProvider> {
    Arc::new(FixedAuthProvider)
}

// in-memory sqlite lives per connection
pub async fn test_pool() -> SqlitePool {
    init_db("sqlite::memory:", 1)
        .await
        .expect("Failed to create memory pool")
}

pub fn session(role: Role) -> Cookie<'static> {
    let username = match role {
        Role::Developer => "developer",
        Role::Maintenance => "user",
    };
    let token = generate_session_token(username, role, SECRET, 3600).unwrap();
    Cookie::new(SESSION_COOKIE, token)
}

pub fn new_asset(asset_id: &str, status: AssetStatus) -> NewAsset {
    NewAsset {
        asset_id: asset_id.into(),
        asset_name: format!("{asset_id} name"),
        asset_type: "Pump".into(),
        status,
    }
}

/// Registers `A-01` .. `A-{count}` in slot order.
pub async fn seed_assets(pool: &SqlitePool, count: usize) -> Vec<String> {
    let mut ids = Vec::with_capacity(count);
    for n in 1..=count {
        let id = format!("A-{n:02}");
        create_asset(pool, &new_asset(&id, AssetStatus::Active))
            .await
            .unwrap();
        ids.push(id);
    }
    ids
}

#[macro_export]
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($pool.clone()))
                .app_data(actix_web::web::Data::new($crate::common::test_config()))
                .app_data(actix_web::web::Data::new(
                    pm_tracker::rotation::Schedule::new(
                        $crate::common::test_config().reference_date,
                    ),
                ))
                .app_data(actix_web::web::Data::from($crate::common::provider()))
                .app_data(actix_web::web::Data::from(std::sync::Arc::new(
                    pm_tracker::exchange::JsonTableCodec,
                )
                    as std::sync::Arc<dyn pm_tracker::exchange::AssetTableCodec>))
                .configure(|cfg| {
                    pm_tracker::routes::configure(cfg, &$crate::common::test_config())
                }),
        )
        .await
    };
}
