use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;

use pm_tracker::{
    auth::provider::{AuthProvider, StaticAuthProvider},
    config::Config,
    db::init_db,
    exchange::{AssetTableCodec, JsonTableCodec},
    rotation::Schedule,
    routes,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url, config.database_max_connections).await?;

    let schedule = Schedule::new(config.reference_date);
    let current = schedule.current_week();
    info!(
        reference_date = %config.reference_date,
        current_week = current.get(),
        label = %schedule.calendar_label(current),
        "Rotation schedule loaded"
    );

    let provider: Arc<dyn AuthProvider> = Arc::new(
        StaticAuthProvider::from_config(&config)
            .map_err(|e| anyhow::anyhow!("failed to hash account passwords: {e}"))?,
    );
    let codec: Arc<dyn AssetTableCodec> = Arc::new(JsonTableCodec);

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(schedule))
            .app_data(Data::from(provider.clone()))
            .app_data(Data::from(codec.clone()))
            .configure(|cfg| routes::configure(cfg, &config_data))
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
