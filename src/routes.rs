use crate::{
    api::{asset, attendance, dashboard, exchange},
    auth::{handlers, middleware::session_middleware},
    config::Config,
    docs::ApiDoc,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, middleware::from_fn, web};
use utoipa::OpenApi;

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let requests_per_min = requests_per_min.max(1);
    let per_ms = (60_000 / u64::from(requests_per_min)).max(1);

    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .expect("period and burst size are non-zero");
    Governor::new(&cfg)
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let login_limiter = build_limiter(config.rate_login_per_min);

    // Public routes
    cfg.service(
        web::resource("/login")
            .wrap(login_limiter)
            .route(web::get().to(handlers::login_page))
            .route(web::post().to(handlers::login)),
    )
    .service(web::resource("/api-doc/openapi.json").route(web::get().to(openapi_json)));

    // Everything else needs a session
    cfg.service(
        web::scope("")
            .wrap(from_fn(session_middleware))
            .route("/", web::get().to(dashboard::index))
            .route("/logout", web::get().to(handlers::logout))
            .service(
                web::scope("/asset-master")
                    // /asset-master
                    .service(web::resource("").route(web::get().to(asset::list_assets)))
                    // /asset-master/add
                    .service(
                        web::resource("/add")
                            .route(web::get().to(asset::add_asset_form))
                            .route(web::post().to(asset::add_asset)),
                    )
                    // /asset-master/edit/{id}
                    .service(
                        web::resource("/edit/{id}")
                            .route(web::get().to(asset::edit_asset_form))
                            .route(web::post().to(asset::edit_asset)),
                    )
                    // /asset-master/import
                    .service(
                        web::resource("/import")
                            .route(web::get().to(exchange::import_form))
                            .route(web::post().to(exchange::import_assets)),
                    )
                    // /asset-master/export
                    .service(
                        web::resource("/export").route(web::get().to(exchange::export_assets)),
                    ),
            )
            .service(
                web::scope("/pm-attendance")
                    // /pm-attendance?week=&entry=
                    .service(web::resource("").route(web::get().to(attendance::attendance_view)))
                    // /pm-attendance/save
                    .service(
                        web::resource("/save").route(web::post().to(attendance::save_attendance)),
                    )
                    // /pm-attendance/print?week=
                    .service(
                        web::resource("/print")
                            .route(web::get().to(attendance::print_attendance)),
                    ),
            ),
    );
}
