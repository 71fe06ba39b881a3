use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use plur_pgh::config::Settings;
use plur_pgh::core::Ranker;
use plur_pgh::routes::{self, handle_json_payload_error, AppState};
use plur_pgh::services::{CatalogCache, CatalogLoader};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Configuration is read before logging starts so `[logging]` applies
    let settings = Settings::load();

    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default()
        .with_env_overrides(std::env::var("LOG_LEVEL").ok(), std::env::var("LOG_FORMAT").ok());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level)))
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting PLUR PGH venue service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let catalog = Arc::new(CatalogCache::new(
        CatalogLoader::new(&settings.catalog.path),
        settings.catalog.refresh_secs,
    ));

    // Warm the snapshot; an empty catalog is reported but not fatal
    let snapshot = catalog.snapshot().await;
    if snapshot.is_empty() {
        error!("Catalog {} is unavailable, recommendations will return 503 until it loads", settings.catalog.path);
    } else {
        info!("Catalog ready: {} venues from {}", snapshot.len(), snapshot.source());
    }

    let ranker = Ranker::new(settings.scoring_policy());

    info!("Ranker initialized with policy: {:?}", ranker.policy());

    let app_state = AppState {
        catalog,
        ranker,
        preferences: Arc::new(settings.scoring.preferences.clone()),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
