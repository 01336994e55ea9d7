use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use skillswap_algo::config::Settings;
use skillswap_algo::core::SkillMatcher;
use skillswap_algo::models::{demo_profiles, RankingLimits};
use skillswap_algo::routes::{self, AppState};
use skillswap_algo::services::{spawn_refresh, FirestoreClient, PopulationStore, ResultCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(level: &str, format: &str) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting SkillSwap Algo matching service...");

    let store = Arc::new(PopulationStore::new());

    let cache = Arc::new(ResultCache::new(
        settings.cache.l1_cache_size,
        settings.cache.ttl_secs,
    ));
    info!(
        "Result cache initialized (L1: {} entries, TTL: {}s)",
        settings.cache.l1_cache_size, settings.cache.ttl_secs
    );

    // Old revisions can never be requested again once a new one is out
    let invalidate = Arc::clone(&cache);
    let _cache_subscription = store.subscribe(move |snapshot| {
        invalidate.invalidate_all();
        tracing::debug!("Cache cleared for population revision {}", snapshot.revision);
    });

    let use_demo = settings.feed.seed_demo || settings.firestore.configured_project().is_none();
    let _refresh = if use_demo {
        warn!("No document database configured, serving the demo population");
        store.publish(demo_profiles());
        None
    } else {
        let client = FirestoreClient::new(&settings.firestore).map_err(|e| {
            error!("Failed to create document database client: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;

        let interval = Duration::from_secs(settings.feed.refresh_interval_secs.max(1));
        info!(
            "Polling collection '{}' every {}s",
            settings.firestore.collection,
            interval.as_secs()
        );
        Some(spawn_refresh(Arc::clone(&store), Arc::new(client), interval))
    };

    let limits = RankingLimits::from(&settings.ranking);
    let matcher = SkillMatcher::new(limits);

    info!("Matcher initialized with limits: {:?}", limits);

    let app_state = AppState {
        store,
        cache,
        matcher,
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
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
