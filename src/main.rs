use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use raider_match::config::Settings;
use raider_match::core::{Matcher, SkillExtractor};
use raider_match::routes::{self, AppState, JwtVerifier};
use raider_match::services::{GithubClient, PostgresClient, RateLimiter};
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
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
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

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging, which it configures
    let settings = Settings::load().map_err(|e| io_error("Configuration error", e))?;

    // Initialize logging; RUST_LOG wins over logging.level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting RaiderMatch service...");
    info!("Configuration loaded successfully");

    if settings.auth.jwt_secret.is_empty() {
        warn!("auth.jwt_secret is empty; every bearer token will be rejected");
    }

    // Initialize PostgreSQL client (runs pending migrations)
    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let postgres = PostgresClient::from_settings(
        &settings.database.url,
        Some(db_max_conn),
        settings.database.min_connections,
        settings.database.acquire_timeout_secs,
        settings.database.idle_timeout_secs,
    )
    .await
    .map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        io_error("PostgreSQL connection error", e)
    })?;

    info!("PostgreSQL client initialized (max: {} connections)", db_max_conn);

    let github = GithubClient::new(
        settings.github.api_base.clone(),
        settings.github.user_agent.clone(),
        Duration::from_secs(settings.github.timeout_secs),
    )
    .map_err(|e| io_error("GitHub client error", e))?;

    let apply_limiter = RateLimiter::new(
        settings.rate_limit.apply_max_requests,
        Duration::from_secs(settings.rate_limit.apply_window_secs),
    );

    info!(
        "Apply rate limit: {} requests per {}s",
        settings.rate_limit.apply_max_requests,
        settings.rate_limit.apply_window_secs
    );

    let skill_extractor =
        SkillExtractor::new().map_err(|e| io_error("Skill dictionary error", e))?;

    let matcher = Matcher::new(settings.matching.fallback_limit);

    info!("Matcher initialized (fallback limit: {})", matcher.fallback_limit());

    // Build application state
    let app_state = web::Data::new(AppState {
        store: Arc::new(postgres),
        github: Arc::new(github),
        matcher,
        apply_limiter: Arc::new(apply_limiter),
        skill_extractor: Arc::new(skill_extractor),
        auth: Arc::new(JwtVerifier::new(
            &settings.auth.jwt_secret,
            settings.auth.audience.as_deref(),
        )),
    });

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(app_state.clone())
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
