//! Task Tracker application composition root
//!
//! Wires repositories, the status manager and outbound services into the
//! tasks domain router.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use sqlx::PgPool;
use tasktracker_email::{EmailConfig, EmailServiceFactory};
use tasktracker_external::{ExternalApiConfig, ExternalApiServiceFactory};
use tasktracker_tasks::{api::TasksState, PgTaskRepository, StatusManager, TaskService};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
};

/// Maximum accepted request body, in bytes
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router backed by PostgreSQL
pub async fn create_app(pool: PgPool) -> Result<Router, anyhow::Error> {
    // Status registry is checked once here; a missing strategy aborts startup
    let manager = Arc::new(StatusManager::standard()?);
    let service = TaskService::new(Arc::new(PgTaskRepository::new(pool)), manager);

    let email_config = EmailConfig::from_env()?;
    let email_service = EmailServiceFactory::create(email_config).await?;

    let external_config = ExternalApiConfig::from_env()?;
    let external_service = ExternalApiServiceFactory::create(external_config)?;

    let state = TasksState {
        service,
        email: Arc::from(email_service),
        external: Arc::from(external_service),
    };

    Ok(build_router(state))
}

/// Compose the domain router with the shared infrastructure routes
pub fn build_router(state: TasksState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async {
                concat!("Task Tracker API v", env!("CARGO_PKG_VERSION"))
            }),
        )
        .merge(tasktracker_tasks::api::routes().with_state(state))
}

/// Apply pending migrations from the workspace `migrations/` directory
pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// CORS layer restricted to a comma-separated origin list
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
