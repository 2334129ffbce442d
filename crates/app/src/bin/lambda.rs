//! Task Tracker API - AWS Lambda Runtime

use lambda_http::{run, Error};
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;
use tracing::info;

use tasktracker_app::{body_limit_layer, build_cors_layer, create_app};
use tasktracker_common::config::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .without_time()
        .init();

    info!("Initializing Task Tracker API Lambda");

    let config = Config::from_env().map_err(|e| Error::from(e.to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| Error::from(format!("Database error: {}", e)))?;

    info!("Database connection established");

    let app = create_app(pool)
        .await
        .map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let cors_origins = config
        .cors_allowed_origins
        .ok_or_else(|| Error::from("CORS_ALLOWED_ORIGINS environment variable is required"))?;

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&cors_origins))
        .layer(body_limit_layer());

    info!("Task Tracker API Lambda ready to serve requests");

    run(app).await
}
