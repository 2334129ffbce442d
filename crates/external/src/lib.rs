//! External Objects API
//!
//! Proxies a third-party objects catalogue:
//! - reqwest HTTP client for the real endpoint
//! - Mock service with canned responses for testing and development

pub mod http;
pub mod mock;

use std::time::Duration;

use thiserror::Error;

const DEFAULT_OBJECTS_URL: &str = "https://api.restful-api.dev/objects";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ExternalApiError {
    #[error("External API configuration error: {0}")]
    Configuration(String),

    #[error("External API request error: {0}")]
    Request(String),

    #[error("External API response error: {0}")]
    Response(String),
}

/// External API configuration
#[derive(Debug, Clone)]
pub struct ExternalApiConfig {
    /// Provider (http, mock)
    pub provider: String,
    pub objects_url: String,
    pub timeout: Duration,
}

impl ExternalApiConfig {
    /// Create external API config from environment variables
    pub fn from_env() -> Result<Self, ExternalApiError> {
        dotenvy::dotenv().ok();

        let provider =
            std::env::var("EXTERNAL_API_PROVIDER").unwrap_or_else(|_| "http".to_string());
        let objects_url =
            std::env::var("EXTERNAL_API_URL").unwrap_or_else(|_| DEFAULT_OBJECTS_URL.to_string());

        let timeout_secs = match std::env::var("EXTERNAL_API_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                ExternalApiError::Configuration(format!(
                    "EXTERNAL_API_TIMEOUT_SECS must be a whole number of seconds, got: {}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            provider,
            objects_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Source of external objects
#[async_trait::async_trait]
pub trait ExternalApiService: Send + Sync {
    /// Fetch the raw objects payload
    async fn fetch_objects(&self) -> Result<String, ExternalApiError>;

    /// Where the objects come from, for logs
    fn source(&self) -> &str;
}

/// Factory for creating ExternalApiService implementations
pub struct ExternalApiServiceFactory;

impl ExternalApiServiceFactory {
    pub fn create(
        config: ExternalApiConfig,
    ) -> Result<Box<dyn ExternalApiService>, ExternalApiError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(url = %config.objects_url, "Creating HTTP external API client");
                Ok(Box::new(http::HttpExternalApi::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock external API service");
                Ok(Box::new(mock::MockExternalApi::new()))
            }
            provider => Err(ExternalApiError::Configuration(format!(
                "Unknown external API provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
