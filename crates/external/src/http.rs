//! reqwest-backed External API client
//!
//! Issues a plain GET against the configured objects URL and hands the body
//! back untouched.

use reqwest::Client;

use crate::{ExternalApiConfig, ExternalApiError, ExternalApiService};

/// HTTP client for the external objects endpoint
pub struct HttpExternalApi {
    client: Client,
    objects_url: String,
}

impl HttpExternalApi {
    /// Create a new client from configuration
    pub fn new(config: ExternalApiConfig) -> Result<Self, ExternalApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExternalApiError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            objects_url: config.objects_url,
        })
    }
}

#[async_trait::async_trait]
impl ExternalApiService for HttpExternalApi {
    async fn fetch_objects(&self) -> Result<String, ExternalApiError> {
        tracing::info!(url = %self.objects_url, "Fetching objects from external API");

        let response = self
            .client
            .get(&self.objects_url)
            .send()
            .await
            .map_err(|e| ExternalApiError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExternalApiError::Response(e.to_string()))?;

        if !status.is_success() {
            tracing::error!(url = %self.objects_url, %status, "External API returned an error");
            return Err(ExternalApiError::Response(format!(
                "External API returned {}: {}",
                status, body
            )));
        }

        tracing::info!(
            url = %self.objects_url,
            response_chars = body.chars().count(),
            "Received external API response"
        );
        tracing::debug!(body = %body, "External API response body");

        Ok(body)
    }

    fn source(&self) -> &str {
        &self.objects_url
    }
}
