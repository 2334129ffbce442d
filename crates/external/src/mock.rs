//! Mock External API Implementation
//!
//! Returns a canned payload (or a programmed failure) without network access.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{ExternalApiError, ExternalApiService};

const DEFAULT_PAYLOAD: &str = r#"[{"id":"1","name":"Mock object","data":null}]"#;

#[derive(Debug, Clone)]
enum Behavior {
    Respond(String),
    Fail(String),
}

/// Mock external API for testing
#[derive(Debug, Clone)]
pub struct MockExternalApi {
    behavior: Arc<Mutex<Behavior>>,
    calls: Arc<Mutex<usize>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockExternalApi {
    pub fn new() -> Self {
        Self {
            behavior: Arc::new(Mutex::new(Behavior::Respond(DEFAULT_PAYLOAD.to_string()))),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Respond with the given body from now on
    pub fn respond_with(&self, body: impl Into<String>) {
        *lock(&self.behavior) = Behavior::Respond(body.into());
    }

    /// Fail every subsequent fetch
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.behavior) = Behavior::Fail(message.into());
    }

    /// Number of fetches served
    pub fn call_count(&self) -> usize {
        *lock(&self.calls)
    }
}

impl Default for MockExternalApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ExternalApiService for MockExternalApi {
    async fn fetch_objects(&self) -> Result<String, ExternalApiError> {
        *lock(&self.calls) += 1;
        tracing::info!("Mock external API serving objects");

        match lock(&self.behavior).clone() {
            Behavior::Respond(body) => Ok(body),
            Behavior::Fail(message) => Err(ExternalApiError::Request(message)),
        }
    }

    fn source(&self) -> &str {
        "mock"
    }
}
