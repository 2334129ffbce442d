//! Common test utilities and fixtures for integration tests
//!
//! Builds the full application router over the in-memory task store with
//! mock email and external API services, and drives it with
//! `tower::ServiceExt::oneshot`.

use std::env;
use std::sync::{Arc, Once};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tasktracker_email::mock::MockEmailService;
use tasktracker_external::mock::MockExternalApi;
use tasktracker_tasks::{api::TasksState, InMemoryTaskRepository, StatusManager, TaskService};
use tower::ServiceExt;

static INIT: Once = Once::new();

/// Test environment configuration
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub database_url: Option<String>,
}

impl TestConfig {
    pub fn from_env() -> Self {
        INIT.call_once(|| {
            dotenvy::from_filename(".env.test").ok();
            dotenvy::dotenv().ok();
        });

        Self {
            database_url: env::var("TEST_DATABASE_URL").ok(),
        }
    }
}

/// HTTP response captured for assertions
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Value,
    pub text: String,
}

impl TestResponse {
    /// `error.code` of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }

    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }
}

/// Application wired with in-memory collaborators
pub struct TestApp {
    pub router: Router,
    pub repo: InMemoryTaskRepository,
    pub email: MockEmailService,
    pub external: MockExternalApi,
}

impl TestApp {
    pub fn new() -> Self {
        let repo = InMemoryTaskRepository::new();
        let email = MockEmailService::new();
        let external = MockExternalApi::new();

        let manager = Arc::new(StatusManager::standard().expect("status manager"));
        let state = TasksState {
            service: TaskService::new(Arc::new(repo.clone()), manager),
            email: Arc::new(email.clone()),
            external: Arc::new(external.clone()),
        };

        Self {
            router: tasktracker_app::build_router(state),
            repo,
            email,
            external,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            body,
            text,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    /// Create a task through the API and return its JSON
    pub async fn create_task(&self, title: &str) -> Value {
        let response = self
            .request(
                Method::POST,
                "/v1/tasks",
                Some(serde_json::json!({
                    "title": title,
                    "description": format!("Description of {}", title),
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text);
        response.body
    }

    /// Create a task and walk it to `status` through allowed transitions
    pub async fn create_task_in(&self, title: &str, path: &[&str]) -> i64 {
        let id = self.create_task(title).await["id"].as_i64().unwrap();
        for status in path {
            let response = self
                .request(
                    Method::PATCH,
                    &format!("/v1/tasks/{}/status?status={}", id, status),
                    None,
                )
                .await;
            assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        }
        id
    }
}
