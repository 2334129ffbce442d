//! Task endpoint integration tests
//!
//! - POST /v1/tasks - Create task
//! - GET /v1/tasks - List tasks
//! - GET /v1/tasks/{id} - Get task
//! - PUT /v1/tasks/{id} - Update task
//! - PATCH /v1/tasks/{id}/status - Change status
//! - DELETE /v1/tasks/{id} - Delete task
//! - GET /v1/tasks/status/{status} - Filter by status
//! - GET /v1/tasks/{id}/transitions - Available transitions
//! - GET /v1/tasks/status-info - Status catalog

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::common::TestApp;

fn statuses(body: &Value) -> Vec<String> {
    let mut names: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

mod test_create_task {
    use super::*;

    #[tokio::test]
    async fn test_create_returns_201_and_pending() {
        let app = TestApp::new();
        let response = app
            .request(
                Method::POST,
                "/v1/tasks",
                Some(json!({"title": "Write docs", "description": "User guide"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["title"], "Write docs");
        assert_eq!(response.body["status"], "PENDING");
        assert_eq!(response.body["status_description"], "Pending");
        assert!(response.body["id"].as_i64().is_some());
    }

    #[tokio::test]
    async fn test_supplied_status_is_ignored() {
        let app = TestApp::new();
        let response = app
            .request(
                Method::POST,
                "/v1/tasks",
                Some(json!({"title": "t", "description": "d", "status": "COMPLETED"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["status"], "PENDING");
    }

    #[tokio::test]
    async fn test_blank_fields_return_field_map() {
        let app = TestApp::new();
        let response = app
            .request(
                Method::POST,
                "/v1/tasks",
                Some(json!({"title": "  ", "description": "x".repeat(1001)})),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
        assert!(response.body["error"]["fields"]["title"].is_array());
        assert!(response.body["error"]["fields"]["description"].is_array());
        assert!(app.repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = TestApp::new();
        let response = app
            .request(Method::POST, "/v1/tasks", Some(json!({"title": "only title"})))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_ARGUMENT");
    }
}

mod test_read_tasks {
    use super::*;

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let app = TestApp::new();
        app.create_task("first").await;
        app.create_task("second").await;
        app.create_task("third").await;

        let response = app.get("/v1/tasks").await;
        assert_eq!(response.status, StatusCode::OK);

        let titles: Vec<&str> = response
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_get_task() {
        let app = TestApp::new();
        let id = app.create_task("find me").await["id"].as_i64().unwrap();

        let response = app.get(&format!("/v1/tasks/{}", id)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["title"], "find me");
    }

    #[tokio::test]
    async fn test_get_missing_task_is_404() {
        let app = TestApp::new();
        let response = app.get("/v1/tasks/999").await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error_code(), "NOT_FOUND");
        assert!(response.error_message().contains("999"));
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_is_json_400() {
        let app = TestApp::new();
        let response = app.get("/v1/tasks/abc").await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_ARGUMENT");
        assert_eq!(response.content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_filter_by_status() {
        let app = TestApp::new();
        app.create_task_in("started", &["IN_PROGRESS"]).await;
        app.create_task("waiting").await;

        let response = app.get("/v1/tasks/status/in_progress").await;
        assert_eq!(response.status, StatusCode::OK);
        let tasks = response.body.as_array().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["title"], "started");

        let response = app.get("/v1/tasks/status/COMPLETED").await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_unknown_status_is_400() {
        let app = TestApp::new();
        let response = app.get("/v1/tasks/status/DONE").await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_ARGUMENT");
        assert!(response
            .error_message()
            .contains("PENDING, IN_PROGRESS, COMPLETED, CANCELLED"));
    }
}

mod test_change_status {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_lifecycle_to_completed_then_locked() {
        let app = TestApp::new();
        let id = app.create_task_in("ship", &["IN_PROGRESS", "COMPLETED"]).await;

        let task = app.get(&format!("/v1/tasks/{}", id)).await;
        assert_eq!(task.body["status"], "COMPLETED");

        for target in ["PENDING", "IN_PROGRESS", "CANCELLED"] {
            let response = app
                .request(
                    Method::PATCH,
                    &format!("/v1/tasks/{}/status?status={}", id, target),
                    None,
                )
                .await;
            assert_eq!(response.status, StatusCode::CONFLICT, "{}", target);
            assert_eq!(response.error_code(), "CONFLICT");
        }
    }

    #[tokio::test]
    async fn test_pending_to_completed_is_409() {
        let app = TestApp::new();
        let id = app.create_task_in("skip", &[]).await;

        let response = app
            .request(
                Method::PATCH,
                &format!("/v1/tasks/{}/status?status=COMPLETED", id),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert!(response.error_message().contains("'In progress', 'Cancelled'"));
    }

    #[tokio::test]
    async fn test_same_status_returns_task_unchanged() {
        let app = TestApp::new();
        let created = app.create_task("idle").await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .request(
                Method::PATCH,
                &format!("/v1/tasks/{}/status?status=pending", id),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["updated_at"], created["updated_at"]);
    }

    #[tokio::test]
    async fn test_unparseable_status_is_400() {
        let app = TestApp::new();
        let id = app.create_task_in("bad", &[]).await;

        let response = app
            .request(
                Method::PATCH,
                &format!("/v1/tasks/{}/status?status=FINISHED", id),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_missing_status_param_is_json_400() {
        let app = TestApp::new();
        let id = app.create_task_in("no target", &[]).await;

        let response = app
            .request(Method::PATCH, &format!("/v1/tasks/{}/status", id), None)
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_ARGUMENT");
        assert!(!response.error_message().is_empty());
    }

    #[tokio::test]
    async fn test_empty_status_param_is_validation_error() {
        let app = TestApp::new();
        let id = app.create_task_in("empty target", &[]).await;

        let response = app
            .request(Method::PATCH, &format!("/v1/tasks/{}/status?status=", id), None)
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_json_400() {
        let app = TestApp::new();
        let response = app
            .request(Method::PATCH, "/v1/tasks/abc/status?status=IN_PROGRESS", None)
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_missing_task_is_404() {
        let app = TestApp::new();
        let response = app
            .request(Method::PATCH, "/v1/tasks/77/status?status=IN_PROGRESS", None)
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_in_progress_back_to_pending() {
        let app = TestApp::new();
        let id = app.create_task_in("pause", &["IN_PROGRESS", "PENDING"]).await;

        let task = app.get(&format!("/v1/tasks/{}", id)).await;
        assert_eq!(task.body["status"], "PENDING");
    }
}

mod test_update_task {
    use super::*;

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let app = TestApp::new();
        let id = app.create_task_in("old", &[]).await;

        let response = app
            .request(
                Method::PUT,
                &format!("/v1/tasks/{}", id),
                Some(json!({"title": "new"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["title"], "new");
        assert_eq!(response.body["description"], "Description of old");
        assert_eq!(response.body["status"], "PENDING");
    }

    #[tokio::test]
    async fn test_update_with_allowed_status() {
        let app = TestApp::new();
        let id = app.create_task_in("go", &[]).await;

        let response = app
            .request(
                Method::PUT,
                &format!("/v1/tasks/{}", id),
                Some(json!({"status": "IN_PROGRESS"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], "IN_PROGRESS");
    }

    #[tokio::test]
    async fn test_update_with_forbidden_status_is_409() {
        let app = TestApp::new();
        let id = app.create_task_in("done", &["CANCELLED"]).await;

        let response = app
            .request(
                Method::PUT,
                &format!("/v1/tasks/{}", id),
                Some(json!({"title": "revived", "status": "PENDING"})),
            )
            .await;

        assert_eq!(response.status, StatusCode::CONFLICT);

        let task = app.get(&format!("/v1/tasks/{}", id)).await;
        assert_eq!(task.body["title"], "done");
    }

    #[tokio::test]
    async fn test_update_with_unknown_status_is_400() {
        let app = TestApp::new();
        let id = app.create_task_in("x", &[]).await;

        let response = app
            .request(
                Method::PUT,
                &format!("/v1/tasks/{}", id),
                Some(json!({"status": "SOMEDAY"})),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_update_with_empty_status_leaves_status() {
        let app = TestApp::new();
        let id = app.create_task_in("x", &["IN_PROGRESS"]).await;

        let response = app
            .request(
                Method::PUT,
                &format!("/v1/tasks/{}", id),
                Some(json!({"description": "updated", "status": ""})),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["status"], "IN_PROGRESS");
        assert_eq!(response.body["description"], "updated");
    }

    #[tokio::test]
    async fn test_update_missing_task_is_404() {
        let app = TestApp::new();
        let response = app
            .request(Method::PUT, "/v1/tasks/5", Some(json!({"title": "nope"})))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_blank_title_is_validation_error() {
        let app = TestApp::new();
        let id = app.create_task_in("x", &[]).await;

        let response = app
            .request(
                Method::PUT,
                &format!("/v1/tasks/{}", id),
                Some(json!({"title": "   "})),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }
}

mod test_delete_task {
    use super::*;

    #[tokio::test]
    async fn test_delete_cancelled_task() {
        let app = TestApp::new();
        let id = app.create_task_in("dropped", &["CANCELLED"]).await;

        let response = app
            .request(Method::DELETE, &format!("/v1/tasks/{}", id), None)
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);

        let response = app.get(&format!("/v1/tasks/{}", id)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_open_task() {
        let app = TestApp::new();
        let id = app.create_task_in("open", &["IN_PROGRESS"]).await;

        let response = app
            .request(Method::DELETE, &format!("/v1/tasks/{}", id), None)
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(app.repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_missing_task_is_404() {
        let app = TestApp::new();
        let response = app.request(Method::DELETE, "/v1/tasks/3", None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }
}

mod test_status_catalog {
    use super::*;

    #[tokio::test]
    async fn test_transitions_for_in_progress_task() {
        let app = TestApp::new();
        let id = app.create_task_in("busy", &["IN_PROGRESS"]).await;

        let response = app.get(&format!("/v1/tasks/{}/transitions", id)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            statuses(&response.body),
            vec!["CANCELLED", "COMPLETED", "PENDING"]
        );
    }

    #[tokio::test]
    async fn test_transitions_for_final_task_are_empty() {
        let app = TestApp::new();
        let id = app.create_task_in("over", &["CANCELLED"]).await;

        let response = app.get(&format!("/v1/tasks/{}/transitions", id)).await;
        assert_eq!(response.status, StatusCode::OK);
        assert!(statuses(&response.body).is_empty());
    }

    #[tokio::test]
    async fn test_transitions_for_missing_task_is_404() {
        let app = TestApp::new();
        let response = app.get("/v1/tasks/12/transitions").await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_status_info() {
        let app = TestApp::new();
        let response = app.get("/v1/tasks/status-info").await;
        assert_eq!(response.status, StatusCode::OK);

        let catalog = response.body.as_array().unwrap();
        let names: Vec<&str> = catalog
            .iter()
            .map(|entry| entry["status"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["PENDING", "IN_PROGRESS", "COMPLETED", "CANCELLED"]);

        for entry in catalog {
            let is_final = entry["is_final"].as_bool().unwrap();
            let empty = entry["transitions"].as_array().unwrap().is_empty();
            assert_eq!(is_final, empty);
            assert!(!entry["transition_description"].as_str().unwrap().is_empty());
        }
    }
}
