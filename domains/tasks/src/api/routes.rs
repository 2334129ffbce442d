//! Route definitions for Tasks domain API

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{external, reports, tasks};
use super::middleware::TasksState;

/// Create all Tasks domain API routes
pub fn routes() -> Router<TasksState> {
    Router::new()
        .route("/v1/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/v1/tasks/status-info", get(tasks::status_info))
        .route("/v1/tasks/status/{status}", get(tasks::tasks_by_status))
        .route(
            "/v1/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/v1/tasks/{id}/status", patch(tasks::change_status))
        .route("/v1/tasks/{id}/transitions", get(tasks::available_transitions))
        .route("/v1/reports/send-tasks", post(reports::send_tasks_report))
        .route("/v1/external/objects", get(external::get_objects))
}
