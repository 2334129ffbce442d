//! Task report API handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tasktracker_common::{Error, Result, ValidatedQuery};
use tasktracker_email::ReportTask;
use validator::Validate;

use crate::api::middleware::TasksState;
use crate::domain::entities::Task;

/// Query parameters for sending the tasks report
#[derive(Debug, Deserialize, Validate)]
pub struct SendReportParams {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ReportSentResponse {
    pub message: String,
    pub recipient: String,
    pub task_count: usize,
    pub message_id: String,
}

fn report_row(task: &Task) -> ReportTask {
    ReportTask {
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status.description().to_string(),
        created_at: task.created_at,
    }
}

/// Email a report of every task, newest first
pub async fn send_tasks_report(
    State(state): State<TasksState>,
    ValidatedQuery(params): ValidatedQuery<SendReportParams>,
) -> Result<Json<ReportSentResponse>> {
    let tasks = state.service.list_tasks().await?;
    let rows: Vec<ReportTask> = tasks.iter().map(report_row).collect();

    let receipt = state
        .email
        .send_tasks_report(&params.email, &rows)
        .await
        .map_err(|e| {
            tracing::error!(recipient = %params.email, error = %e, "Failed to send tasks report");
            Error::EmailDelivery(format!("Failed to send report to {}: {}", params.email, e))
        })?;

    Ok(Json(ReportSentResponse {
        message: format!("Report with {} tasks sent to {}", rows.len(), params.email),
        recipient: params.email,
        task_count: rows.len(),
        message_id: receipt.message_id,
    }))
}
