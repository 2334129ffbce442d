//! Task management API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasktracker_common::{Error, PathParam, Result, ValidatedJson, ValidatedQuery};
use validator::Validate;

use crate::api::middleware::TasksState;
use crate::domain::entities::{NewTask, Task, TaskChanges, TaskStatus};
use crate::domain::service::StatusInfo;

/// Rejects values that are empty once whitespace is stripped
fn not_blank(value: &str) -> std::result::Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Request for creating a new task
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(
        length(max = 255, message = "Title must be at most 255 characters"),
        custom(function = "not_blank", message = "Title must not be blank")
    )]
    pub title: String,

    #[validate(
        length(max = 1000, message = "Description must be at most 1000 characters"),
        custom(function = "not_blank", message = "Description must not be blank")
    )]
    pub description: String,

    /// Ignored, a new task always starts as pending
    #[serde(default)]
    pub status: Option<String>,
}

/// Partial update; omitted fields stay as they are
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(
        length(max = 255, message = "Title must be at most 255 characters"),
        custom(function = "not_blank", message = "Title must not be blank")
    )]
    pub title: Option<String>,

    #[validate(
        length(max = 1000, message = "Description must be at most 1000 characters"),
        custom(function = "not_blank", message = "Description must not be blank")
    )]
    pub description: Option<String>,

    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangeStatusParams {
    #[validate(length(min = 1, message = "Status must not be empty"))]
    pub status: String,
}

/// Task response DTO
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub status_description: &'static str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            status: t.status,
            status_description: t.status.description(),
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Parse a status named by the client, 400 with the list of valid names otherwise
fn parse_status(raw: &str) -> Result<TaskStatus> {
    TaskStatus::parse(raw)
        .ok_or_else(|| Error::InvalidArgument(TaskStatus::available_statuses_message()))
}

/// Status in an update body. Absent or empty means "leave as is".
fn requested_status(raw: Option<&str>) -> Result<Option<TaskStatus>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_status(raw).map(Some),
    }
}

fn respond_many(tasks: Vec<Task>) -> Json<Vec<TaskResponse>> {
    Json(tasks.into_iter().map(Into::into).collect())
}

/// Create a task
pub async fn create_task(
    State(state): State<TasksState>,
    ValidatedJson(req): ValidatedJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>)> {
    if let Some(status) = req.status.as_deref() {
        tracing::debug!(requested = status, "Ignoring status supplied on create");
    }

    let task = state
        .service
        .create_task(NewTask::new(req.title, req.description)?)
        .await?;

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// List all tasks, newest first
pub async fn list_tasks(State(state): State<TasksState>) -> Result<Json<Vec<TaskResponse>>> {
    let tasks = state.service.list_tasks().await?;
    Ok(respond_many(tasks))
}

/// Get a single task by ID
pub async fn get_task(
    State(state): State<TasksState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<TaskResponse>> {
    let task = state.service.get_task(id).await?;
    Ok(Json(task.into()))
}

/// Update title, description and/or status
pub async fn update_task(
    State(state): State<TasksState>,
    PathParam(id): PathParam<i64>,
    ValidatedJson(req): ValidatedJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>> {
    let changes = TaskChanges {
        status: requested_status(req.status.as_deref())?,
        title: req.title,
        description: req.description,
    };

    let task = state.service.update_task(id, changes).await?;
    Ok(Json(task.into()))
}

/// Move a task to another status
pub async fn change_status(
    State(state): State<TasksState>,
    PathParam(id): PathParam<i64>,
    ValidatedQuery(params): ValidatedQuery<ChangeStatusParams>,
) -> Result<Json<TaskResponse>> {
    let status = parse_status(&params.status)?;
    let task = state.service.change_status(id, status).await?;
    Ok(Json(task.into()))
}

/// Delete a task regardless of its status
pub async fn delete_task(
    State(state): State<TasksState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode> {
    state.service.delete_task(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List tasks in one status
pub async fn tasks_by_status(
    State(state): State<TasksState>,
    PathParam(status): PathParam<String>,
) -> Result<Json<Vec<TaskResponse>>> {
    let status = parse_status(&status)?;
    let tasks = state.service.tasks_by_status(status).await?;
    Ok(respond_many(tasks))
}

/// Statuses reachable from the task's current status
pub async fn available_transitions(
    State(state): State<TasksState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<TaskStatus>>> {
    let transitions = state.service.available_transitions(id).await?;
    Ok(Json(transitions))
}

/// Catalog of every status and where it can lead
pub async fn status_info(State(state): State<TasksState>) -> Result<Json<Vec<StatusInfo>>> {
    Ok(Json(state.service.status_info()?))
}
