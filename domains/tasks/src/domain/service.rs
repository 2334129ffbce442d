//! Task service
//!
//! Orchestrates status manager calls around persistence. Every status
//! change is decided by the manager before anything is written.

use std::sync::Arc;

use serde::Serialize;
use tasktracker_common::Result;

use crate::domain::entities::{NewTask, Task, TaskChanges, TaskStatus};
use crate::domain::state::StatusManager;
use crate::repository::{missing, TaskRepository};

/// Catalog entry describing one status and where it can lead
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInfo {
    pub status: TaskStatus,
    pub description: &'static str,
    pub details: &'static str,
    pub transitions: Vec<TaskStatus>,
    pub transition_description: &'static str,
    pub is_final: bool,
}

#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
    manager: Arc<StatusManager>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>, manager: Arc<StatusManager>) -> Self {
        Self { repo, manager }
    }

    /// Persist a new task. The pending entry hook runs once the row exists;
    /// if it fails the row is removed again.
    pub async fn create_task(&self, input: NewTask) -> Result<Task> {
        let input = NewTask {
            status: TaskStatus::Pending,
            ..input
        };
        let pending = self.manager.strategy_for(TaskStatus::Pending)?;

        let task = self.repo.create(&input).await?;
        if let Err(e) = pending.on_enter(&task) {
            tracing::warn!(task_id = task.id, error = %e, "Pending entry hook failed, discarding task");
            self.repo.delete(task.id).await?;
            return Err(e.into());
        }

        tracing::info!(task_id = task.id, title = %task.title, "Task created");
        Ok(task)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.repo.list_all().await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task> {
        self.repo.find(id).await?.ok_or_else(|| missing(id))
    }

    pub async fn tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        self.repo.list_by_status(status).await
    }

    /// Apply the supplied fields. A status that differs from the current one
    /// is validated and executed through the manager.
    pub async fn update_task(&self, id: i64, changes: TaskChanges) -> Result<Task> {
        changes.validate()?;
        let mut task = self.get_task(id).await?;

        changes.apply_text(&mut task);

        if let Some(new_status) = changes.status {
            if new_status != task.status {
                self.manager.validate_transition(task.status, new_status)?;
                self.manager.execute_transition(&mut task, new_status)?;
            }
        }

        let task = self.repo.update(&task).await?;
        tracing::info!(task_id = task.id, status = %task.status, "Task updated");
        Ok(task)
    }

    /// Move a task to `new_status`. Asking for the current status is a no-op.
    pub async fn change_status(&self, id: i64, new_status: TaskStatus) -> Result<Task> {
        let mut task = self.get_task(id).await?;

        if task.status == new_status {
            tracing::debug!(task_id = id, status = %new_status, "Status unchanged, nothing to do");
            return Ok(task);
        }

        let previous = task.status;
        self.manager.execute_transition(&mut task, new_status)?;

        let task = self.repo.update(&task).await?;
        tracing::info!(task_id = id, from = %previous, to = %task.status, "Task status changed");
        Ok(task)
    }

    /// Delete a task in any status
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let task = self.get_task(id).await?;

        if self.manager.is_final_status(task.status)? {
            tracing::info!(task_id = id, status = %task.status, "Deleting finished task");
        } else {
            tracing::warn!(task_id = id, status = %task.status, "Deleting task that is still open");
        }

        if !self.repo.delete(id).await? {
            return Err(missing(id));
        }
        Ok(())
    }

    /// Statuses the task can move to from where it is now
    pub async fn available_transitions(&self, id: i64) -> Result<Vec<TaskStatus>> {
        let task = self.get_task(id).await?;
        Ok(self.manager.available_transitions(task.status)?)
    }

    /// Static catalog of every status, in declaration order
    pub fn status_info(&self) -> Result<Vec<StatusInfo>> {
        let mut catalog = Vec::with_capacity(TaskStatus::ALL.len());
        for status in TaskStatus::ALL {
            let strategy = self.manager.strategy_for(status)?;
            catalog.push(StatusInfo {
                status,
                description: status.description(),
                details: strategy.status_description(),
                transitions: strategy.allowed_transitions().to_vec(),
                transition_description: strategy.transition_description(),
                is_final: strategy.is_final(),
            });
        }
        Ok(catalog)
    }
}
