//! Repository implementations for the Tasks domain

pub mod memory;
pub mod tasks;

use tasktracker_common::Result;

use crate::domain::entities::{NewTask, Task, TaskStatus};

pub use memory::InMemoryTaskRepository;
pub use tasks::PgTaskRepository;

/// Durable task storage keyed by numeric id
#[async_trait::async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task and return it with its assigned id
    async fn create(&self, task: &NewTask) -> Result<Task>;

    async fn find(&self, id: i64) -> Result<Option<Task>>;

    /// All tasks, newest first
    async fn list_all(&self) -> Result<Vec<Task>>;

    /// Tasks in one status, newest first
    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>>;

    /// Write back title, description and status.
    ///
    /// Fails with `Error::Conflict` when the stored version no longer matches
    /// `task.version`, and with `Error::NotFound` when the task is gone.
    async fn update(&self, task: &Task) -> Result<Task>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub(crate) fn stale_write(id: i64) -> tasktracker_common::Error {
    tasktracker_common::Error::Conflict(format!(
        "Task with id {} was modified by another request, reload it and try again",
        id
    ))
}

pub(crate) fn missing(id: i64) -> tasktracker_common::Error {
    tasktracker_common::Error::NotFound(format!("Task with id {} not found", id))
}
