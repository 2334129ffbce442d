//! In-memory task repository
//!
//! Same contract as the PostgreSQL repository, including version checks.
//! Used by tests and for running without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tasktracker_common::Result;
use tokio::sync::RwLock;

use super::{missing, stale_write, TaskRepository};
use crate::domain::entities::{NewTask, Task, TaskStatus};

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored tasks
    pub async fn len(&self) -> usize {
        self.store.read().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn newest_first(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    tasks
}

#[async_trait::async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<Task> {
        let mut store = self.store.write().await;
        store.next_id += 1;

        let now = Utc::now();
        let created = Task {
            id: store.next_id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        store.tasks.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find(&self, id: i64) -> Result<Option<Task>> {
        Ok(self.store.read().await.tasks.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Task>> {
        let tasks = self.store.read().await.tasks.values().cloned().collect();
        Ok(newest_first(tasks))
    }

    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let tasks = self
            .store
            .read()
            .await
            .tasks
            .values()
            .filter(|task| task.status == status)
            .cloned()
            .collect();
        Ok(newest_first(tasks))
    }

    async fn update(&self, task: &Task) -> Result<Task> {
        let mut store = self.store.write().await;
        let stored = store.tasks.get_mut(&task.id).ok_or_else(|| missing(task.id))?;

        if stored.version != task.version {
            return Err(stale_write(task.id));
        }

        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.status = task.status;
        stored.version += 1;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.store.write().await.tasks.remove(&id).is_some())
    }
}
