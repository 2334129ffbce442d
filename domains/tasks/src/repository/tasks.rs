//! PostgreSQL task repository

use sqlx::PgPool;
use tasktracker_common::Result;

use super::{missing, stale_write, TaskRepository};
use crate::domain::entities::{NewTask, Task, TaskStatus};

#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<Task> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, status, version, created_at, updated_at
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find(&self, id: i64) -> Result<Option<Task>> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, version, created_at, updated_at
            FROM tasks WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_all(&self) -> Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, version, created_at, updated_at
            FROM tasks ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_by_status(&self, status: TaskStatus) -> Result<Vec<Task>> {
        let rows = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, version, created_at, updated_at
            FROM tasks WHERE status = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, task: &Task) -> Result<Task> {
        let row = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks SET
                title = $2, description = $3, status = $4,
                version = version + 1, updated_at = NOW()
            WHERE id = $1 AND version = $5
            RETURNING id, title, description, status, version, created_at, updated_at
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.version)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(updated) => Ok(updated),
            None => {
                let exists =
                    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = $1)")
                        .bind(task.id)
                        .fetch_one(&self.pool)
                        .await?;
                if exists {
                    Err(stale_write(task.id))
                } else {
                    Err(missing(task.id))
                }
            }
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
