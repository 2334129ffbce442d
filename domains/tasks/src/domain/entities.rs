//! Domain entities for the tasks domain
//!
//! The status catalog and the task record. A task's status is only ever
//! changed through the status manager; the helpers here never touch it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasktracker_common::{FieldErrors, Result};

/// Maximum task title length, in characters
pub const MAX_TITLE_CHARS: usize = 255;

/// Maximum task description length, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Every status, in declaration order
    pub const ALL: [TaskStatus; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Enumeration name as used on the wire and in the database
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse an enumeration name, ignoring case and surrounding whitespace
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.name().eq_ignore_ascii_case(raw))
    }

    pub fn exists(raw: &str) -> bool {
        Self::parse(raw).is_some()
    }

    /// Look a status up by its human-readable description
    pub fn from_description(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.description().eq_ignore_ascii_case(raw))
    }

    /// Enumeration names in declaration order
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(TaskStatus::name).collect()
    }

    pub fn all_descriptions() -> String {
        Self::ALL
            .iter()
            .map(TaskStatus::description)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Message returned when a caller names a status that does not exist
    pub fn available_statuses_message() -> String {
        format!(
            "Invalid status. Available statuses: {}",
            Self::all_names().join(", ")
        )
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Bumped on every successful write, used for optimistic locking
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated task that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl NewTask {
    /// Create a new task with validation. The status always starts as pending.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Result<Self> {
        let title = title.into();
        let description = description.into();

        let mut errors = FieldErrors::new();
        check_text(&mut errors, "title", &title, MAX_TITLE_CHARS);
        check_text(&mut errors, "description", &description, MAX_DESCRIPTION_CHARS);
        errors.into_result()?;

        Ok(Self {
            title,
            description,
            status: TaskStatus::Pending,
        })
    }
}

/// Field changes requested for an existing task
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskChanges {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if let Some(title) = &self.title {
            check_text(&mut errors, "title", title, MAX_TITLE_CHARS);
        }
        if let Some(description) = &self.description {
            check_text(&mut errors, "description", description, MAX_DESCRIPTION_CHARS);
        }
        errors.into_result()
    }

    /// Copy the text fields that were supplied onto the task
    pub fn apply_text(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
    }
}

fn check_text(errors: &mut FieldErrors, field: &str, value: &str, max_chars: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} must not be blank", capitalize(field)));
    } else if value.chars().count() > max_chars {
        errors.add(
            field,
            format!("{} must be at most {} characters", capitalize(field), max_chars),
        );
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
