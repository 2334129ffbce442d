//! Tasks domain: status workflow, tasks, reports

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::service::{StatusInfo, TaskService};
pub use domain::state::StatusManager;
pub use domain::strategy::{standard_strategies, StatusStrategy};
pub use repository::{InMemoryTaskRepository, PgTaskRepository, TaskRepository};
