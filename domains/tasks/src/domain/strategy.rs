//! Status strategies
//!
//! One policy object per status. A strategy owns the outbound edges of its
//! status, the text shown to API clients, and the entry/exit hooks.
//!
//! ```text
//! PENDING      -> IN_PROGRESS, CANCELLED
//! IN_PROGRESS  -> COMPLETED, CANCELLED, PENDING
//! COMPLETED    -> (final)
//! CANCELLED    -> (final)
//! ```

use tasktracker_common::StateError;

use crate::domain::entities::{Task, TaskStatus};

/// Transition rules and lifecycle hooks for a single status
pub trait StatusStrategy: Send + Sync {
    /// The status this strategy governs
    fn status(&self) -> TaskStatus;

    /// Statuses reachable directly from this one
    fn allowed_transitions(&self) -> &'static [TaskStatus];

    /// What the status means, for API clients
    fn status_description(&self) -> &'static str;

    /// Where a task can go from here, for API clients
    fn transition_description(&self) -> &'static str;

    fn can_transition_to(&self, target: TaskStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }

    fn is_final(&self) -> bool {
        self.allowed_transitions().is_empty()
    }

    /// Called after a task has entered this status
    fn on_enter(&self, _task: &Task) -> Result<(), StateError> {
        Ok(())
    }

    /// Called before a task leaves this status
    fn on_exit(&self, _task: &Task) -> Result<(), StateError> {
        Ok(())
    }

    /// Per-target side effects once the status field has been assigned
    fn after_transition(&self, task: &Task) {
        tracing::debug!(task_id = task.id, from = %self.status(), to = %task.status, "Status changed");
    }

    /// Move `task` to `target`.
    ///
    /// Rejects the move when this status is final or does not list `target`.
    /// On success the exit hook of this status has run and the status field
    /// holds `target`; the entry hook of `target` is left to the caller.
    fn execute_transition(&self, task: &mut Task, target: TaskStatus) -> Result<(), StateError> {
        if self.is_final() {
            return Err(StateError::TerminalState {
                status: self.status().description().to_string(),
                reason: self.transition_description().to_string(),
            });
        }

        if !self.can_transition_to(target) {
            return Err(StateError::InvalidTransition {
                from: self.status().description().to_string(),
                to: target.description().to_string(),
                reason: self.transition_description().to_string(),
            });
        }

        self.on_exit(task)?;
        task.status = target;
        self.after_transition(task);

        Ok(())
    }
}

/// Every built-in strategy, one per status
pub fn standard_strategies() -> Vec<Box<dyn StatusStrategy>> {
    vec![
        Box::new(PendingStrategy),
        Box::new(InProgressStrategy),
        Box::new(CompletedStrategy),
        Box::new(CancelledStrategy),
    ]
}

// ============================================================================
// Pending
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct PendingStrategy;

impl StatusStrategy for PendingStrategy {
    fn status(&self) -> TaskStatus {
        TaskStatus::Pending
    }

    fn allowed_transitions(&self) -> &'static [TaskStatus] {
        &[TaskStatus::InProgress, TaskStatus::Cancelled]
    }

    fn status_description(&self) -> &'static str {
        "The task has been created and is waiting to be started"
    }

    fn transition_description(&self) -> &'static str {
        "From 'Pending' a task can move to: 'In progress', 'Cancelled'"
    }

    #[mutants::skip]
    fn after_transition(&self, task: &Task) {
        match task.status {
            TaskStatus::InProgress => tracing::info!(task_id = task.id, "Task started"),
            TaskStatus::Cancelled => {
                tracing::info!(task_id = task.id, "Task cancelled before it was started")
            }
            _ => {}
        }
    }
}

// ============================================================================
// In progress
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct InProgressStrategy;

impl StatusStrategy for InProgressStrategy {
    fn status(&self) -> TaskStatus {
        TaskStatus::InProgress
    }

    fn allowed_transitions(&self) -> &'static [TaskStatus] {
        &[
            TaskStatus::Completed,
            TaskStatus::Cancelled,
            TaskStatus::Pending,
        ]
    }

    fn status_description(&self) -> &'static str {
        "Work on the task is under way"
    }

    fn transition_description(&self) -> &'static str {
        "From 'In progress' a task can move to: 'Completed', 'Cancelled', 'Pending'"
    }

    #[mutants::skip]
    fn after_transition(&self, task: &Task) {
        match task.status {
            TaskStatus::Completed => tracing::info!(task_id = task.id, "Task finished"),
            TaskStatus::Cancelled => {
                tracing::info!(task_id = task.id, "Task cancelled while in progress")
            }
            TaskStatus::Pending => tracing::info!(task_id = task.id, "Task put back on hold"),
            _ => {}
        }
    }
}

// ============================================================================
// Completed
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct CompletedStrategy;

impl StatusStrategy for CompletedStrategy {
    fn status(&self) -> TaskStatus {
        TaskStatus::Completed
    }

    fn allowed_transitions(&self) -> &'static [TaskStatus] {
        &[]
    }

    fn status_description(&self) -> &'static str {
        "The task is done"
    }

    fn transition_description(&self) -> &'static str {
        "Status 'Completed' is final. No transitions are possible."
    }

    #[mutants::skip]
    fn on_enter(&self, task: &Task) -> Result<(), StateError> {
        tracing::info!(task_id = task.id, title = %task.title, "Task completed");
        Ok(())
    }
}

// ============================================================================
// Cancelled
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct CancelledStrategy;

impl StatusStrategy for CancelledStrategy {
    fn status(&self) -> TaskStatus {
        TaskStatus::Cancelled
    }

    fn allowed_transitions(&self) -> &'static [TaskStatus] {
        &[]
    }

    fn status_description(&self) -> &'static str {
        "The task was dropped and will not be done"
    }

    fn transition_description(&self) -> &'static str {
        "Status 'Cancelled' is final. No transitions are possible."
    }

    #[mutants::skip]
    fn on_enter(&self, task: &Task) -> Result<(), StateError> {
        tracing::info!(task_id = task.id, title = %task.title, "Task cancelled");
        Ok(())
    }

    // Unreachable through execute_transition, a cancelled task never leaves.
    #[mutants::skip]
    fn on_exit(&self, task: &Task) -> Result<(), StateError> {
        tracing::warn!(task_id = task.id, "Leaving the cancelled status");
        Ok(())
    }
}
