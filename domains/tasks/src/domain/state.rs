//! Status manager
//!
//! Binds every status to its strategy. All transition decisions go through
//! here; the registry is built once at startup and never written again.

use std::collections::HashMap;

use tasktracker_common::StateError;

use crate::domain::entities::{Task, TaskStatus};
use crate::domain::strategy::{standard_strategies, StatusStrategy};

/// Registry mapping each status to its strategy
pub struct StatusManager {
    strategies: HashMap<TaskStatus, Box<dyn StatusStrategy>>,
}

impl std::fmt::Debug for StatusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut registered: Vec<&TaskStatus> = self.strategies.keys().collect();
        registered.sort();
        f.debug_struct("StatusManager")
            .field("strategies", &registered)
            .finish()
    }
}

impl StatusManager {
    /// Build the registry, failing when a status is missing or registered twice
    pub fn new(strategies: Vec<Box<dyn StatusStrategy>>) -> Result<Self, StateError> {
        let mut registry: HashMap<TaskStatus, Box<dyn StatusStrategy>> = HashMap::new();

        for strategy in strategies {
            let status = strategy.status();
            if registry.insert(status, strategy).is_some() {
                return Err(StateError::Configuration(format!(
                    "Status {} has more than one strategy",
                    status
                )));
            }
        }

        let missing: Vec<&str> = TaskStatus::ALL
            .iter()
            .filter(|status| !registry.contains_key(status))
            .map(TaskStatus::name)
            .collect();
        if !missing.is_empty() {
            return Err(StateError::Configuration(format!(
                "No strategy registered for: {}",
                missing.join(", ")
            )));
        }

        tracing::info!(strategies = registry.len(), "Status manager initialized");

        Ok(Self {
            strategies: registry,
        })
    }

    /// Registry with the built-in strategies
    pub fn standard() -> Result<Self, StateError> {
        Self::new(standard_strategies())
    }

    pub fn strategy_for(&self, status: TaskStatus) -> Result<&dyn StatusStrategy, StateError> {
        self.strategies
            .get(&status)
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| {
                StateError::Configuration(format!("No strategy registered for {}", status))
            })
    }

    pub fn can_transition(&self, from: TaskStatus, to: TaskStatus) -> Result<bool, StateError> {
        Ok(self.strategy_for(from)?.can_transition_to(to))
    }

    /// Move `task` to `new_status`.
    ///
    /// The current strategy validates the move and runs its exit hook, then
    /// the entry hook of the new status fires exactly once. A failing entry
    /// hook restores the previous status.
    pub fn execute_transition(
        &self,
        task: &mut Task,
        new_status: TaskStatus,
    ) -> Result<(), StateError> {
        let previous = task.status;
        let current = self.strategy_for(previous)?;
        let next = self.strategy_for(new_status)?;

        current.execute_transition(task, new_status)?;

        if let Err(e) = next.on_enter(task) {
            task.status = previous;
            return Err(e);
        }

        tracing::debug!(task_id = task.id, from = %previous, to = %new_status, "Transition applied");
        Ok(())
    }

    /// Statuses reachable from `status`
    pub fn available_transitions(&self, status: TaskStatus) -> Result<Vec<TaskStatus>, StateError> {
        Ok(self.strategy_for(status)?.allowed_transitions().to_vec())
    }

    pub fn is_final_status(&self, status: TaskStatus) -> Result<bool, StateError> {
        Ok(self.strategy_for(status)?.is_final())
    }

    pub fn transition_description(&self, status: TaskStatus) -> Result<&'static str, StateError> {
        Ok(self.strategy_for(status)?.transition_description())
    }

    pub fn status_description(&self, status: TaskStatus) -> Result<&'static str, StateError> {
        Ok(self.strategy_for(status)?.status_description())
    }

    /// Check a move without performing it.
    ///
    /// The error carries both status descriptions and the help text of the
    /// current status.
    pub fn validate_transition(&self, from: TaskStatus, to: TaskStatus) -> Result<(), StateError> {
        let strategy = self.strategy_for(from)?;
        if strategy.can_transition_to(to) {
            return Ok(());
        }

        if strategy.is_final() {
            return Err(StateError::TerminalState {
                status: from.description().to_string(),
                reason: strategy.transition_description().to_string(),
            });
        }

        Err(StateError::InvalidTransition {
            from: from.description().to_string(),
            to: to.description().to_string(),
            reason: strategy.transition_description().to_string(),
        })
    }
}
