//! Common state machine error types
//!
//! Shared by every domain crate that drives entities through a status workflow.

use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot change status from {from} to {to}. {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Terminal state: {status} is a final status, no changes are possible. {reason}")]
    TerminalState { status: String, reason: String },

    #[error("Status hook failed: {0}")]
    HookFailed(String),

    #[error("State machine configuration error: {0}")]
    Configuration(String),
}
