//! Shared utilities, configuration, and error handling for the task tracker
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management following 12-factor principles
//! - The application error type and its HTTP mapping
//! - State transition errors shared by domain state machines
//! - Validating request extractors

pub mod config;
pub mod error;
pub mod extractors;
pub mod state;

pub use error::{Error, FieldErrors, Result};
pub use extractors::{PathParam, ValidatedJson, ValidatedQuery};
pub use state::StateError;
