//! HTTP handlers for the Tasks domain

pub mod external;
pub mod reports;
pub mod tasks;
