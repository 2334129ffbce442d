//! API endpoint integration tests
//!
//! Tests for the task, report and external proxy endpoints.

#![allow(dead_code)]

mod common;
mod external;
mod reports;
mod tasks;
