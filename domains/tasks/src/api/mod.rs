//! API layer for the Tasks domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::TasksState;
pub use routes::routes;
