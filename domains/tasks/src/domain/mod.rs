//! Tasks domain layer: status catalog, strategies, status manager, service

pub mod entities;
pub mod service;
pub mod state;
pub mod strategy;
