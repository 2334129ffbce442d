//! Tasks domain state

use std::sync::Arc;

use tasktracker_email::EmailService;
use tasktracker_external::ExternalApiService;

use crate::TaskService;

/// Application state for the Tasks domain
#[derive(Clone)]
pub struct TasksState {
    pub service: TaskService,
    pub email: Arc<dyn EmailService>,
    pub external: Arc<dyn ExternalApiService>,
}
