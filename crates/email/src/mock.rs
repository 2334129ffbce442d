//! Mock Email Service Implementation
//!
//! Provides in-memory email capture for testing without external dependencies.
//! Captured messages can be inspected by recipient, and delivery failures can
//! be simulated to exercise error paths.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{EmailError, EmailMessage, EmailReceipt, EmailService};

/// Email captured by the mock service
#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub message: EmailMessage,
    pub receipt: EmailReceipt,
    pub captured_at: DateTime<Utc>,
}

impl CapturedEmail {
    /// Number of tasks announced in the report metadata
    pub fn reported_task_count(&self) -> Option<usize> {
        self.message
            .metadata
            .get("task_count")
            .and_then(|count| count.parse().ok())
    }
}

/// Mock email service for testing
#[derive(Debug, Clone)]
pub struct MockEmailService {
    emails: Arc<Mutex<Vec<CapturedEmail>>>,
    email_by_recipient: Arc<Mutex<HashMap<String, Vec<CapturedEmail>>>>,
    failure: Arc<Mutex<Option<String>>>,
    enabled: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self {
            emails: Arc::new(Mutex::new(Vec::new())),
            email_by_recipient: Arc::new(Mutex::new(HashMap::new())),
            failure: Arc::new(Mutex::new(None)),
            enabled: true,
        }
    }

    /// Create a disabled mock email service (sends are acknowledged but dropped)
    pub fn new_disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Make every subsequent send fail with the given message
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    /// Stop simulating failures
    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    /// Get all captured emails
    pub fn get_all_emails(&self) -> Vec<CapturedEmail> {
        lock(&self.emails).clone()
    }

    /// Get emails sent to a specific recipient
    pub fn get_emails_for_recipient(&self, email: &str) -> Vec<CapturedEmail> {
        lock(&self.email_by_recipient)
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Get the most recent tasks report for a recipient
    pub fn get_latest_report(&self, email: &str) -> Option<CapturedEmail> {
        self.get_emails_for_recipient(email)
            .into_iter()
            .filter(|e| {
                e.message
                    .metadata
                    .get("email_type")
                    .map(|t| t == "tasks_report")
                    .unwrap_or(false)
            })
            .max_by_key(|e| e.captured_at)
    }

    /// Get count of emails sent
    pub fn email_count(&self) -> usize {
        lock(&self.emails).len()
    }

    /// Clear all captured emails
    pub fn clear(&self) {
        lock(&self.emails).clear();
        lock(&self.email_by_recipient).clear();
    }

    /// Check if email sending is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        if !self.enabled {
            tracing::warn!("Mock email service disabled, skipping send");
            return Ok(EmailReceipt {
                message_id: format!("disabled-{}", Uuid::new_v4()),
                sent_at: Utc::now(),
                provider: "mock-disabled".to_string(),
                metadata: message.metadata.clone(),
            });
        }

        if let Some(reason) = lock(&self.failure).clone() {
            tracing::warn!(recipient = %message.to, "Mock email service simulating failure");
            return Err(EmailError::Delivery(reason));
        }

        tracing::info!("Mock email service capturing email to: {}", message.to);

        let receipt = EmailReceipt {
            message_id: format!("mock-{}", Uuid::new_v4()),
            sent_at: Utc::now(),
            provider: "mock".to_string(),
            metadata: message.metadata.clone(),
        };

        let captured = CapturedEmail {
            message: message.clone(),
            receipt: receipt.clone(),
            captured_at: Utc::now(),
        };

        lock(&self.emails).push(captured.clone());

        lock(&self.email_by_recipient)
            .entry(message.to)
            .or_default()
            .push(captured);

        tracing::info!(
            "Email captured successfully, message ID: {}",
            receipt.message_id
        );

        Ok(receipt)
    }

    fn default_from(&self) -> String {
        "Task Tracker <reports@tasktracker.local>".to_string()
    }

    fn service_name(&self) -> &'static str {
        "mock"
    }
}
