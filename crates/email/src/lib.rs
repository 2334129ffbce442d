//! Task Tracker Email Service
//!
//! Delivers the "all tasks" report with support for:
//! - AWS SES integration for production email delivery
//! - Mock email service for testing and development
//! - LocalStack integration via a custom AWS endpoint

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod aws_ses;
pub mod content;
pub mod mock;

pub use content::ReportTask;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email configuration error: {0}")]
    Configuration(String),

    #[error("Email validation error: {0}")]
    Validation(String),

    #[error("AWS SES error: {0}")]
    AwsSes(String),

    #[error("Email delivery error: {0}")]
    Delivery(String),
}

/// Email message to be sent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body_text: String,
    pub body_html: Option<String>,
    pub metadata: HashMap<String, String>,
}

impl EmailMessage {
    /// Create a new email message
    pub fn new(to: String, from: String, subject: String, body_text: String) -> Self {
        Self {
            to,
            from,
            reply_to: None,
            subject,
            body_text,
            body_html: None,
            metadata: HashMap::new(),
        }
    }

    /// Add HTML body content
    pub fn with_html(mut self, body_html: String) -> Self {
        self.body_html = Some(body_html);
        self
    }

    /// Add reply-to address
    pub fn with_reply_to(mut self, reply_to: String) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    /// Add metadata for tracking
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// Email delivery receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailReceipt {
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
    pub provider: String,
    pub metadata: HashMap<String, String>,
}

/// Email service configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Email service provider (ses, mock)
    pub provider: String,
    /// AWS region for SES
    pub aws_region: Option<String>,
    /// AWS endpoint URL (for LocalStack)
    pub aws_endpoint_url: Option<String>,
    /// Sender address
    pub default_from: String,
    /// Sender display name
    pub from_name: String,
    /// Enable email sending (can disable for testing)
    pub enabled: bool,
}

impl EmailConfig {
    /// Create email config from environment variables
    pub fn from_env() -> Result<Self, EmailError> {
        dotenvy::dotenv().ok();

        let provider = std::env::var("EMAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string());

        let aws_region = std::env::var("AWS_REGION").ok();
        let aws_endpoint_url = std::env::var("AWS_ENDPOINT_URL").ok();

        let default_from =
            std::env::var("FROM_EMAIL").unwrap_or_else(|_| "reports@tasktracker.local".to_string());
        if !default_from.contains('@') {
            return Err(EmailError::Configuration(format!(
                "FROM_EMAIL is not an email address: {}",
                default_from
            )));
        }

        let from_name = std::env::var("FROM_NAME").unwrap_or_else(|_| "Task Tracker".to_string());

        let enabled = std::env::var("EMAIL_ENABLED")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(true);

        Ok(Self {
            provider,
            aws_region,
            aws_endpoint_url,
            default_from,
            from_name,
            enabled,
        })
    }

    /// Sender formatted as `Name <address>`
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.from_name, self.default_from)
    }
}

/// Email service trait for different implementations
#[async_trait::async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email message
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError>;

    /// Return the default "from" address for outgoing emails
    fn default_from(&self) -> String;

    /// Short provider name for logs
    fn service_name(&self) -> &'static str;

    /// Send the report listing every task
    async fn send_tasks_report(
        &self,
        recipient_email: &str,
        tasks: &[ReportTask],
    ) -> Result<EmailReceipt, EmailError> {
        tracing::info!(
            recipient = %recipient_email,
            task_count = tasks.len(),
            provider = self.service_name(),
            "Sending tasks report"
        );

        let message = EmailMessage::new(
            recipient_email.to_string(),
            self.default_from(),
            content::TASKS_REPORT_SUBJECT.to_string(),
            content::tasks_report_text(tasks),
        )
        .with_html(content::tasks_report_html(tasks))
        .with_metadata("email_type".to_string(), "tasks_report".to_string())
        .with_metadata("task_count".to_string(), tasks.len().to_string());

        let receipt = self.send_email(message).await?;

        tracing::info!(
            recipient = %recipient_email,
            message_id = %receipt.message_id,
            "Tasks report sent"
        );

        Ok(receipt)
    }
}

/// Email service factory
pub struct EmailServiceFactory;

impl EmailServiceFactory {
    /// Create email service based on configuration
    pub async fn create(config: EmailConfig) -> Result<Box<dyn EmailService>, EmailError> {
        if !config.enabled {
            tracing::info!("Email service disabled, using mock implementation");
            return Ok(Box::new(mock::MockEmailService::new_disabled()));
        }

        match config.provider.as_str() {
            "ses" | "aws-ses" => {
                tracing::info!("Creating AWS SES email service");
                let ses_service = aws_ses::SesEmailService::new(config).await?;
                Ok(Box::new(ses_service))
            }
            "mock" => {
                tracing::info!("Creating mock email service");
                Ok(Box::new(mock::MockEmailService::new()))
            }
            provider => Err(EmailError::Configuration(format!(
                "Unknown email provider: {}. Supported providers: ses, mock",
                provider
            ))),
        }
    }
}
