//! AWS SES email provider
//!
//! Sends the tasks report through Simple Email Service. Setting
//! `AWS_ENDPOINT_URL` points the client at LocalStack instead.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_sdk_ses::config::SharedCredentialsProvider;
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use aws_sdk_ses::Client as SesClient;
use chrono::Utc;

use crate::{EmailConfig, EmailError, EmailMessage, EmailReceipt, EmailService};

const DEFAULT_REGION: &str = "us-east-1";
const PROVIDER: &str = "aws-ses";

/// SES-backed report delivery
pub struct SesEmailService {
    client: SesClient,
    config: EmailConfig,
}

async fn load_sdk_config(config: &EmailConfig) -> SdkConfig {
    let region = Region::new(
        config
            .aws_region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string()),
    );
    let loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

    match &config.aws_endpoint_url {
        Some(endpoint) => {
            tracing::info!(endpoint = %endpoint, "Using custom SES endpoint");
            // LocalStack accepts any static credentials
            let credentials =
                Credentials::new("localstack", "localstack", None, None, "tasktracker-localstack");
            loader
                .endpoint_url(endpoint)
                .credentials_provider(SharedCredentialsProvider::new(credentials))
                .load()
                .await
        }
        None => loader.load().await,
    }
}

fn utf8(part: &str, data: &str) -> Result<Content, EmailError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| EmailError::AwsSes(format!("Invalid {}: {}", part, e)))
}

impl SesEmailService {
    /// Build the client. Reachability is probed but not required.
    pub async fn new(config: EmailConfig) -> Result<Self, EmailError> {
        let client = SesClient::new(&load_sdk_config(&config).await);

        match client.get_send_quota().send().await {
            Ok(_) => tracing::info!("Connected to AWS SES"),
            Err(e) => tracing::warn!(error = %e, "SES quota probe failed, continuing"),
        }

        Ok(Self { client, config })
    }

    fn ses_message(message: &EmailMessage) -> Result<Message, EmailError> {
        let mut body = Body::builder().text(utf8("text body", &message.body_text)?);
        if let Some(html) = &message.body_html {
            body = body.html(utf8("html body", html)?);
        }

        Ok(Message::builder()
            .subject(utf8("subject", &message.subject)?)
            .body(body.build())
            .build())
    }
}

#[async_trait::async_trait]
impl EmailService for SesEmailService {
    async fn send_email(&self, message: EmailMessage) -> Result<EmailReceipt, EmailError> {
        if !message.to.contains('@') || !message.from.contains('@') {
            return Err(EmailError::Validation(format!(
                "Cannot send from {} to {}: malformed address",
                message.from, message.to
            )));
        }

        let mut request = self
            .client
            .send_email()
            .source(&message.from)
            .destination(Destination::builder().to_addresses(&message.to).build())
            .message(Self::ses_message(&message)?);
        if let Some(reply_to) = &message.reply_to {
            request = request.reply_to_addresses(reply_to);
        }

        let output = request
            .send()
            .await
            .map_err(|e| EmailError::AwsSes(e.to_string()))?;

        tracing::info!(recipient = %message.to, message_id = output.message_id(), "Email sent via SES");

        Ok(EmailReceipt {
            message_id: output.message_id().to_string(),
            sent_at: Utc::now(),
            provider: PROVIDER.to_string(),
            metadata: message.metadata,
        })
    }

    fn default_from(&self) -> String {
        self.config.sender()
    }

    fn service_name(&self) -> &'static str {
        PROVIDER
    }
}
