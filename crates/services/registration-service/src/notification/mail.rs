//! Mail-backed notifier.
//!
//! Renders account emails and hands them to the log outbox. Messages are
//! written through `tracing` rather than an SMTP relay, so every delivery
//! is visible in the service logs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use common::{MailConfig, NotifyError};

use super::Notifier;

/// Outgoing email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Sender address
    pub from: String,
    /// Email subject line
    pub subject: String,
    /// Plain text body
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            from: from.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Notifier that renders account emails and logs them as delivered.
pub struct MailNotifier {
    config: MailConfig,
}

impl MailNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    pub fn welcome_message(&self, email: &str, username: &str) -> EmailMessage {
        EmailMessage::new(
            &self.config.from,
            email,
            "Welcome!",
            format!("Hello {username},\n\nYour account has been created."),
        )
    }

    pub fn password_reset_message(&self, email: &str, token: &str) -> EmailMessage {
        EmailMessage::new(
            &self.config.from,
            email,
            "Password reset",
            format!("Use this token to reset your password: {token}"),
        )
    }

    fn deliver(&self, message: EmailMessage) -> Result<(), NotifyError> {
        if !message.to.contains('@') {
            return Err(NotifyError::InvalidRecipient(message.to));
        }

        tracing::info!(
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            "Email delivered to outbox"
        );
        tracing::debug!(body = %message.body, "Email body");
        Ok(())
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn send_welcome(&self, email: &str, username: &str) -> Result<(), NotifyError> {
        self.deliver(self.welcome_message(email, username))
    }

    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), NotifyError> {
        self.deliver(self.password_reset_message(email, token))
    }
}
