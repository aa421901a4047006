//! Notification channel contract.

use async_trait::async_trait;

use common::NotifyError;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Notification channel trait for dependency injection.
///
/// Each call is a single delivery attempt.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the welcome email for a new account
    async fn send_welcome(&self, email: &str, username: &str) -> Result<(), NotifyError>;

    /// Send a password reset email carrying the reset token
    async fn send_password_reset(&self, email: &str, token: &str) -> Result<(), NotifyError>;
}
