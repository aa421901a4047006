//! Notification layer - account emails behind the `Notifier` trait.

mod mail;
mod notifier;

pub use mail::{EmailMessage, MailNotifier};
pub use notifier::Notifier;

#[cfg(any(test, feature = "test-utils"))]
pub use notifier::MockNotifier;
