//! Registration service - Handles account registration and lifecycle.
//!
//! SOLID (SRP): Handles registration use cases only.
//! SOLID (DIP): Depends on the directory and notifier traits.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult, DirectoryError, NotifyError, OptionExt};
use domain::{NewUser, User, UserId};

use crate::directory::UserDirectory;
use crate::notification::Notifier;

/// Registration service trait for dependency injection.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Register a new active user and send the welcome email
    async fn register(&self, username: &str, email: &str) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> AppResult<User>;

    /// Mark a user inactive
    async fn deactivate(&self, id: UserId) -> AppResult<()>;

    /// Mark a user active
    async fn activate(&self, id: UserId) -> AppResult<()>;

    /// Change a user's email and notify the previous address
    async fn update_email(&self, id: UserId, new_email: &str) -> AppResult<()>;
}

/// Concrete implementation of RegistrationService.
///
/// Username uniqueness is a lookup followed by a create with no lock in
/// between. Two concurrent registrations of the same username can both
/// pass the lookup and both be stored.
pub struct Registrar {
    directory: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl Registrar {
    /// Create new registration service with its collaborators
    pub fn new(directory: Arc<dyn UserDirectory>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            directory,
            notifier,
        }
    }

    /// Read, mutate the local copy, write it back.
    async fn modify<F>(&self, id: UserId, change: F) -> AppResult<User>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut user = self.get_user(id).await?;
        change(&mut user);
        self.directory.update(user.clone()).await?;
        Ok(user)
    }
}

/// Notifications are attempted once; a failure is logged and dropped.
fn discard_notify_failure(result: Result<(), NotifyError>, user_id: UserId, kind: &str) {
    if let Err(err) = result {
        tracing::warn!(user_id, kind, error = %err, "Notification failed, continuing");
    }
}

#[async_trait]
impl RegistrationService for Registrar {
    async fn register(&self, username: &str, email: &str) -> AppResult<User> {
        let new_user = NewUser::new(username, email)?;

        match self.directory.find_by_username(&new_user.username).await {
            Ok(Some(_)) => return Err(AppError::already_exists("Username")),
            Ok(None) | Err(DirectoryError::NotFound) => {}
            Err(err) => return Err(AppError::Persistence(err)),
        }

        let user = self
            .directory
            .create(new_user)
            .await
            .map_err(AppError::Persistence)?;
        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        let sent = self.notifier.send_welcome(&user.email, &user.username).await;
        discard_notify_failure(sent, user.id, "welcome");

        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> AppResult<User> {
        if !User::is_valid_id(id) {
            return Err(AppError::invalid_input(format!(
                "user id must be positive, got {id}"
            )));
        }

        tracing::debug!(user_id = id, "Fetching user");
        self.directory.find_by_id(id).await?.ok_or_not_found()
    }

    async fn deactivate(&self, id: UserId) -> AppResult<()> {
        self.modify(id, User::deactivate).await?;
        tracing::info!(user_id = id, "User deactivated");
        Ok(())
    }

    async fn activate(&self, id: UserId) -> AppResult<()> {
        self.modify(id, User::activate).await?;
        tracing::info!(user_id = id, "User activated");
        Ok(())
    }

    async fn update_email(&self, id: UserId, new_email: &str) -> AppResult<()> {
        if new_email.is_empty() {
            return Err(AppError::invalid_input("email must not be empty"));
        }

        let mut old_email = String::new();
        self.modify(id, |user| {
            old_email = user.change_email(new_email.to_string());
        })
        .await?;
        tracing::info!(user_id = id, "User email updated");

        let notice = format!("Your email was changed to {new_email}");
        let sent = self.notifier.send_welcome(&old_email, &notice).await;
        discard_notify_failure(sent, id, "email_changed");

        Ok(())
    }
}
