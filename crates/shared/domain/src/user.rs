//! User domain entity and related types.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Directory-assigned user identifier. Valid identifiers are positive.
pub type UserId = i64;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub active: bool,
}

impl User {
    /// Check whether an identifier can refer to a stored user
    pub fn is_valid_id(id: UserId) -> bool {
        id > 0
    }

    /// Mark the account active
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Mark the account inactive
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Replace the email address, returning the previous one
    pub fn change_email(&mut self, email: String) -> String {
        std::mem::replace(&mut self.email, email)
    }
}

/// User creation data passed to the directory.
///
/// Carries no identifier: ids are assigned by the directory on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub active: bool,
}

impl NewUser {
    /// Build an active account from caller input.
    ///
    /// Inputs are taken as given; trimming is the caller's job.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> DomainResult<Self> {
        let username = username.into();
        let email = email.into();

        if username.is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }
        if email.is_empty() {
            return Err(DomainError::validation("email must not be empty"));
        }

        Ok(Self {
            username,
            email,
            active: true,
        })
    }

    /// Attach the identifier assigned by the directory
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            active: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_starts_active() {
        let user = NewUser::new("johndoe", "john@example.com").unwrap();
        assert!(user.active);
        assert_eq!(user.username, "johndoe");
        assert_eq!(user.email, "john@example.com");
    }

    #[test]
    fn new_user_rejects_empty_fields() {
        assert!(matches!(
            NewUser::new("", "john@example.com"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            NewUser::new("johndoe", ""),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn new_user_does_not_trim() {
        let user = NewUser::new(" ", "john@example.com").unwrap();
        assert_eq!(user.username, " ");
    }

    #[test]
    fn change_email_returns_previous_address() {
        let mut user = NewUser::new("johndoe", "old@example.com")
            .unwrap()
            .with_id(7);

        let old = user.change_email("new@example.com".to_string());

        assert_eq!(old, "old@example.com");
        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.id, 7);
    }

    #[test]
    fn activation_toggles() {
        let mut user = NewUser::new("johndoe", "john@example.com")
            .unwrap()
            .with_id(1);

        user.deactivate();
        assert!(!user.active);
        user.activate();
        assert!(user.active);
    }

    #[test]
    fn identifiers_must_be_positive() {
        assert!(User::is_valid_id(1));
        assert!(!User::is_valid_id(0));
        assert!(!User::is_valid_id(-5));
    }

    #[test]
    fn user_serializes_all_fields() {
        let user = NewUser::new("johndoe", "john@example.com")
            .unwrap()
            .with_id(3);
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["username"], "johndoe");
        assert_eq!(json["active"], true);
    }
}
