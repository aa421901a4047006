//! User directory contract and its SQL implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::DirectoryError;
use domain::{NewUser, User, UserId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User directory trait for dependency injection.
///
/// Fetches report absence as `Ok(None)`, kept apart from access failures.
/// The directory makes no uniqueness promise about usernames.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find user by identifier
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DirectoryError>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError>;

    /// Store a new user, returning it with its assigned identifier
    async fn create(&self, user: NewUser) -> Result<User, DirectoryError>;

    /// Overwrite the stored record with the same identifier.
    ///
    /// Fails with `DirectoryError::NotFound` if the identifier is unknown.
    async fn update(&self, user: User) -> Result<(), DirectoryError>;

    /// Remove user by identifier
    async fn delete(&self, id: UserId) -> Result<(), DirectoryError>;
}

/// Concrete implementation of UserDirectory over a SeaORM connection
pub struct SqlDirectory {
    db: DatabaseConnection,
}

impl SqlDirectory {
    /// Create new directory instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Map a domain identifier onto the `users.id` column.
///
/// Identifiers the column cannot hold cannot have been assigned.
fn column_id(id: UserId) -> Option<i32> {
    i32::try_from(id).ok()
}

#[async_trait]
impl UserDirectory for SqlDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DirectoryError> {
        let Some(id) = column_id(id) else {
            return Ok(None);
        };

        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DirectoryError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, user: NewUser) -> Result<User, DirectoryError> {
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(user.username),
            email: Set(user.email),
            active: Set(user.active),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> Result<(), DirectoryError> {
        let id = column_id(user.id).ok_or(DirectoryError::NotFound)?;

        let changes = ActiveModel {
            id: NotSet,
            username: Set(user.username),
            email: Set(user.email),
            active: Set(user.active),
        };

        let result = UserEntity::update_many()
            .set(changes)
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DirectoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), DirectoryError> {
        let Some(id) = column_id(id) else {
            return Ok(());
        };

        UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
