//! SQL directory tests against an in-memory SQLite database.

use std::sync::Arc;

use common::{AppError, DatabaseConfig, DirectoryError};
use domain::NewUser;
use registration_service_lib::directory::SqlDirectory;
use registration_service_lib::infra::{Database, MigrateAction};
use registration_service_lib::notification::MailNotifier;
use registration_service_lib::service::{Registrar, RegistrationService};
use registration_service_lib::UserDirectory;

fn sqlite_memory() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    }
}

async fn directory() -> SqlDirectory {
    let db = Database::connect(&sqlite_memory()).await.unwrap();
    SqlDirectory::new(db.get_connection())
}

fn new_user(username: &str) -> NewUser {
    NewUser::new(username, format!("{username}@example.com")).unwrap()
}

#[tokio::test]
async fn test_migrations_are_applied() {
    let db = Database::connect(&sqlite_memory()).await.unwrap();

    let status = db.migrate(MigrateAction::Status).await.unwrap();
    assert!(!status.is_empty());
    assert!(status.iter().all(|state| state.applied));
}

#[tokio::test]
async fn test_migrate_down_and_fresh() {
    let db = Database::open(&sqlite_memory()).await.unwrap();

    let before = db.migrate(MigrateAction::Status).await.unwrap();
    assert!(before.iter().all(|state| !state.applied));

    db.migrate(MigrateAction::Up).await.unwrap();
    let after_down = db.migrate(MigrateAction::Down).await.unwrap();
    assert!(after_down.iter().all(|state| !state.applied));

    let after_fresh = db.migrate(MigrateAction::Fresh).await.unwrap();
    assert!(after_fresh.iter().all(|state| state.applied));
}

#[tokio::test]
async fn test_create_and_find() {
    let directory = directory().await;

    let created = directory.create(new_user("alice")).await.unwrap();
    assert!(created.id > 0);
    assert!(created.active);

    let by_id = directory.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id, Some(created.clone()));

    let by_name = directory.find_by_username("alice").await.unwrap();
    assert_eq!(by_name, Some(created));
}

#[tokio::test]
async fn test_find_missing_is_none() {
    let directory = directory().await;

    assert!(directory.find_by_id(1).await.unwrap().is_none());
    assert!(directory.find_by_id(i64::MAX).await.unwrap().is_none());
    assert!(directory.find_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_overwrites_fields() {
    let directory = directory().await;
    let mut user = directory.create(new_user("alice")).await.unwrap();

    user.deactivate();
    user.change_email("alice@new.example.com".to_string());
    directory.update(user.clone()).await.unwrap();

    let stored = directory.find_by_id(user.id).await.unwrap().unwrap();
    assert!(!stored.active);
    assert_eq!(stored.email, "alice@new.example.com");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let directory = directory().await;
    let ghost = new_user("ghost").with_id(77);

    assert!(matches!(
        directory.update(ghost).await,
        Err(DirectoryError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_removes_record() {
    let directory = directory().await;
    let user = directory.create(new_user("alice")).await.unwrap();

    directory.delete(user.id).await.unwrap();

    assert!(directory.find_by_id(user.id).await.unwrap().is_none());
    assert!(directory.delete(user.id).await.is_ok());
}

#[tokio::test]
async fn test_deleted_ids_are_not_reused() {
    let directory = directory().await;

    let first = directory.create(new_user("alice")).await.unwrap();
    directory.delete(first.id).await.unwrap();
    let second = directory.create(new_user("bob")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert!(directory.find_by_id(first.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_storage_allows_duplicate_usernames() {
    let directory = directory().await;

    let first = directory.create(new_user("alice")).await.unwrap();
    let second = directory.create(new_user("alice")).await.unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn test_registrar_end_to_end() {
    let service = Registrar::new(
        Arc::new(directory().await),
        Arc::new(MailNotifier::new(Default::default())),
    );

    let user = service.register("johndoe", "john@example.com").await.unwrap();
    assert!(matches!(
        service.register("johndoe", "again@example.com").await,
        Err(AppError::AlreadyExists(_))
    ));

    service.deactivate(user.id).await.unwrap();
    service.update_email(user.id, "new@example.com").await.unwrap();

    let stored = service.get_user(user.id).await.unwrap();
    assert!(!stored.active);
    assert_eq!(stored.email, "new@example.com");
}
