//! Registration Service Library
//!
//! This crate provides account registration on top of two collaborators:
//! a user directory (storage) and a notifier (account email).
//! It can be driven from the bundled CLI or embedded in another binary.

pub mod config;
pub mod directory;
pub mod infra;
pub mod notification;
pub mod service;

use std::sync::Arc;

use sea_orm::DbErr;
use tracing::info;

use crate::config::RegistrationConfig;
use crate::directory::SqlDirectory;
use crate::infra::Database;
use crate::notification::MailNotifier;
use crate::service::Registrar;

pub use directory::{InMemoryDirectory, UserDirectory};
pub use infra::MigrateAction;
pub use notification::Notifier;
pub use service::RegistrationService;

/// Connect to the configured database and wire the SQL directory and mail
/// notifier into a registrar.
pub async fn connect_registrar(config: &RegistrationConfig) -> Result<Registrar, DbErr> {
    let db = Database::connect(&config.database).await?;

    let directory = Arc::new(SqlDirectory::new(db.get_connection()));
    let notifier = Arc::new(MailNotifier::new(config.mail.clone()));

    Ok(Registrar::new(directory, notifier))
}

/// Run a migration command and print where each migration stands.
pub async fn run_migrations(
    config: &RegistrationConfig,
    action: MigrateAction,
) -> Result<(), DbErr> {
    let db = Database::open(&config.database).await?;

    for state in db.migrate(action).await? {
        let marker = if state.applied { "[x]" } else { "[ ]" };
        println!("{} {}", marker, state.name);
    }
    info!(?action, "Migration command applied");

    Ok(())
}
