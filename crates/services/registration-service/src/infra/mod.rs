//! Infrastructure layer - database and schema migrations.

mod db;
pub mod migrations;

pub use db::{Database, MigrateAction, MigrationState};
pub use migrations::Migrator;
