//! Directory database pool and schema migrations.

use std::collections::HashSet;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::{seaql_migrations, MigrationName, MigratorTrait};

use common::DatabaseConfig;

use super::migrations::Migrator;

/// Migration command issued from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up,
    /// Revert the most recent migration
    Down,
    /// Change nothing, only report
    Status,
    /// Drop everything and reapply
    Fresh,
}

/// One known migration and whether the database has it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Pooled connection to the directory database
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool without touching the schema.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        Ok(Self {
            connection: SeaDatabase::connect(options).await?,
        })
    }

    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        db.migrate(MigrateAction::Up).await?;
        tracing::info!("Directory database ready");
        Ok(db)
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run a migration command and report the resulting state.
    pub async fn migrate(&self, action: MigrateAction) -> Result<Vec<MigrationState>, DbErr> {
        let conn = &self.connection;
        match action {
            MigrateAction::Up => Migrator::up(conn, None).await?,
            MigrateAction::Down => Migrator::down(conn, Some(1)).await?,
            MigrateAction::Fresh => Migrator::fresh(conn).await?,
            MigrateAction::Status => {}
        }
        tracing::debug!(?action, "Migration command finished");

        // The bookkeeping table is missing until the first `up`
        let applied: HashSet<String> = match seaql_migrations::Entity::find().all(conn).await {
            Ok(rows) => rows.into_iter().map(|row| row.version).collect(),
            Err(_) if action == MigrateAction::Status => HashSet::new(),
            Err(err) => return Err(err),
        };

        Ok(Migrator::migrations()
            .iter()
            .map(|migration| {
                let name = migration.name().to_string();
                MigrationState {
                    applied: applied.contains(&name),
                    name,
                }
            })
            .collect())
    }
}
