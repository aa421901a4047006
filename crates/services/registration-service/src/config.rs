//! Registration service configuration.

use std::env;

use common::{DatabaseConfig, MailConfig};

/// Registration service configuration.
#[derive(Debug, Clone, Default)]
pub struct RegistrationConfig {
    /// User directory database
    pub database: DatabaseConfig,
    /// Outgoing account email
    pub mail: MailConfig,
}

impl RegistrationConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database: DatabaseConfig {
                url: env::var("REGISTRATION_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.min_connections),
            },
            mail: MailConfig {
                from: env::var("MAIL_FROM").unwrap_or(defaults.mail.from),
            },
        }
    }

    /// Override the database URL (e.g. from a CLI flag).
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database.url = url.into();
        self
    }
}
