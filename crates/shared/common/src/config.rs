//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://registration.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// Outgoing mail configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Sender address stamped on every message
    pub from: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from: "noreply@example.com".to_string(),
        }
    }
}
