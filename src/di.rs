//! Dependency Injection Module
//!
//! Provides application state and dependency wiring.

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use thiserror::Error;
use tracing::info;

use crate::config::Config;

/// DI initialization errors
#[derive(Debug, Error)]
pub enum DiError {
    #[error("Database connection failed: {0}")]
    DatabaseError(String),

    #[error("Migration failed: {0}")]
    MigrationError(String),
}

/// Application state containing all dependencies.
///
/// The database handle is the only shared resource; it is read-only
/// after initialization and cloned cheaply per request.
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
}

impl AppState {
    /// Connect to PostgreSQL and apply pending migrations
    pub async fn new(config: &Config) -> Result<Self, DiError> {
        info!("Connecting to PostgreSQL...");
        let db = Database::connect(&config.database_url)
            .await
            .map_err(|e| DiError::DatabaseError(e.to_string()))?;
        info!("PostgreSQL connected");

        Migrator::up(&db, None)
            .await
            .map_err(|e| DiError::MigrationError(e.to_string()))?;
        info!("Migrations applied");

        Ok(Self { db })
    }
}
