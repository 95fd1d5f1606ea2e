use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// A unique, foreign-key or check constraint rejected the write
    #[error("Constraint {constraint} violated: {message}")]
    Constraint { constraint: String, message: String },

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the PostgreSQL connection pool for the process
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Connect using the configured URL and pool limits
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!(
            "Connected to Postgres with max {} connections",
            config.max_connections
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations from ./migrations
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseBackend, DatabaseConfig};

    #[tokio::test]
    async fn connect_requires_database_url() {
        let config = DatabaseConfig {
            backend: DatabaseBackend::Postgres,
            url: None,
            max_connections: 1,
            connection_timeout: 1,
            run_migrations: false,
        };

        match DatabaseManager::connect(&config).await {
            Err(DatabaseError::ConfigMissing(name)) => assert_eq!(name, "DATABASE_URL"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("connect should fail without a URL"),
        }
    }
}
