//! Database module providing connection management, migrations, and queries.

pub mod api_specs;
pub mod practices;
pub mod test_runs;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper.
///
/// `DatabaseConnection` is itself a pool handle, so cloning is cheap.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration.
    pub async fn new(config: &Config) -> AppResult<Self> {
        Self::connect(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
    }

    /// Connect to the given SeaORM URL (`postgres://` or `sqlite://`).
    pub async fn connect(url: &str, max_connections: u32, min_connections: u32) -> AppResult<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        options
            .max_connections(max_connections)
            .min_connections(min_connections.min(max_connections))
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))?;

        info!("Database migrations applied");
        Ok(())
    }

    /// Round-trip a trivial query to check the database is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        let backend = self.conn.get_database_backend();
        let stmt = Statement::from_string(backend, "SELECT 1".to_owned());
        self.conn
            .query_one_raw(stmt)
            .await
            .map_err(|e| AppError::Database(format!("Database ping failed: {}", e)))?;
        Ok(())
    }
}
