//! Database client for slotbook
//!
//! Wraps an SQLx `Any` pool. Only the SQLite driver is compiled in, and
//! the schema uses SQLite DDL (`AUTOINCREMENT`, `randomblob`).

use crate::error::DbError;
use slotbook_config::{AppConfig, DatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database client for slotbook
#[derive(Debug, Clone)]
pub struct DbClient {
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Create a client from the `[database]` section of the application config.
    ///
    /// # Errors
    ///
    /// * The database section is missing or its URL is empty
    /// * The pool cannot connect
    pub async fn new(config: &AppConfig) -> Result<Self, DbError> {
        let db_config = config
            .database
            .as_ref()
            .ok_or_else(|| DbError::ConfigError("Database configuration is missing".to_string()))?;

        Self::from_config(db_config).await
    }

    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        Self::from_url(
            &db_config.url,
            db_config.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
        )
        .await
    }

    /// Create a client from a database URL.
    ///
    /// An in-memory SQLite database lives as long as its connection, so
    /// `sqlite::memory:` callers should pass `max_connections = 1`.
    pub async fn from_url(db_url: &str, max_connections: u32) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url, max_connections.max(1)).await?;
        Ok(Self { pool })
    }

    async fn create_pool(db_url: &str, max_connections: u32) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool ({} connections)", max_connections);

        // The Any driver needs the compiled-in drivers registered before connecting
        sqlx::any::install_default_drivers();

        if let Some(db_path) = sqlite_file_path(db_url) {
            if let Some(dir) = Path::new(db_path).parent().filter(|d| !d.as_os_str().is_empty()) {
                if !dir.exists() {
                    debug!("Creating directory for SQLite database: {:?}", dir);
                    std::fs::create_dir_all(dir).map_err(|e| {
                        error!("Failed to create directory for SQLite database: {}", e);
                        DbError::PoolError(format!("Failed to create directory: {}", e))
                    })?;
                }
            }
        }

        let pool_options = PoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600));

        let pool = pool_options
            .connect_with(sqlx::any::AnyConnectOptions::from_str(db_url)?)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a statement that returns no rows, yielding the affected row count.
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }
}

/// File path of an on-disk SQLite URL, `None` for other backends and `:memory:`.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.contains(":memory:") {
        None
    } else {
        Some(path)
    }
}
