//! Database Module
//!
//! Handles the SQLite connection pool and migrations

pub mod repository;

use crate::config::Config;
use shared::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service: owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open the pool described by `config` and apply pending migrations
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let in_memory = config.database_url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|e| AppError::database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        // WAL is meaningless for in-memory databases
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        // Every connection to `sqlite::memory:` is a separate database: keep
        // exactly one, and never let the pool recycle it
        let mut pool_options = SqlitePoolOptions::new();
        let max_connections = if in_memory {
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
            1
        } else {
            config.db_max_connections
        };

        let pool = pool_options
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(
            url = %config.database_url,
            max_connections,
            "Database connection established"
        );

        migrate(&pool).await?;

        Ok(Self { pool })
    }
}

/// Apply embedded migrations
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
    tracing::info!("Database migrations applied");
    Ok(())
}
