//! Shared application state

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::DbService;
use crate::services::EmployeeService;
use shared::AppError;

/// State handed to every handler (cheap to clone)
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pool: SqlitePool,
    pub employees: EmployeeService,
    pub started_at: std::time::Instant,
}

impl AppState {
    /// Open the database and wire up services
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let db = DbService::new(&config).await?;
        Ok(Self::from_pool(config, db.pool))
    }

    pub fn from_pool(config: Config, pool: SqlitePool) -> Self {
        Self {
            employees: EmployeeService::new(pool.clone()),
            config,
            pool,
            started_at: std::time::Instant::now(),
        }
    }
}
